use super::traits::Storage;
use crate::domain::*;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// In-memory storage backed by two vectors.
///
/// Lookups are linear scans in insertion order. The length read for a new id
/// and the push happen under one lock acquisition, so ids never collide.
pub struct InMemoryStorage {
    pantheons: Mutex<Vec<Pantheon>>,
    gods: Mutex<Vec<God>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Empty storage
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Storage preloaded with the Olympians and Titans
    pub fn seeded() -> Self {
        Self::with_data(seed_pantheons(), seed_gods())
    }

    pub fn with_data(pantheons: Vec<Pantheon>, gods: Vec<God>) -> Self {
        Self {
            pantheons: Mutex::new(pantheons),
            gods: Mutex::new(gods),
        }
    }

    fn lock_gods(&self) -> Result<MutexGuard<'_, Vec<God>>> {
        self.gods.lock().map_err(|_| ApiError::Storage {
            message: "god collection lock poisoned".to_string(),
        })
    }

    fn lock_pantheons(&self) -> Result<MutexGuard<'_, Vec<Pantheon>>> {
        self.pantheons.lock().map_err(|_| ApiError::Storage {
            message: "pantheon collection lock poisoned".to_string(),
        })
    }
}

fn next_id(len: usize) -> Result<i32> {
    i32::try_from(len + 1).map_err(|_| ApiError::Storage {
        message: format!("id space exhausted at {} records", len),
    })
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_god(&self, name: &str, pantheon_id: i32) -> Result<God> {
        let mut gods = self.lock_gods()?;
        let god = God::new(next_id(gods.len())?, name, pantheon_id);
        gods.push(god.clone());

        debug!("Created god: {} with id {}", god.name, god.id);
        Ok(god)
    }

    async fn get_god_by_id(&self, id: i32) -> Result<Option<God>> {
        let gods = self.lock_gods()?;
        Ok(gods.iter().find(|g| g.id == id).cloned())
    }

    async fn get_all_gods(&self) -> Result<Vec<God>> {
        let gods = self.lock_gods()?;
        Ok(gods.clone())
    }

    async fn get_gods_by_pantheon_id(&self, pantheon_id: i32) -> Result<Vec<God>> {
        let gods = self.lock_gods()?;
        Ok(gods
            .iter()
            .filter(|g| g.pantheon_id == pantheon_id)
            .cloned()
            .collect())
    }

    async fn create_pantheon(&self, name: &str) -> Result<Pantheon> {
        let mut pantheons = self.lock_pantheons()?;
        let pantheon = Pantheon::new(next_id(pantheons.len())?, name);
        pantheons.push(pantheon.clone());

        debug!(
            "Created pantheon: {} with id {}",
            pantheon.name, pantheon.pantheon_id
        );
        Ok(pantheon)
    }

    async fn get_pantheon_by_id(&self, pantheon_id: i32) -> Result<Option<Pantheon>> {
        let pantheons = self.lock_pantheons()?;
        Ok(pantheons
            .iter()
            .find(|p| p.pantheon_id == pantheon_id)
            .cloned())
    }

    async fn get_all_pantheons(&self) -> Result<Vec<Pantheon>> {
        let pantheons = self.lock_pantheons()?;
        Ok(pantheons.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seeded_storage_has_eight_gods() {
        let storage = InMemoryStorage::seeded();
        let gods = storage.get_all_gods().await.unwrap();
        assert_eq!(gods.len(), 8);
        assert_eq!(gods[0].name, "Zeus");
        assert_eq!(gods[7].name, "Eos");
    }

    #[tokio::test]
    async fn test_create_god_appends_with_next_id() {
        let storage = InMemoryStorage::seeded();
        let god = storage.create_god("Apollo", 1).await.unwrap();

        assert_eq!(god.id, 9);
        assert_eq!(storage.get_all_gods().await.unwrap().len(), 9);
        assert_eq!(storage.get_god_by_id(9).await.unwrap(), Some(god));
    }

    #[tokio::test]
    async fn test_create_god_does_not_validate_pantheon() {
        let storage = InMemoryStorage::seeded();
        let god = storage.create_god("Odin", 42).await.unwrap();

        assert_eq!(god.pantheon_id, 42);
        assert!(storage.get_pantheon_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_pantheon_on_empty_storage_starts_at_one() {
        let storage = InMemoryStorage::new();
        let first = storage.create_pantheon("Aesir").await.unwrap();
        let second = storage.create_pantheon("Vanir").await.unwrap();

        assert_eq!(first.pantheon_id, 1);
        assert_eq!(second.pantheon_id, 2);
    }

    #[tokio::test]
    async fn test_missing_lookups_return_none() {
        let storage = InMemoryStorage::seeded();
        assert!(storage.get_god_by_id(999).await.unwrap().is_none());
        assert!(storage.get_pantheon_by_id(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gods_by_pantheon_preserves_insertion_order() {
        let storage = InMemoryStorage::seeded();
        let titans = storage.get_gods_by_pantheon_id(2).await.unwrap();
        let names: Vec<&str> = titans.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Cronus", "Atlas", "Eos"]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let st = storage.clone();
            handles.push(tokio::spawn(async move {
                st.create_god(&format!("god-{}", i), 1).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, (1..=16).collect::<Vec<i32>>());
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_a_storage_error() {
        let storage = Arc::new(InMemoryStorage::seeded());

        let st = storage.clone();
        let joined = std::thread::spawn(move || {
            let _guard = st.gods.lock().unwrap();
            panic!("writer died while holding the god collection");
        })
        .join();
        assert!(joined.is_err());
        assert!(storage.gods.is_poisoned());

        assert!(matches!(
            storage.create_god("Loki", 1).await,
            Err(ApiError::Storage { .. })
        ));
        assert!(matches!(
            storage.get_all_gods().await,
            Err(ApiError::Storage { .. })
        ));
        assert_eq!(storage.get_all_pantheons().await.unwrap().len(), 2);

        let schema = crate::graphql::create_schema(storage.clone());
        let response = schema.execute("{ gods { id } }").await;
        assert!(response.is_err());
        assert!(response.errors[0].message.contains("poisoned"));
    }
}
