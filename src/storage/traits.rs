use crate::domain::*;
use crate::error::Result;
use async_trait::async_trait;

/// Storage trait for the pantheon and god collections.
///
/// Collections are append-only: new records receive `len + 1` as their id.
#[async_trait]
pub trait Storage: Send + Sync {
    // God operations
    async fn create_god(&self, name: &str, pantheon_id: i32) -> Result<God>;
    async fn get_god_by_id(&self, id: i32) -> Result<Option<God>>;
    async fn get_all_gods(&self) -> Result<Vec<God>>;
    async fn get_gods_by_pantheon_id(&self, pantheon_id: i32) -> Result<Vec<God>>;

    // Pantheon operations
    async fn create_pantheon(&self, name: &str) -> Result<Pantheon>;
    async fn get_pantheon_by_id(&self, pantheon_id: i32) -> Result<Option<Pantheon>>;
    async fn get_all_pantheons(&self) -> Result<Vec<Pantheon>>;
}
