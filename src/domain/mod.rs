use serde::{Deserialize, Serialize};

/// A named grouping of gods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantheon {
    pub pantheon_id: i32,
    pub name: String,
}

/// A god belonging to exactly one pantheon via `pantheon_id`.
///
/// The foreign key is not checked against existing pantheons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct God {
    pub id: i32,
    pub name: String,
    pub pantheon_id: i32,
}

impl Pantheon {
    pub fn new(pantheon_id: i32, name: impl Into<String>) -> Self {
        Self {
            pantheon_id,
            name: name.into(),
        }
    }
}

impl God {
    pub fn new(id: i32, name: impl Into<String>, pantheon_id: i32) -> Self {
        Self {
            id,
            name: name.into(),
            pantheon_id,
        }
    }
}

/// Pantheons present at startup
pub fn seed_pantheons() -> Vec<Pantheon> {
    vec![Pantheon::new(1, "Olympians"), Pantheon::new(2, "Titans")]
}

/// Gods present at startup
pub fn seed_gods() -> Vec<God> {
    vec![
        God::new(1, "Zeus", 1),
        God::new(2, "Posideon", 1),
        God::new(3, "Hades", 1),
        God::new(4, "Hera", 1),
        God::new(5, "Aphrodite", 1),
        God::new(6, "Cronus", 2),
        God::new(7, "Atlas", 2),
        God::new(8, "Eos", 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_sequential() {
        let gods = seed_gods();
        assert_eq!(gods.len(), 8);
        for (idx, god) in gods.iter().enumerate() {
            assert_eq!(god.id, idx as i32 + 1);
        }

        let pantheons = seed_pantheons();
        assert_eq!(pantheons[1].pantheon_id, 2);
        assert_eq!(pantheons[1].name, "Titans");
    }

    #[test]
    fn test_god_serializes_with_snake_case_keys() {
        let json = serde_json::to_value(God::new(6, "Cronus", 2)).unwrap();
        assert_eq!(json["pantheon_id"], 2);
        assert_eq!(json["name"], "Cronus");
    }
}
