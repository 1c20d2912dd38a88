use serde::{Deserialize, Serialize};

/// Core Artist entity - the only record this catalog manages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(alias = "artistId")]
    pub id: Option<i32>, // None until storage assigns one
    pub name: Option<String>,
}

impl Artist {
    pub fn new(name: Option<String>) -> Self {
        Self { id: None, name }
    }

    pub fn with_id(id: i32, name: Option<String>) -> Self {
        Self { id: Some(id), name }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
