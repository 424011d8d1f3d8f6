//! Product categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A browsable product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
}

impl Category {
    pub fn new(name: &str, description: &str, slug: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(description.to_string()),
            slug: slug.to_string(),
        }
    }
}
