//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub media: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Review payload; the author comes from the auth token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(default)]
    pub media: Vec<String>,
}

impl Review {
    pub fn from_new(new: NewReview, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            user_id,
            rating: new.rating,
            comment: new.comment,
            media: new.media,
            created_at: Utc::now(),
        }
    }
}
