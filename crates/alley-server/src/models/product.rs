//! Products and their authenticity trust state.

use alley_verify::TrustTier;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The artist's signed declaration attached to a verification submission.
/// Overwritten wholesale when the artist resubmits; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistUndertaking {
    pub signed: bool,
    pub timestamp: DateTime<Utc>,
    pub experience_years: String,
    pub specialization: String,
    pub tools_used: String,
    pub creation_time: String,
    pub ip_address: String,
}

/// A product listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
    pub stock: i32,
    pub artist_id: Uuid,
    pub images: Vec<String>,
    pub story: Option<String>,
    pub authenticity_status: TrustTier,
    /// Composite score from the last verification run; absent until then.
    pub authenticity_score: Option<f64>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    pub style: Option<String>,
    pub verification_id: Option<String>,
    pub artist_undertaking: Option<ArtistUndertaking>,
    /// Bumped on every mutation. Trust writers must present the version they
    /// read so concurrent writers conflict instead of clobbering each other.
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

/// Listing payload submitted by an artist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
    #[serde(default = "default_stock")]
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<String>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    pub style: Option<String>,
}

fn default_stock() -> i32 {
    1
}

/// One atomic change to a product's trust fields. Both the artist workflow
/// and the admin override express their writes as a transition.
#[derive(Debug, Clone)]
pub struct TrustTransition {
    pub status: TrustTier,
    pub score: Option<f64>,
    pub verification_id: Option<String>,
    pub undertaking: Option<ArtistUndertaking>,
}

impl Product {
    /// Creates a listing from an artist's submission. New products start
    /// `pending` with no score and no verification ID.
    pub fn from_new(new: NewProduct, artist_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            category_id: new.category_id,
            price: new.price,
            stock: new.stock,
            artist_id,
            images: new.images,
            story: None,
            authenticity_status: TrustTier::Pending,
            authenticity_score: None,
            dimensions: new.dimensions,
            medium: new.medium,
            year: new.year,
            style: new.style,
            verification_id: None,
            artist_undertaking: None,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Applies a trust transition in place and bumps the version.
    /// Optional fields leave the current value untouched when absent.
    pub fn apply_trust(&mut self, transition: TrustTransition) {
        self.authenticity_status = transition.status;
        if let Some(score) = transition.score {
            self.authenticity_score = Some(score);
        }
        if let Some(id) = transition.verification_id {
            self.verification_id = Some(id);
        }
        if let Some(undertaking) = transition.undertaking {
            self.artist_undertaking = Some(undertaking);
        }
        self.version += 1;
    }

    /// Medium shown to the AI pipeline when the listing left it blank.
    pub fn medium_or_default(&self) -> &str {
        self.medium.as_deref().unwrap_or("Mixed Media")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> Product {
        let body = serde_json::json!({
            "title": "Warli Harvest",
            "description": "Hand-painted Warli scene",
            "categoryId": Uuid::new_v4(),
            "price": "15999.00",
        });
        let new: NewProduct = serde_json::from_value(body).unwrap();
        Product::from_new(new, Uuid::new_v4())
    }

    #[test]
    fn test_new_products_start_pending() {
        let product = new_product();
        assert_eq!(product.authenticity_status, TrustTier::Pending);
        assert!(product.authenticity_score.is_none());
        assert!(product.verification_id.is_none());
        assert_eq!(product.stock, 1);
        assert_eq!(product.version, 0);
    }

    #[test]
    fn test_apply_trust_bumps_version() {
        let mut product = new_product();
        product.apply_trust(TrustTransition {
            status: TrustTier::Verified,
            score: Some(92.0),
            verification_id: Some("AUTH-1-XY12".to_string()),
            undertaking: None,
        });
        assert_eq!(product.version, 1);
        assert_eq!(product.authenticity_status, TrustTier::Verified);
        assert_eq!(product.authenticity_score, Some(92.0));
        assert_eq!(product.verification_id.as_deref(), Some("AUTH-1-XY12"));
    }

    #[test]
    fn test_admin_override_keeps_existing_score() {
        let mut product = new_product();
        product.apply_trust(TrustTransition {
            status: TrustTier::Verified,
            score: Some(92.0),
            verification_id: Some("AUTH-1-XY12".to_string()),
            undertaking: None,
        });
        // Admin forces rejection; score and ID from the earlier run survive.
        product.apply_trust(TrustTransition {
            status: TrustTier::Rejected,
            score: None,
            verification_id: None,
            undertaking: None,
        });
        assert_eq!(product.authenticity_status, TrustTier::Rejected);
        assert_eq!(product.authenticity_score, Some(92.0));
        assert_eq!(product.version, 2);
    }

    #[test]
    fn test_medium_default() {
        let mut product = new_product();
        assert_eq!(product.medium_or_default(), "Mixed Media");
        product.medium = Some("Oil on Canvas".to_string());
        assert_eq!(product.medium_or_default(), "Oil on Canvas");
    }
}
