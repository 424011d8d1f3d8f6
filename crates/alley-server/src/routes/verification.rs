//! AI story generation and authenticity verification endpoints.
//!
//! Two write paths touch a product's trust fields: the artist submission
//! workflow here and the admin override in `routes::admin`. Both go through
//! `MemStore::apply_trust` with the version they read, so racing writers
//! conflict instead of overwriting each other.

use alley_verify::{AuthenticityReport, AuthenticityRequest, StoryRequest, TrustTier};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{ArtistUndertaking, Role, TrustTransition, User};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai/story", post(generate_story))
        .route("/ai/verify", post(quick_verify))
        .route("/artist/verify-product", post(verify_submission))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoryGenerationRequest {
    product_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuickVerifyRequest {
    product_id: Uuid,
    image_urls: Option<Vec<String>>,
}

/// Body of an artist's verification submission.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifySubmissionRequest {
    product_id: Uuid,
    #[serde(default)]
    experience_years: String,
    #[serde(default)]
    specialization: String,
    #[serde(default)]
    tools_used: String,
    #[serde(default)]
    creation_time: String,
    #[serde(default)]
    undertaking_accepted: bool,
}

/// Full verification result: the raw analyzer report plus the composite
/// outcome.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifySubmissionResponse {
    #[serde(flatten)]
    report: AuthenticityReport,
    final_score: u8,
    status: TrustTier,
    message: &'static str,
}

fn artist_name(artist: Option<&User>) -> String {
    artist
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "Unknown Artist".to_string())
}

/// Best-effort caller address for the undertaking snapshot.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// POST /api/ai/story
///
/// Generates the product's narrative and persists the main story text.
/// Generation never fails; a model outage degrades to templated text.
async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<StoryGenerationRequest>,
) -> Result<Json<alley_verify::Story>, AppError> {
    let product = state
        .store
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let artist = state.store.get_user(product.artist_id);

    let story = state
        .stories
        .generate(&StoryRequest {
            product_title: product.title.clone(),
            product_description: product.description.clone(),
            artist_name: artist_name(artist.as_ref()),
            artist_bio: artist
                .as_ref()
                .and_then(|a| a.artist_portfolio.as_ref())
                .and_then(|p| p.bio.clone()),
            medium: product.medium_or_default().to_string(),
            style: product.style.clone(),
            location: artist
                .as_ref()
                .and_then(|a| a.artist_portfolio.as_ref())
                .and_then(|p| p.location.clone()),
        })
        .await;

    state.store.update_product(product.id, |p| {
        p.story = Some(story.ai_story.clone());
    });

    Ok(Json(story))
}

/// POST /api/artist/verify-product
///
/// The artist self-verification workflow: undertaking gate, AI pre-score,
/// composite scoring, then one versioned trust write.
async fn verify_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<VerifySubmissionRequest>,
) -> Result<Json<VerifySubmissionResponse>, AppError> {
    // Step 1: the undertaking gate. Nothing is touched without it.
    if !request.undertaking_accepted {
        return Err(AppError::BadRequest(
            "Artist undertaking must be accepted".to_string(),
        ));
    }

    // Step 2: load the product.
    let product = state
        .store
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    // Step 3: load the owning artist (may be gone; scoring still runs).
    let artist = state.store.get_user(product.artist_id);

    // Step 4: AI image analysis pre-score.
    let report = state.analyzer.analyze(&AuthenticityRequest {
        image_urls: product.images.clone(),
        product_title: product.title.clone(),
        medium: product.medium_or_default().to_string(),
        artist_name: artist_name(artist.as_ref()),
    });

    // Step 5: composite score over the AI result and the declaration.
    let composite = alley_verify::score_submission(
        report.authenticity_score,
        &request.experience_years,
        &request.specialization,
        &request.tools_used,
        &request.creation_time,
    );

    // Step 6: persist status, composite score, verification ID and the
    // undertaking snapshot against the version read in step 2.
    state.store.apply_trust(
        product.id,
        product.version,
        TrustTransition {
            status: composite.status,
            score: Some(f64::from(composite.final_score)),
            verification_id: Some(report.verification_id.clone()),
            undertaking: Some(ArtistUndertaking {
                signed: true,
                timestamp: Utc::now(),
                experience_years: request.experience_years,
                specialization: request.specialization,
                tools_used: request.tools_used,
                creation_time: request.creation_time,
                ip_address: client_ip(&headers),
            }),
        },
    )?;

    // Step 7: hand the full picture back to the artist.
    Ok(Json(VerifySubmissionResponse {
        report,
        final_score: composite.final_score,
        status: composite.status,
        message: composite.message,
    }))
}

/// POST /api/ai/verify
///
/// Raw analyzer pass without the artist declaration (artist/admin only).
/// The raw score alone decides: above 90 verifies, otherwise the product
/// stays pending.
async fn quick_verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QuickVerifyRequest>,
) -> Result<Json<AuthenticityReport>, AppError> {
    let caller = require_user(&state.jwt, &headers)?;
    caller.require_role(&[Role::Artist, Role::Admin])?;

    let product = state
        .store
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let artist = state.store.get_user(product.artist_id);

    let report = state.analyzer.analyze(&AuthenticityRequest {
        image_urls: request.image_urls.unwrap_or_else(|| product.images.clone()),
        product_title: product.title.clone(),
        medium: product.medium_or_default().to_string(),
        artist_name: artist_name(artist.as_ref()),
    });

    let status = if report.authenticity_score > 90.0 {
        TrustTier::Verified
    } else {
        TrustTier::Pending
    };

    state.store.apply_trust(
        product.id,
        product.version,
        TrustTransition {
            status,
            score: Some(report.authenticity_score),
            verification_id: Some(report.verification_id.clone()),
            undertaking: None,
        },
    )?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_defaults_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_submission_defaults_missing_fields_to_empty() {
        let body = format!(
            r#"{{"productId":"{}","undertakingAccepted":true}}"#,
            Uuid::new_v4()
        );
        let request: VerifySubmissionRequest = serde_json::from_str(&body).unwrap();
        assert!(request.undertaking_accepted);
        assert!(request.experience_years.is_empty());
        assert!(request.tools_used.is_empty());
    }

    #[test]
    fn test_undertaking_defaults_to_not_accepted() {
        let body = format!(r#"{{"productId":"{}"}}"#, Uuid::new_v4());
        let request: VerifySubmissionRequest = serde_json::from_str(&body).unwrap();
        assert!(!request.undertaking_accepted);
    }
}
