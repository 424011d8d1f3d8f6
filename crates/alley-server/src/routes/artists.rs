//! Artist profile endpoints.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{Product, Role, User};
use crate::state::AppState;
use crate::store::ProductFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(own_products))
        .route("/verify", post(request_verification))
        .route("/{id}", get(get_artist))
}

/// Artist profile plus their catalog.
#[derive(Serialize)]
struct ArtistProfile {
    #[serde(flatten)]
    artist: User,
    products: Vec<Product>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// GET /api/artists/{id}
async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistProfile>, AppError> {
    let artist = state
        .store
        .get_user(id)
        .filter(|u| u.role == Role::Artist)
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let products = state.store.products(&ProductFilter {
        artist_id: Some(artist.id),
        ..Default::default()
    });

    Ok(Json(ArtistProfile { artist, products }))
}

/// GET /api/artists/products
async fn own_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Product>>, AppError> {
    let user = require_user(&state.jwt, &headers)?;
    user.require_role(&[Role::Artist])?;

    Ok(Json(state.store.products(&ProductFilter {
        artist_id: Some(user.id),
        ..Default::default()
    })))
}

/// POST /api/artists/verify
///
/// Marks the artist as awaiting admin review. Document handling itself is
/// out of scope; the flag is what the admin dashboard lists.
async fn request_verification(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let user = require_user(&state.jwt, &headers)?;
    user.require_role(&[Role::Artist])?;

    state
        .store
        .update_user(user.id, |u| u.verified_status = false)
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    Ok(Json(MessageResponse {
        message: "Verification documents submitted for review".to_string(),
    }))
}
