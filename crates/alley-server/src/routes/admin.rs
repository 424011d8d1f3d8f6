//! Admin endpoints: artist/product verification overrides and stats.

use alley_verify::TrustTier;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{Product, Role, TrustTransition, User};
use crate::state::AppState;
use crate::store::ProductFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verifyArtist", post(verify_artist))
        .route("/verifyProduct", post(verify_product))
        .route("/stats", get(stats))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyArtistRequest {
    artist_id: Uuid,
    approved: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyProductRequest {
    product_id: Uuid,
    approved: bool,
}

#[derive(Serialize)]
struct VerifyArtistResponse {
    message: String,
    user: User,
}

#[derive(Serialize)]
struct VerifyProductResponse {
    message: String,
    product: Product,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingVerifications {
    users: Vec<User>,
    products: Vec<Product>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminStats {
    total_users: usize,
    total_products: usize,
    total_orders: usize,
    total_revenue: BigDecimal,
    pending_artist_verifications: usize,
    pending_product_verifications: usize,
    pending_verifications: PendingVerifications,
}

/// POST /api/admin/verifyArtist
async fn verify_artist(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<VerifyArtistRequest>,
) -> Result<Json<VerifyArtistResponse>, AppError> {
    let caller = require_user(&state.jwt, &headers)?;
    caller.require_role(&[Role::Admin])?;

    let user = state
        .store
        .update_user(request.artist_id, |u| u.verified_status = request.approved)
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    Ok(Json(VerifyArtistResponse {
        message: format!(
            "Artist {}",
            if request.approved { "approved" } else { "rejected" }
        ),
        user,
    }))
}

/// POST /api/admin/verifyProduct
///
/// Forces a product's trust status without running the scoring workflow.
/// Goes through the same versioned transition as the artist workflow, so a
/// concurrent verification run conflicts instead of being clobbered.
async fn verify_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<VerifyProductRequest>,
) -> Result<Json<VerifyProductResponse>, AppError> {
    let caller = require_user(&state.jwt, &headers)?;
    caller.require_role(&[Role::Admin])?;

    let product = state
        .store
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let status = if request.approved {
        TrustTier::Verified
    } else {
        TrustTier::Rejected
    };

    let product = state.store.apply_trust(
        product.id,
        product.version,
        TrustTransition {
            status,
            score: None,
            verification_id: None,
            undertaking: None,
        },
    )?;

    Ok(Json(VerifyProductResponse {
        message: format!(
            "Product {}",
            if request.approved { "verified" } else { "rejected" }
        ),
        product,
    }))
}

/// GET /api/admin/stats
async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminStats>, AppError> {
    let caller = require_user(&state.jwt, &headers)?;
    caller.require_role(&[Role::Admin])?;

    let users = state.store.users(None);
    let products = state.store.products(&ProductFilter::default());
    let orders = state.store.orders(None);
    let (pending_users, pending_products) = state.store.pending_verifications();

    let total_revenue = orders
        .iter()
        .fold(BigDecimal::from(0), |acc, o| acc + &o.total_amount);

    Ok(Json(AdminStats {
        total_users: users.len(),
        total_products: products.len(),
        total_orders: orders.len(),
        total_revenue,
        pending_artist_verifications: pending_users.len(),
        pending_product_verifications: pending_products.len(),
        pending_verifications: PendingVerifications {
            users: pending_users,
            products: pending_products,
        },
    }))
}
