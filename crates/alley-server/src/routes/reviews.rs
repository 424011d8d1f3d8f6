//! Review endpoints.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{NewReview, Review};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_review))
}

/// POST /api/reviews
async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(new_review): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let user = require_user(&state.jwt, &headers)?;

    if !(1..=5).contains(&new_review.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    if state.store.get_product(new_review.product_id).is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let review = state
        .store
        .create_review(Review::from_new(new_review, user.id));
    Ok((StatusCode::CREATED, Json(review)))
}
