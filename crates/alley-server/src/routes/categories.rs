//! Category endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::models::Category;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// GET /api/categories
async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.categories())
}
