//! Order history endpoints.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{Order, Role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
}

/// GET /api/orders
async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, AppError> {
    let user = require_user(&state.jwt, &headers)?;
    Ok(Json(state.store.orders(Some(user.id))))
}

/// GET /api/orders/{id}
///
/// Owners see their own orders; admins see everything.
async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let user = require_user(&state.jwt, &headers)?;

    let order = state
        .store
        .get_order(id)
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if user.role != Role::Admin && order.user_id != user.id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    Ok(Json(order))
}
