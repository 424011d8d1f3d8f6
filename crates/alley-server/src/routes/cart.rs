//! Cart and checkout endpoints.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{Cart, CartItem, Order, OrderLine, PaymentDetails, Product, ShippingAddress};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/add", post(add_to_cart))
        .route("/remove/{product_id}", delete(remove_from_cart))
        .route("/checkout", post(checkout))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest {
    product_id: Uuid,
    #[serde(default = "default_quantity")]
    quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest {
    shipping_address: Option<ShippingAddress>,
    payment_details: Option<PaymentDetails>,
}

/// A cart line with its product resolved for display.
#[derive(Serialize)]
struct EnrichedCartItem {
    #[serde(flatten)]
    item: CartItem,
    product: Option<Product>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnrichedCart {
    id: Uuid,
    user_id: Uuid,
    items: Vec<EnrichedCartItem>,
}

fn enrich(state: &AppState, cart: Cart) -> EnrichedCart {
    let items = cart
        .items
        .into_iter()
        .map(|item| EnrichedCartItem {
            product: state.store.get_product(item.product_id),
            item,
        })
        .collect();
    EnrichedCart {
        id: cart.id,
        user_id: cart.user_id,
        items,
    }
}

/// GET /api/cart
async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EnrichedCart>, AppError> {
    let user = require_user(&state.jwt, &headers)?;
    let cart = state.store.cart_for_user_or_create(user.id);
    Ok(Json(enrich(&state, cart)))
}

/// POST /api/cart/add
async fn add_to_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<Cart>, AppError> {
    let user = require_user(&state.jwt, &headers)?;

    let product = state
        .store
        .get_product(request.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    state.store.cart_for_user_or_create(user.id);
    let cart = state
        .store
        .update_cart(user.id, |cart| {
            cart.add(product.id, request.quantity, product.price.clone());
        })
        .ok_or_else(|| AppError::Internal("Cart disappeared during update".to_string()))?;

    Ok(Json(cart))
}

/// DELETE /api/cart/remove/{product_id}
async fn remove_from_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Cart>, AppError> {
    let user = require_user(&state.jwt, &headers)?;

    let cart = state
        .store
        .update_cart(user.id, |cart| {
            cart.items.retain(|item| item.product_id != product_id);
        })
        .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

    Ok(Json(cart))
}

/// POST /api/cart/checkout
///
/// Turns the cart into a pending order (titles snapshotted) and empties it.
async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let user = require_user(&state.jwt, &headers)?;

    let cart = state
        .store
        .cart_for_user(user.id)
        .filter(|c| !c.items.is_empty())
        .ok_or_else(|| AppError::BadRequest("Cart is empty".to_string()))?;

    let total_amount = cart.total();
    let lines = cart
        .items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price.clone(),
            title: state
                .store
                .get_product(item.product_id)
                .map(|p| p.title)
                .unwrap_or_else(|| "Unknown Product".to_string()),
        })
        .collect();

    let order = state.store.create_order(Order::new(
        user.id,
        lines,
        total_amount,
        request.payment_details,
        request.shipping_address,
    ));

    state.store.update_cart(user.id, |cart| cart.items.clear());

    Ok((StatusCode::CREATED, Json(order)))
}
