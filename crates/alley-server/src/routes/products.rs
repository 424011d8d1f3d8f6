//! Product catalog endpoints.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::error::AppError;
use crate::models::{NewProduct, Product, Review, Role, User};
use crate::state::AppState;
use crate::store::ProductFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
        .route("/category/{category_id}", get(products_by_category))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// A product together with its (sanitized) artist.
#[derive(Serialize)]
pub struct ProductWithArtist {
    #[serde(flatten)]
    pub product: Product,
    pub artist: Option<User>,
}

/// Product detail page payload.
#[derive(Serialize)]
struct ProductDetail {
    #[serde(flatten)]
    product: Product,
    artist: Option<User>,
    reviews: Vec<Review>,
}

fn with_artist(state: &AppState, product: Product) -> ProductWithArtist {
    let artist = state.store.get_user(product.artist_id);
    ProductWithArtist { product, artist }
}

/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<ProductWithArtist>> {
    let filter = ProductFilter {
        category_id: query.category_id,
        artist_id: query.artist_id,
        limit: query.limit,
        offset: query.offset,
    };
    let products = state
        .store
        .products(&filter)
        .into_iter()
        .map(|p| with_artist(&state, p))
        .collect();
    Json(products)
}

/// GET /api/products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductDetail>, AppError> {
    let product = state
        .store
        .get_product(id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let artist = state.store.get_user(product.artist_id);
    let reviews = state.store.reviews_for_product(product.id);

    Ok(Json(ProductDetail {
        product,
        artist,
        reviews,
    }))
}

/// GET /api/products/category/{category_id}
async fn products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Json<Vec<ProductWithArtist>> {
    let filter = ProductFilter {
        category_id: Some(category_id),
        ..Default::default()
    };
    let products = state
        .store
        .products(&filter)
        .into_iter()
        .map(|p| with_artist(&state, p))
        .collect();
    Json(products)
}

/// POST /api/products
///
/// Artists list new products; listings start with pending trust status.
async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(new_product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let user = require_user(&state.jwt, &headers)?;
    user.require_role(&[Role::Artist])?;

    let product = state
        .store
        .create_product(Product::from_new(new_product, user.id));
    Ok((StatusCode::CREATED, Json(product)))
}
