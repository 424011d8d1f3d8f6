//! Artisan Alley Server - marketplace API
//!
//! This crate provides the REST API server for the Artisan Alley handcraft
//! marketplace: catalog, cart/checkout, role-based admin operations and the
//! product authenticity verification workflow.

pub mod auth;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
