//! alley-server - standalone REST server for Artisan Alley.
//!
//! Reads config from env vars:
//!   ALLEY_JWT_SECRET - JWT HMAC secret (required outside dev)
//!   ALLEY_BIND_ADDR  - listen address (default: 0.0.0.0:4000)
//!   OPENAI_API_KEY   - enables live story generation (optional)

use alley_server::{create_router, seed, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,alley_server=debug".into()),
        )
        .init();

    let jwt_secret = std::env::var("ALLEY_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("ALLEY_JWT_SECRET not set, using an insecure dev secret");
        "dev-secret-change-me".to_string()
    });
    let bind_addr = std::env::var("ALLEY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4000".into());

    let state = AppState::new(jwt_secret.as_bytes());
    seed::seed(&state.store);

    let app = create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
