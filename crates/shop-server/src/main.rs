//! iPlace Checkout Server
//!
//! Axum-based server exposing the one endpoint that matters: the browser
//! posts an untrusted cart, the server re-prices it against the catalog and
//! creates a Mercado Pago payment preference.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_core::Catalog;
use shop_payments::{CheckoutConfig, MercadoPagoClient};

use crate::handlers::{create_preference, health_check};
use crate::state::AppState;

/// Build the application router
///
/// API routes take precedence; anything else falls through to the static
/// assets (deployed alongside the binary, if any). Root-level `nest_service`
/// panics in axum 0.8, so the assets must be wired as a fallback.
fn build_router(state: AppState, frontend_origin: &str) -> anyhow::Result<Router> {
    // CORS restricted to the known frontend origin
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(health_check))
        .route("/create_preference", post(create_preference))
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Authoritative catalog, immutable from here on
    let catalog = match std::env::var("CATALOG_PATH") {
        Ok(path) => {
            tracing::info!("Loading catalog from {path}");
            Catalog::from_json_file(&path)?
        }
        Err(_) => {
            tracing::info!("CATALOG_PATH not set, using built-in demo catalog");
            Catalog::demo()
        }
    };
    tracing::info!("✓ Catalog loaded ({} products)", catalog.len());

    // Payment provider. The server is the trust boundary for money, so it
    // refuses to start without credentials rather than limping along.
    let provider = MercadoPagoClient::from_env()?;
    tracing::info!("✓ Mercado Pago configured");

    let checkout = CheckoutConfig::from_env();
    if checkout.auto_return {
        tracing::info!("Auto-return enabled (redirect to {} on approval)", checkout.success_url);
    }

    // Build application state
    let state = AppState {
        catalog: Arc::new(catalog),
        provider: Arc::new(provider),
        checkout,
    };

    let frontend_origin =
        std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".into());
    let app = build_router(state, &frontend_origin)?;

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 iPlace checkout server running on http://{addr}");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  POST /create_preference  - Create payment preference");

    axum::serve(listener, app).await?;

    Ok(())
}
