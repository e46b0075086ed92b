//! HTTP Handlers
//!
//! Thin transport adapters: all checkout semantics live in
//! `shop_core::build_order` and the provider client. The handlers only map
//! errors onto status codes and keep provider detail out of client
//! responses.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use shop_core::{CartLine, build_order};
use shop_payments::PreferenceRequest;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePreferencePayload {
    /// Untrusted cart lines; a missing field counts as an empty cart
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    /// Opaque preference id, handed verbatim to the payment widget
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
    })
}

/// Create a payment preference from an untrusted cart
///
/// Validation is fail-fast and whole-request: the provider is only called
/// once every line has been re-priced from the catalog.
pub async fn create_preference(
    State(state): State<AppState>,
    Json(payload): Json<CreatePreferencePayload>,
) -> Result<Json<PreferenceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order = build_order(&payload.cart, &state.catalog).map_err(|e| {
        tracing::warn!("Cart rejected: {e}");
        let status = if e.is_client_fault() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse { error: e.to_string() }))
    })?;

    let request = PreferenceRequest::new(&order, &state.checkout);

    let preference_id = state
        .provider
        .create_preference(&request)
        .await
        .map_err(|e| {
            // Full provider detail stays server-side
            tracing::error!(provider = state.provider.name(), "Preference creation failed: {e}");
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse { error: e.user_message() }))
        })?;

    Ok(Json(PreferenceResponse {
        id: preference_id.0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use shop_core::{Catalog, Quantity};
    use shop_payments::{CheckoutConfig, MockFailure, MockPreferenceProvider};

    fn test_state(provider: Arc<MockPreferenceProvider>) -> AppState {
        AppState {
            catalog: Arc::new(Catalog::demo()),
            provider,
            checkout: CheckoutConfig::default(),
        }
    }

    fn payload(lines: Vec<CartLine>) -> Json<CreatePreferencePayload> {
        Json(CreatePreferencePayload { cart: lines })
    }

    #[tokio::test]
    async fn test_valid_cart_returns_preference_id() {
        let provider = Arc::new(MockPreferenceProvider::new());
        let state = test_state(provider.clone());

        let response = create_preference(State(state), payload(vec![CartLine::new("1", 2)]))
            .await
            .unwrap();

        assert!(response.0.id.starts_with("mock-"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_400_with_no_provider_call() {
        let provider = Arc::new(MockPreferenceProvider::new());
        let state = test_state(provider.clone());

        let (status, body) =
            create_preference(State(state), payload(vec![CartLine::new("99", 1)]))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0.error.contains("99"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_400_with_no_provider_call() {
        let provider = Arc::new(MockPreferenceProvider::new());
        let state = test_state(provider.clone());

        let line = CartLine {
            id: "1".into(),
            quantity: Quantity::Int(0),
        };
        let (status, body) = create_preference(State(state), payload(vec![line]))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0.error.contains("1"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_cart_is_400() {
        let provider = Arc::new(MockPreferenceProvider::new());
        let state = test_state(provider.clone());

        let (status, _) = create_preference(State(state), payload(vec![]))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_timeout_is_503_without_retry() {
        let provider = Arc::new(MockPreferenceProvider::failing(MockFailure::Unavailable));
        let state = test_state(provider.clone());

        let (status, _) = create_preference(State(state), payload(vec![CartLine::new("1", 1)]))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_is_500_and_sanitized() {
        let provider = Arc::new(MockPreferenceProvider::failing(MockFailure::Auth));
        let state = test_state(provider.clone());

        let (status, body) = create_preference(State(state), payload(vec![CartLine::new("1", 1)]))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.0.error.contains("mock credentials"));
    }

    #[tokio::test]
    async fn test_provider_rejection_carries_detail() {
        let provider = Arc::new(MockPreferenceProvider::failing(MockFailure::Rejected(
            "currency_id not supported".into(),
        )));
        let state = test_state(provider.clone());

        let (status, body) = create_preference(State(state), payload(vec![CartLine::new("2", 1)]))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.0.error.contains("currency_id not supported"));
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(Arc::new(MockPreferenceProvider::new()));
        let response = health_check(State(state)).await;
        assert_eq!(response.0.status, "healthy");
        assert_eq!(response.0.provider, "MockProvider");
    }
}
