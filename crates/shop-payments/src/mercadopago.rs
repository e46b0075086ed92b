//! Mercado Pago Client
//!
//! Thin HTTP client for `POST /checkout/preferences`. One request in, one
//! opaque preference id (or a mapped error) out.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{PaymentError, Result};
use crate::preference::{PreferenceId, PreferenceRequest};
use crate::provider::PreferenceProvider;

const DEFAULT_BASE_URL: &str = "https://api.mercadopago.com";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Mercado Pago client configuration
#[derive(Clone, Debug)]
pub struct MercadoPagoConfig {
    /// Access token (the `TEST-...` / `APP_USR-...` secret)
    pub access_token: String,

    /// API base URL, overridable for testing
    pub base_url: String,

    /// Bound on the single outbound call; past this the provider is
    /// reported unavailable
    pub timeout_secs: u64,
}

impl MercadoPagoConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("MP_ACCESS_TOKEN")
            .map_err(|_| PaymentError::Config("MP_ACCESS_TOKEN not set".into()))?;

        let base_url = std::env::var("MP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout_secs = std::env::var("MP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            access_token,
            base_url,
            timeout_secs,
        })
    }
}

/// Successful create-preference response; everything else in the body is
/// irrelevant to us
#[derive(Debug, Deserialize)]
struct CreatePreferenceResponse {
    id: String,
}

/// Provider error body shape (best effort; Mercado Pago is not consistent)
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Mercado Pago preference client
pub struct MercadoPagoClient {
    http: reqwest::Client,
    config: MercadoPagoConfig,
}

impl MercadoPagoClient {
    /// Create a client with a bounded request timeout
    pub fn new(config: MercadoPagoConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Config(format!("Cannot build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(MercadoPagoConfig::from_env()?)
    }
}

#[async_trait]
impl PreferenceProvider for MercadoPagoClient {
    async fn create_preference(&self, request: &PreferenceRequest) -> Result<PreferenceId> {
        let url = format!("{}/checkout/preferences", self.config.base_url);

        tracing::debug!(items = request.items.len(), total = %request.total(), "Submitting preference");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: CreatePreferenceResponse = response
                .json()
                .await
                .map_err(|e| PaymentError::MalformedResponse(e.to_string()))?;

            tracing::info!(preference_id = %body.id, "Preference created");
            return Ok(PreferenceId(body.id));
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_failure(status.as_u16(), &body))
    }

    fn name(&self) -> &str {
        "MercadoPago"
    }
}

/// Map a non-2xx provider response onto the error taxonomy
fn map_failure(status: u16, body: &str) -> PaymentError {
    let detail = serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status {
        401 | 403 => PaymentError::Auth(detail),
        500..=599 => PaymentError::Unavailable(detail),
        _ => PaymentError::Rejected(detail),
    }
}
