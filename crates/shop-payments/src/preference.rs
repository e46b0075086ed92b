//! Preference Wire Format
//!
//! The provider-facing representation of a trusted order, plus the checkout
//! configuration that used to live as ambient globals (redirect URLs,
//! return mode, currency). Built fresh per request, never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shop_core::Order;

/// Checkout configuration, constructed once at startup
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Redirect target after a successful payment
    pub success_url: String,

    /// Redirect target after a failed payment
    pub failure_url: String,

    /// Redirect target while the payment is pending
    pub pending_url: String,

    /// Auto-return to `success_url` on approval, vs. a manual redirect.
    /// The hosted payment widget requires manual mode, so this defaults
    /// to off.
    pub auto_return: bool,

    /// ISO currency code for every item
    pub currency: String,

    /// Optional provider notification URL; we never consume notifications,
    /// the provider just needs somewhere to send them
    pub notification_url: Option<String>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            success_url: "http://localhost:8080/success".into(),
            failure_url: "http://localhost:8080/failure".into(),
            pending_url: "http://localhost:8080/pending".into(),
            auto_return: false,
            currency: "USD".into(),
            notification_url: None,
        }
    }
}

impl CheckoutConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            success_url: std::env::var("CHECKOUT_SUCCESS_URL").unwrap_or(defaults.success_url),
            failure_url: std::env::var("CHECKOUT_FAILURE_URL").unwrap_or(defaults.failure_url),
            pending_url: std::env::var("CHECKOUT_PENDING_URL").unwrap_or(defaults.pending_url),
            auto_return: std::env::var("CHECKOUT_AUTO_RETURN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auto_return),
            currency: std::env::var("CHECKOUT_CURRENCY").unwrap_or(defaults.currency),
            notification_url: std::env::var("MP_NOTIFICATION_URL").ok(),
        }
    }
}

/// Opaque preference handle returned by the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceId(pub String);

impl std::fmt::Display for PreferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One provider-facing order item
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreferenceItem {
    pub title: String,

    /// Trusted unit price, two-decimal precision, serialized as a JSON
    /// number (the provider rejects string amounts)
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    pub quantity: u32,

    pub currency_id: String,

    /// Required by the provider; we reuse the title
    pub description: String,
}

/// Redirect targets the provider sends the payer back to
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// Full create-preference request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,

    pub back_urls: BackUrls,

    /// `"approved"` when auto-return is configured, omitted otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_return: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
}

impl PreferenceRequest {
    /// Build the provider request from a trusted order
    pub fn new(order: &Order, config: &CheckoutConfig) -> Self {
        let items = order
            .lines
            .iter()
            .map(|line| PreferenceItem {
                title: line.title.clone(),
                unit_price: line.unit_price.round_dp(2),
                quantity: line.quantity,
                currency_id: config.currency.clone(),
                description: line.title.clone(),
            })
            .collect();

        Self {
            items,
            back_urls: BackUrls {
                success: config.success_url.clone(),
                failure: config.failure_url.clone(),
                pending: config.pending_url.clone(),
            },
            auto_return: config.auto_return.then(|| "approved".into()),
            notification_url: config.notification_url.clone(),
        }
    }

    /// Sum of line totals, used for logging only; the provider recomputes
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum()
    }
}
