//! Application State

use std::sync::Arc;

use shop_core::Catalog;
use shop_payments::{CheckoutConfig, PreferenceProvider};

/// Shared application state
///
/// Everything here is immutable after startup, so concurrent requests need
/// no locking.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative product catalog
    pub catalog: Arc<Catalog>,

    /// Payment provider (Mercado Pago in production, mock in tests)
    pub provider: Arc<dyn PreferenceProvider>,

    /// Redirect URLs, return mode, and currency for every preference
    pub checkout: CheckoutConfig,
}
