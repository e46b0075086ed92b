//! # shop-payments
//!
//! Mercado Pago preference creation for the iPlace shop.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐   trusted Order    ┌──────────────────┐   opaque id   ┌──────────────┐
//! │  shop-core  │ ─────────────────▶ │ PreferenceRequest │ ────────────▶ │ hosted       │
//! │  validation │                    │ → Mercado Pago    │               │ payment      │
//! └─────────────┘                    │   /checkout/      │               │ widget       │
//!                                    │   preferences     │               │ (browser)    │
//!                                    └──────────────────┘               └──────────────┘
//! ```
//!
//! The provider call is the only suspension point in a checkout request:
//! one bounded attempt, no internal retry (a retried submission must be a
//! fresh client request, or we would mint duplicate preferences).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_payments::{CheckoutConfig, MercadoPagoClient, PreferenceProvider, PreferenceRequest};
//!
//! let client = MercadoPagoClient::from_env()?;
//! let request = PreferenceRequest::new(&order, &CheckoutConfig::from_env());
//! let preference_id = client.create_preference(&request).await?;
//! // Hand preference_id to the browser; the widget takes it from there.
//! ```

mod error;
mod mercadopago;
mod preference;
mod provider;

pub use error::{PaymentError, Result};
pub use mercadopago::{MercadoPagoClient, MercadoPagoConfig};
pub use preference::{BackUrls, CheckoutConfig, PreferenceId, PreferenceItem, PreferenceRequest};
pub use provider::{MockFailure, MockPreferenceProvider, PreferenceProvider};
