//! Cart Lines
//!
//! The untrusted client-side cart shapes. The browser keeps a full display
//! cart in local storage; the only thing it may submit to the server is the
//! minimal `{id, quantity}` pair. Prices never cross this boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Local storage key holding the JSON-encoded cart
pub const CART_STORAGE_KEY: &str = "cart";

/// Local storage key holding the last client-computed display total
pub const CHECKOUT_TOTAL_STORAGE_KEY: &str = "checkoutTotal";

/// A single untrusted cart line as submitted by the client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id, resolved against the server catalog
    pub id: String,

    /// Requested quantity, validated server-side
    pub quantity: Quantity,
}

impl CartLine {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity: Quantity::Int(i64::from(quantity)),
        }
    }
}

/// Raw quantity as it arrives off the wire
///
/// Browsers have historically sent integers, floats, and numeric strings for
/// this field, so we accept all three shapes and validate strictly: only
/// integral values greater than zero pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Quantity {
    /// Validate as a positive integer, rejecting everything else
    pub fn as_positive_int(&self) -> Option<u32> {
        match self {
            Quantity::Int(n) if *n > 0 => u32::try_from(*n).ok(),
            Quantity::Float(f) if *f > 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX) => {
                Some(*f as u32)
            }
            Quantity::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok()),
            _ => None,
        }
    }
}

/// Browser-held cart item under [`CART_STORAGE_KEY`]
///
/// Display-only state. The price, name, and image fields exist purely for
/// rendering and must never reach the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredCartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

/// Build the server-facing checkout request from the stored cart
///
/// Strips every display field so the server's catalog lookup is the sole
/// source of price.
pub fn checkout_lines(stored: &[StoredCartItem]) -> Vec<CartLine> {
    stored
        .iter()
        .map(|item| CartLine::new(item.id.clone(), item.quantity))
        .collect()
}

/// Client-displayed subtotal for the stored cart (untrusted, display only)
pub fn display_subtotal(stored: &[StoredCartItem]) -> Decimal {
    stored
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum()
}
