//! # shop-core
//!
//! Catalog and trusted order construction for the iPlace shop.
//!
//! ## Trust boundary
//!
//! The browser owns display state only. The server owns prices. Everything
//! the client submits is re-validated here before money is involved:
//!
//! ```text
//! ┌──────────────┐   {id, quantity}   ┌────────────────┐
//! │  Browser     │ ─────────────────▶ │  build_order   │──▶ trusted Order
//! │  cart (local │    never price,    │  (catalog      │    (provider-ready
//! │  storage)    │    name, currency  │   lookup)      │     lines + total)
//! └──────────────┘                    └────────────────┘
//! ```
//!
//! - **Fail-fast, whole-request** - one bad line rejects the entire cart
//! - **No silent repricing** - unknown ids are a hard stop, never a skip
//! - **Pure core** - [`build_order`] does no I/O, so it unit-tests without
//!   a network layer

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;

pub use cart::{CartLine, Quantity, StoredCartItem, checkout_lines, display_subtotal};
pub use cart::{CART_STORAGE_KEY, CHECKOUT_TOTAL_STORAGE_KEY};
pub use catalog::{Catalog, CatalogEntry};
pub use error::{OrderError, Result};
pub use order::{Order, OrderLine, build_order};
