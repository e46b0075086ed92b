//! Product Catalog
//!
//! The server-owned id → name/price mapping. Loaded once at startup and
//! immutable afterwards; it is the only source of trusted prices.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};

/// A single catalog product
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product id, unique across the catalog
    pub id: String,

    /// Display name, also used as the provider-facing title
    pub name: String,

    /// Authoritative unit price
    pub unit_price: Decimal,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
        }
    }
}

/// Immutable product catalog
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, enforcing id uniqueness and positive prices
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            if entry.unit_price <= Decimal::ZERO {
                return Err(OrderError::Config(format!(
                    "Non-positive price for product {}",
                    entry.id
                )));
            }
            if map.insert(entry.id.clone(), entry).is_some() {
                return Err(OrderError::Config("Duplicate product id".into()));
            }
        }
        Ok(Self { entries: map })
    }

    /// Load a catalog from a JSON array of entries
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| OrderError::Config(format!("Cannot read catalog file: {e}")))?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
            .map_err(|e| OrderError::Config(format!("Cannot parse catalog file: {e}")))?;
        Self::from_entries(entries)
    }

    /// Built-in demo catalog matching the storefront's product pages
    pub fn demo() -> Self {
        let entries = vec![
            CatalogEntry::new("1", "iPhone 16 Pro Max", dec!(1299.00)),
            CatalogEntry::new("2", "iPad Pro", dec!(899.00)),
            CatalogEntry::new("3", "Apple Watch Ultra 2", dec!(799.00)),
            CatalogEntry::new("4", "Funda de Silicona", dec!(49.00)),
            CatalogEntry::new("5", "Cargador MagSafe", dec!(39.00)),
        ];
        Self::from_entries(entries).expect("demo catalog is valid")
    }

    /// Look up a product by exact id
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
