//! Trusted Order Construction
//!
//! The trust boundary of the whole system. Takes the untrusted cart lines,
//! re-resolves every price from the catalog, and produces the order that is
//! submitted to the payment provider. Pure function, no I/O, so the
//! transport layer stays a thin adapter around it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::Catalog;
use crate::error::{OrderError, Result};

/// A validated order line, built only from catalog data
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog name of the product
    pub title: String,

    /// Authoritative unit price from the catalog
    pub unit_price: Decimal,

    /// Validated quantity
    pub quantity: u32,
}

impl OrderLine {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A fully validated order with its trusted total
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Lines in the order the client supplied them
    pub lines: Vec<OrderLine>,

    /// Server-computed total
    pub total: Decimal,
}

/// Validate an untrusted cart against the catalog and build a trusted order
///
/// Fail-fast, whole-request: the first invalid line aborts the entire
/// order. Lines are never skipped or repriced silently.
pub fn build_order(lines: &[CartLine], catalog: &Catalog) -> Result<Order> {
    if lines.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let mut order_lines = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;

    for line in lines {
        let quantity = line
            .quantity
            .as_positive_int()
            .ok_or_else(|| OrderError::InvalidQuantity(line.id.clone()))?;

        // Unknown id means the client's cart is out of sync with the
        // catalog. Hard stop, not a skip.
        let entry = catalog
            .get(&line.id)
            .ok_or_else(|| OrderError::UnknownProduct(line.id.clone()))?;

        total += entry.unit_price * Decimal::from(quantity);
        order_lines.push(OrderLine {
            title: entry.name.clone(),
            unit_price: entry.unit_price,
            quantity,
        });
    }

    if total <= Decimal::ZERO {
        return Err(OrderError::NonPositiveTotal);
    }

    tracing::debug!(lines = order_lines.len(), %total, "Order validated");

    Ok(Order {
        lines: order_lines,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_comes_from_catalog() {
        // Two iPhones at the catalog price of 1299.00
        let catalog = Catalog::demo();
        let lines = vec![CartLine::new("1", 2)];

        let order = build_order(&lines, &catalog).unwrap();
        assert_eq!(order.total, dec!(2598.00));
        assert_eq!(
            order.lines,
            vec![OrderLine {
                title: "iPhone 16 Pro Max".into(),
                unit_price: dec!(1299.00),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_lines_preserve_input_order() {
        let catalog = Catalog::demo();
        let lines = vec![
            CartLine::new("3", 1),
            CartLine::new("1", 1),
            CartLine::new("5", 4),
        ];

        let order = build_order(&lines, &catalog).unwrap();
        let titles: Vec<&str> = order.lines.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Apple Watch Ultra 2", "iPhone 16 Pro Max", "Cargador MagSafe"]
        );
        assert_eq!(order.total, dec!(799.00) + dec!(1299.00) + dec!(39.00) * dec!(4));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let catalog = Catalog::demo();
        assert_eq!(build_order(&[], &catalog), Err(OrderError::EmptyCart));
    }

    #[test]
    fn test_unknown_product_aborts_whole_order() {
        let catalog = Catalog::demo();
        let lines = vec![CartLine::new("1", 1), CartLine::new("99", 1)];

        assert_eq!(
            build_order(&lines, &catalog),
            Err(OrderError::UnknownProduct("99".into()))
        );
    }

    #[test]
    fn test_invalid_quantity_aborts_whole_order() {
        let catalog = Catalog::demo();

        for quantity in [
            crate::cart::Quantity::Int(0),
            crate::cart::Quantity::Int(-2),
            crate::cart::Quantity::Float(1.5),
            crate::cart::Quantity::Text("many".into()),
        ] {
            let lines = vec![CartLine {
                id: "1".into(),
                quantity,
            }];
            assert_eq!(
                build_order(&lines, &catalog),
                Err(OrderError::InvalidQuantity("1".into()))
            );
        }
    }

    #[test]
    fn test_validation_is_checked_before_lookup() {
        // A line that is both unknown and has a bad quantity reports the
        // quantity problem, matching the per-line validation order.
        let catalog = Catalog::demo();
        let lines = vec![CartLine {
            id: "99".into(),
            quantity: crate::cart::Quantity::Int(0),
        }];
        assert_eq!(
            build_order(&lines, &catalog),
            Err(OrderError::InvalidQuantity("99".into()))
        );
    }

    #[test]
    fn test_idempotent_totals() {
        let catalog = Catalog::demo();
        let lines = vec![CartLine::new("2", 3), CartLine::new("4", 1)];

        let first = build_order(&lines, &catalog).unwrap();
        let second = build_order(&lines, &catalog).unwrap();
        assert_eq!(first.total, second.total);
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            title: "iPad Pro".into(),
            unit_price: dec!(899.00),
            quantity: 3,
        };
        assert_eq!(line.line_total(), dec!(2697.00));
    }

    #[test]
    fn test_tiny_catalog() {
        let catalog = Catalog::from_entries(vec![CatalogEntry::new("x", "Thing", dec!(0.01))])
            .unwrap();
        let order = build_order(&[CartLine::new("x", 1)], &catalog).unwrap();
        assert_eq!(order.total, dec!(0.01));
    }
}
