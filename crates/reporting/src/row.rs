use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_catalog::Product;

/// One line of the stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub is_low_stock: bool,
}

impl ReportRow {
    /// Low stock is strictly below the threshold.
    pub fn new(product: &Product, quantity: i64, low_stock_threshold: i64) -> Self {
        Self {
            name: product.name().to_string(),
            category: product.category().to_string(),
            unit_price: product.unit_price().amount(),
            quantity,
            is_low_stock: quantity < low_stock_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductId;

    fn tea() -> Product {
        Product::new(ProductId::new(), "Tea", "Beverages", Decimal::new(350, 2)).unwrap()
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!ReportRow::new(&tea(), 5, 5).is_low_stock);
        assert!(ReportRow::new(&tea(), 4, 5).is_low_stock);
    }

    #[test]
    fn zero_threshold_flags_nothing() {
        assert!(!ReportRow::new(&tea(), 0, 0).is_low_stock);
    }

    #[test]
    fn copies_product_fields() {
        let row = ReportRow::new(&tea(), 12, 5);
        assert_eq!(row.name, "Tea");
        assert_eq!(row.category, "Beverages");
        assert_eq!(row.unit_price, Decimal::new(350, 2));
        assert_eq!(row.quantity, 12);
    }
}
