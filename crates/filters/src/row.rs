use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields a table row exposes to filtering. `None` means the row has no such column.
pub trait FilterRow {
    fn name(&self) -> Option<&str>;
    fn quantity(&self) -> Option<i64>;
    fn price(&self) -> Option<Decimal>;

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    fn employee(&self) -> Option<&str> {
        None
    }
}

/// A line of the stock table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl FilterRow for StockRow {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn quantity(&self) -> Option<i64> {
        Some(self.quantity)
    }

    fn price(&self) -> Option<Decimal> {
        Some(self.unit_price)
    }
}

/// A line of the replenishment order history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    pub product_name: String,
    pub employee_name: String,
    pub quantity: i64,
    pub total_price: Decimal,
    pub date: NaiveDate,
}

impl FilterRow for OrderRow {
    fn name(&self) -> Option<&str> {
        Some(&self.product_name)
    }

    fn quantity(&self) -> Option<i64> {
        Some(self.quantity)
    }

    fn price(&self) -> Option<Decimal> {
        Some(self.total_price)
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn employee(&self) -> Option<&str> {
        Some(&self.employee_name)
    }
}
