use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_catalog::Product;
use stockroom_core::{DomainError, DomainResult, EmployeeId, Entity, OrderId, ProductId, UnitPrice};

use crate::employee::Employee;

/// A replenishment order: stock received for one product.
///
/// `unit_price_snapshot` and `total_price` are frozen at creation; repricing
/// the product later does not touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishmentOrder {
    id: OrderId,
    product_id: ProductId,
    employee_id: EmployeeId,
    quantity: i64,
    unit_price_snapshot: UnitPrice,
    total_price: Decimal,
    date: DateTime<Utc>,
}

impl ReplenishmentOrder {
    /// Build an order for `quantity` units of `product` at its current price.
    pub fn place(
        id: OrderId,
        product: &Product,
        employee: &Employee,
        quantity: i64,
        date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "order quantity must be greater than zero (got {quantity})"
            )));
        }
        let unit_price_snapshot = product.unit_price();
        let total_price = unit_price_snapshot.total_for(quantity)?;
        Ok(Self {
            id,
            product_id: product.id_typed(),
            employee_id: employee.id,
            quantity,
            unit_price_snapshot,
            total_price,
            date,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price_snapshot(&self) -> UnitPrice {
        self.unit_price_snapshot
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Entity for ReplenishmentOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn coffee() -> Product {
        Product::new(ProductId::new(), "Coffee", "Beverages", Decimal::from_str("12.99").unwrap())
            .unwrap()
    }

    fn clerk() -> Employee {
        Employee {
            id: EmployeeId::new(),
            name: "Dana".to_string(),
        }
    }

    #[test]
    fn total_is_exact() {
        let order = ReplenishmentOrder::place(OrderId::new(), &coffee(), &clerk(), 5, Utc::now()).unwrap();
        assert_eq!(order.total_price(), Decimal::from_str("64.95").unwrap());
        assert_eq!(order.unit_price_snapshot().amount(), Decimal::from_str("12.99").unwrap());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        for qty in [0, -1] {
            let err = ReplenishmentOrder::place(OrderId::new(), &coffee(), &clerk(), qty, Utc::now())
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn snapshot_survives_repricing() {
        let product = coffee();
        let order = ReplenishmentOrder::place(OrderId::new(), &product, &clerk(), 2, Utc::now()).unwrap();
        let repriced = product.with_unit_price(Decimal::from(20)).unwrap();
        let later = ReplenishmentOrder::place(OrderId::new(), &repriced, &clerk(), 2, Utc::now()).unwrap();

        assert_eq!(order.unit_price_snapshot().amount(), Decimal::from_str("12.99").unwrap());
        assert_eq!(order.total_price(), Decimal::from_str("25.98").unwrap());
        assert_eq!(later.total_price(), Decimal::from(40));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the total is always snapshot price times quantity.
            #[test]
            fn total_is_price_times_quantity(cents in 1i64..100_000, qty in 1i64..10_000) {
                let product = Product::new(
                    ProductId::new(),
                    "Coffee",
                    "Beverages",
                    Decimal::new(cents, 2),
                )
                .unwrap();
                let order =
                    ReplenishmentOrder::place(OrderId::new(), &product, &clerk(), qty, Utc::now()).unwrap();
                prop_assert_eq!(order.total_price(), Decimal::new(cents, 2) * Decimal::from(qty));
                prop_assert_eq!(order.quantity(), qty);
            }
        }
    }
}
