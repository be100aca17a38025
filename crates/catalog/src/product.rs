use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, Entity, Label, ProductId, UnitPrice};

/// A catalog product.
///
/// Fields are private and only reachable through validated constructors, so a
/// `Product` value always satisfies the catalog's validation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: Label,
    category: Label,
    unit_price: UnitPrice,
}

impl Product {
    /// Validate raw input and build a product with the given identity.
    pub fn new(id: ProductId, name: &str, category: &str, unit_price: Decimal) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: Label::parse("name", name)?,
            category: Label::parse("category", category)?,
            unit_price: UnitPrice::new(unit_price)?,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    /// Same product at a new price.
    pub fn with_unit_price(&self, unit_price: Decimal) -> DomainResult<Self> {
        Ok(Self {
            unit_price: UnitPrice::new(unit_price)?,
            ..self.clone()
        })
    }

    /// True when the product's category is one of `categories`.
    ///
    /// An empty selection matches every product.
    pub fn in_categories<'a, I>(&self, categories: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut any = false;
        for category in categories {
            any = true;
            if category.trim() == self.category() {
                return true;
            }
        }
        !any
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use std::collections::BTreeSet;
    use stockroom_core::DomainError;

    fn coffee() -> Product {
        Product::new(ProductId::new(), "Coffee", "Beverages", Decimal::from_str("12.99").unwrap())
            .unwrap()
    }

    #[test]
    fn new_rejects_invalid_fields() {
        let id = ProductId::new();
        let price = Decimal::ONE;

        assert!(matches!(
            Product::new(id, "", "Beverages", price),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Product::new(id, "Coffee", "Bev3rages", price),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Product::new(id, "Coffee", "Beverages", Decimal::ZERO),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn with_unit_price_keeps_identity() {
        let product = coffee();
        let repriced = product.with_unit_price(Decimal::from(14)).unwrap();
        assert_eq!(repriced.id_typed(), product.id_typed());
        assert_eq!(repriced.name(), "Coffee");
        assert_eq!(repriced.unit_price().amount(), Decimal::from(14));
    }

    #[test]
    fn empty_category_selection_matches_everything() {
        let product = coffee();
        let none: BTreeSet<String> = BTreeSet::new();
        assert!(product.in_categories(&none));
    }

    #[test]
    fn category_selection_is_membership() {
        let product = coffee();
        let snacks: BTreeSet<String> = ["Snacks".to_string()].into();
        let both: BTreeSet<String> = ["Snacks".to_string(), "Beverages".to_string()].into();
        assert!(!product.in_categories(&snacks));
        assert!(product.in_categories(&both));
    }
}
