use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::row::FilterRow;

/// Date format accepted by the date criteria.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw filter input, one optional text value per filter field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCriteria {
    pub name: Option<String>,
    pub min_quantity: Option<String>,
    pub min_price: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub employee: Option<String>,
}

impl RowCriteria {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn min_quantity(mut self, value: impl Into<String>) -> Self {
        self.min_quantity = Some(value.into());
        self
    }

    pub fn min_price(mut self, value: impl Into<String>) -> Self {
        self.min_price = Some(value.into());
        self
    }

    pub fn min_date(mut self, value: impl Into<String>) -> Self {
        self.min_date = Some(value.into());
        self
    }

    pub fn max_date(mut self, value: impl Into<String>) -> Self {
        self.max_date = Some(value.into());
        self
    }

    pub fn employee(mut self, value: impl Into<String>) -> Self {
        self.employee = Some(value.into());
        self
    }
}

/// Why a criterion could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDiagnostic {
    pub field: &'static str,
    pub input: String,
    pub reason: String,
}

impl core::fmt::Display for FilterDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} filter {:?} ignored rows: {}", self.field, self.input, self.reason)
    }
}

/// A single parsed predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Case-insensitive match on the row's name.
    NameEquals(String),
    MinQuantity(i64),
    MinPrice(Decimal),
    MinDate(NaiveDate),
    MaxDate(NaiveDate),
    /// Case-insensitive match on the row's employee.
    EmployeeEquals(String),
    /// Input that failed to parse; matches no row.
    Unsatisfiable(FilterDiagnostic),
}

impl Criterion {
    /// A row without the targeted column does not match.
    pub fn matches<R: FilterRow + ?Sized>(&self, row: &R) -> bool {
        match self {
            Criterion::NameEquals(name) => row.name().is_some_and(|n| same_text(n, name)),
            Criterion::MinQuantity(min) => row.quantity().is_some_and(|q| q >= *min),
            Criterion::MinPrice(min) => row.price().is_some_and(|p| p >= *min),
            Criterion::MinDate(min) => row.date().is_some_and(|d| d >= *min),
            Criterion::MaxDate(max) => row.date().is_some_and(|d| d <= *max),
            Criterion::EmployeeEquals(emp) => row.employee().is_some_and(|e| same_text(e, emp)),
            Criterion::Unsatisfiable(_) => false,
        }
    }
}

/// Conjunction of the non-blank criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    criteria: Vec<Criterion>,
}

impl RowFilter {
    /// Parse `input`. Never fails: malformed values become [`Criterion::Unsatisfiable`]
    /// and are reported through [`RowFilter::diagnostics`].
    pub fn from_criteria(input: &RowCriteria) -> Self {
        let mut criteria = Vec::new();

        if let Some(name) = non_blank(&input.name) {
            criteria.push(Criterion::NameEquals(name.to_string()));
        }
        if let Some(raw) = non_blank(&input.min_quantity) {
            criteria.push(parse("min_quantity", raw, i64::from_str, Criterion::MinQuantity));
        }
        if let Some(raw) = non_blank(&input.min_price) {
            criteria.push(parse("min_price", raw, Decimal::from_str, Criterion::MinPrice));
        }
        if let Some(raw) = non_blank(&input.min_date) {
            criteria.push(parse("min_date", raw, parse_date, Criterion::MinDate));
        }
        if let Some(raw) = non_blank(&input.max_date) {
            criteria.push(parse("max_date", raw, parse_date, Criterion::MaxDate));
        }
        if let Some(emp) = non_blank(&input.employee) {
            criteria.push(Criterion::EmployeeEquals(emp.to_string()));
        }

        let filter = Self { criteria };
        for diagnostic in filter.diagnostics() {
            warn!(field = diagnostic.field, input = %diagnostic.input, reason = %diagnostic.reason, "malformed row filter");
        }
        filter
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// True when no criterion was supplied.
    pub fn is_pass_through(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &FilterDiagnostic> {
        self.criteria.iter().filter_map(|c| match c {
            Criterion::Unsatisfiable(d) => Some(d),
            _ => None,
        })
    }

    pub fn matches<R: FilterRow + ?Sized>(&self, row: &R) -> bool {
        self.criteria.iter().all(|c| c.matches(row))
    }

    /// Rows satisfying every criterion, in input order.
    pub fn apply<'a, R: FilterRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter().filter(|r| self.matches(*r)).collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
}

fn parse<T, E: core::fmt::Display>(
    field: &'static str,
    raw: &str,
    parser: impl Fn(&str) -> Result<T, E>,
    build: impl Fn(T) -> Criterion,
) -> Criterion {
    match parser(raw) {
        Ok(value) => build(value),
        Err(e) => Criterion::Unsatisfiable(FilterDiagnostic {
            field,
            input: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{OrderRow, StockRow};

    fn stock(name: &str, quantity: i64, price: &str) -> StockRow {
        StockRow {
            name: name.to_string(),
            category: "Beverages".to_string(),
            unit_price: Decimal::from_str(price).unwrap(),
            quantity,
        }
    }

    fn order(product: &str, employee: &str, quantity: i64, date: &str) -> OrderRow {
        OrderRow {
            product_name: product.to_string(),
            employee_name: employee.to_string(),
            quantity,
            total_price: Decimal::from(quantity) * Decimal::from_str("2.50").unwrap(),
            date: parse_date(date).unwrap(),
        }
    }

    fn stock_rows() -> Vec<StockRow> {
        vec![stock("Coffee", 8, "12.99"), stock("Tea", 2, "3.50"), stock("Cocoa", 15, "6.00")]
    }

    fn names<R: FilterRow>(rows: Vec<&R>) -> Vec<String> {
        rows.iter().map(|r| r.name().unwrap_or_default().to_string()).collect()
    }

    #[test]
    fn no_criteria_passes_everything() {
        let filter = RowFilter::from_criteria(&RowCriteria::default());
        assert!(filter.is_pass_through());
        assert_eq!(filter.apply(&stock_rows()).len(), 3);
    }

    #[test]
    fn blank_criteria_are_ignored() {
        let input = RowCriteria::default().name("  ").min_quantity("").min_date("   ");
        let filter = RowFilter::from_criteria(&input);
        assert!(filter.is_pass_through());
    }

    #[test]
    fn criteria_are_conjunctive() {
        let input = RowCriteria::default().min_quantity("5").min_price("10");
        let rows = stock_rows();
        let filtered = RowFilter::from_criteria(&input).apply(&rows);
        assert_eq!(names(filtered), vec!["Coffee"]);
    }

    #[test]
    fn minimums_are_inclusive() {
        let rows = stock_rows();
        let filtered = RowFilter::from_criteria(&RowCriteria::default().min_quantity("8")).apply(&rows);
        assert_eq!(names(filtered), vec!["Coffee", "Cocoa"]);
    }

    #[test]
    fn name_match_ignores_case_and_padding() {
        let rows = stock_rows();
        let filtered = RowFilter::from_criteria(&RowCriteria::default().name(" coffee ")).apply(&rows);
        assert_eq!(names(filtered), vec!["Coffee"]);
    }

    #[test]
    fn unparsable_quantity_excludes_all_rows() {
        let filter = RowFilter::from_criteria(&RowCriteria::default().min_quantity("abc"));
        assert!(filter.apply(&stock_rows()).is_empty());

        let diagnostics: Vec<_> = filter.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, "min_quantity");
        assert_eq!(diagnostics[0].input, "abc");
    }

    #[test]
    fn unparsable_price_and_date_are_diagnosed() {
        let input = RowCriteria::default().min_price("12,99").min_date("09/03/2024");
        let filter = RowFilter::from_criteria(&input);
        let fields: Vec<_> = filter.diagnostics().map(|d| d.field).collect();
        assert_eq!(fields, vec!["min_price", "min_date"]);
    }

    #[test]
    fn date_range_and_employee_filter_orders() {
        let rows = vec![
            order("Coffee", "Dana", 5, "2024-03-01"),
            order("Coffee", "Lee", 3, "2024-03-10"),
            order("Tea", "Dana", 4, "2024-03-20"),
        ];
        let input = RowCriteria::default()
            .min_date("2024-03-05")
            .max_date("2024-03-31")
            .employee("dana");
        let filtered = RowFilter::from_criteria(&input).apply(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_name, "Tea");
    }

    #[test]
    fn date_criterion_excludes_rows_without_dates() {
        let rows = stock_rows();
        let filtered = RowFilter::from_criteria(&RowCriteria::default().min_date("2024-01-01")).apply(&rows);
        assert!(filtered.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: filtering never panics and never invents rows.
            #[test]
            fn filter_is_a_subset(
                name in proptest::option::of(".{0,8}"),
                min_quantity in proptest::option::of(".{0,6}"),
                min_price in proptest::option::of(".{0,6}"),
            ) {
                let input = RowCriteria { name, min_quantity, min_price, ..RowCriteria::default() };
                let rows = stock_rows();
                let filtered = RowFilter::from_criteria(&input).apply(&rows);
                prop_assert!(filtered.len() <= rows.len());
                for row in filtered {
                    prop_assert!(rows.contains(row));
                }
            }
        }
    }
}
