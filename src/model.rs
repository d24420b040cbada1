//! Billing entities
//!
//! Three row types back the store:
//! - `Customer`: who is billed
//! - `UsageRecord`: metered units at a flat rate, immutable once written
//! - `Invoice`: a snapshot of the due amount with a paid flag
//!
//! Listings use the narrower `CustomerSummary` and `InvoiceSummary` shapes.

use crate::{Error, Result};
use chrono::{Local, NaiveDate};

/// Calendar dates are persisted as ISO-8601 text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::Date(format!("{}: {}", s, e)))
}

/// Render a date the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A billed customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Store-assigned surrogate key
    pub id: i64,
    pub name: String,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// One metered usage entry for a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub id: i64,
    pub customer_id: i64,
    /// Metered quantity (minutes, MB, ...)
    pub usage_units: f64,
    /// Price per unit
    pub unit_rate: f64,
    pub usage_date: NaiveDate,
}

impl UsageRecord {
    /// Charge contributed by this record.
    pub fn charge(&self) -> f64 {
        self.usage_units * self.unit_rate
    }
}

/// Sum of `units x rate` over a set of usage records; 0.0 when empty.
pub fn due_amount(records: &[UsageRecord]) -> f64 {
    records.iter().map(UsageRecord::charge).sum()
}

/// An invoice row.
///
/// `amount` is captured when the invoice is created and is never recomputed,
/// so usage recorded later does not change it.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i64,
    pub customer_id: i64,
    pub invoice_date: NaiveDate,
    pub amount: f64,
    pub paid: bool,
}

/// Customer as shown in the customer listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    pub mobile: Option<String>,
}

/// Invoice joined with the owning customer's name.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub id: i64,
    pub customer_name: String,
    pub invoice_date: NaiveDate,
    pub amount: f64,
    pub paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(units: f64, rate: f64) -> UsageRecord {
        UsageRecord {
            id: 0,
            customer_id: 1,
            usage_units: units,
            unit_rate: rate,
            usage_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_due_amount_sums_products() {
        let records = vec![usage(10.0, 2.5), usage(4.0, 1.0)];
        assert_eq!(due_amount(&records), 29.0);
    }

    #[test]
    fn test_due_amount_empty_is_zero() {
        assert_eq!(due_amount(&[]), 0.0);
    }

    #[test]
    fn test_date_roundtrip_format() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("29/02/2024").is_err());
    }
}
