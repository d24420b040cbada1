//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customer(id, name, mobile, address)
//! - usage_record(id, customer_id, usage_units, unit_rate, usage_date)
//! - invoice(id, customer_id, invoice_date, amount, paid)

pub mod schema;
pub mod sqlite;

pub use sqlite::{BillingStore, DbStats};
