//! # Telebill - Telecom Billing Console
//!
//! Single-tenant billing over a SQLite store.
//!
//! Telebill provides:
//! - Customer records with optional contact details
//! - Usage records priced at a flat unit rate
//! - Due amount aggregation (sum of units x rate per customer)
//! - Invoice snapshots with a paid flag
//! - An interactive numbered menu driving all of the above

pub mod model;
pub mod storage;
pub mod console;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use model::{Customer, CustomerSummary, Invoice, InvoiceSummary, UsageRecord};
pub use storage::BillingStore;
pub use console::{Console, MenuChoice};

/// Result type alias for Telebill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Telebill operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid date: {0}")]
    Date(String),
}
