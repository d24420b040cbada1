//! SQLite storage implementation

use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use rusqlite::{Connection, params, OptionalExtension};
use crate::Result;
use crate::model::{self, Customer, CustomerSummary, Invoice, InvoiceSummary, UsageRecord};
use super::schema;

/// SQLite-backed storage for customers, usage and invoices.
///
/// The store only remembers where the database lives. Every operation opens
/// its own connection and closes it before returning, so nothing is held
/// between calls.
#[derive(Debug, Clone)]
pub struct BillingStore {
    path: PathBuf,
}

impl BillingStore {
    /// Point at a database file. The file is created on first use.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the three tables if they are missing.
    ///
    /// Statements run independently; a failure part way through leaves the
    /// tables created so far in place.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        tracing::debug!("schema ready at {}", self.path.display());
        Ok(())
    }

    // ========== Customer Operations ==========

    /// Insert a customer and return its new id.
    ///
    /// Blank mobile/address values are stored as NULL.
    pub fn add_customer(&self, name: &str, mobile: Option<&str>, address: Option<&str>) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO customer (name, mobile, address) VALUES (?1, ?2, ?3)",
            params![name, non_blank(mobile), non_blank(address)],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!("customer {} added", id);
        Ok(id)
    }

    /// Get a customer by id
    pub fn get_customer(&self, id: i64) -> Result<Option<Customer>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, name, mobile, address FROM customer WHERE id = ?1",
            [id],
            |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    mobile: row.get(2)?,
                    address: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// All customers in store order
    pub fn list_customers(&self) -> Result<Vec<CustomerSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, mobile FROM customer")?;

        let customers = stmt
            .query_map([], |row| {
                Ok(CustomerSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    mobile: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(customers)
    }

    // ========== Usage Operations ==========

    /// Record usage stamped with today's date, returning the new record id.
    pub fn record_usage(&self, customer_id: i64, units: f64, rate: f64) -> Result<i64> {
        self.record_usage_on(customer_id, units, rate, model::today())
    }

    /// Record usage stamped with an explicit date
    pub fn record_usage_on(&self, customer_id: i64, units: f64, rate: f64, date: NaiveDate) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO usage_record (customer_id, usage_units, unit_rate, usage_date) VALUES (?1, ?2, ?3, ?4)",
            params![customer_id, units, rate, model::format_date(date)],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!("usage {} recorded for customer {}", id, customer_id);
        Ok(id)
    }

    /// Usage records for a customer, oldest first
    pub fn usage_for_customer(&self, customer_id: i64) -> Result<Vec<UsageRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, customer_id, usage_units, unit_rate, usage_date FROM usage_record WHERE customer_id = ?1 ORDER BY id"
        )?;

        let records = stmt
            .query_map([customer_id], |row| {
                Ok(UsageRecord {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    usage_units: row.get(2)?,
                    unit_rate: row.get(3)?,
                    usage_date: date_column(row, 4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Total of `units x rate` over every usage record of the customer.
    ///
    /// All recorded usage counts, including usage already covered by earlier
    /// invoices. A customer without usage owes 0.0.
    pub fn compute_due_amount(&self, customer_id: i64) -> Result<f64> {
        let conn = self.connect()?;
        let total: Option<f64> = conn.query_row(
            "SELECT SUM(usage_units * unit_rate) FROM usage_record WHERE customer_id = ?1",
            [customer_id],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    // ========== Invoice Operations ==========

    /// Create an unpaid invoice dated today and return its id.
    pub fn create_invoice(&self, customer_id: i64, amount: f64) -> Result<i64> {
        self.create_invoice_on(customer_id, amount, model::today())
    }

    /// Create an unpaid invoice with an explicit date
    pub fn create_invoice_on(&self, customer_id: i64, amount: f64, date: NaiveDate) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO invoice (customer_id, invoice_date, amount) VALUES (?1, ?2, ?3)",
            params![customer_id, model::format_date(date), amount],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!("invoice {} created for customer {} ({:.2})", id, customer_id, amount);
        Ok(id)
    }

    /// Get an invoice by id
    pub fn get_invoice(&self, id: i64) -> Result<Option<Invoice>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, customer_id, invoice_date, amount, paid FROM invoice WHERE id = ?1",
            [id],
            |row| {
                Ok(Invoice {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    invoice_date: date_column(row, 2)?,
                    amount: row.get(3)?,
                    paid: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// Set the paid flag. Returns `false` when no invoice has that id.
    pub fn mark_invoice_paid(&self, invoice_id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("UPDATE invoice SET paid = 1 WHERE id = ?1", [invoice_id])?;
        tracing::debug!("mark paid {}: {} row(s)", invoice_id, changed);
        Ok(changed > 0)
    }

    /// All invoices with their customer's name, newest date first.
    ///
    /// Invoices whose customer row is missing are left out by the join.
    pub fn list_invoices(&self) -> Result<Vec<InvoiceSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT i.id, c.name, i.invoice_date, i.amount, i.paid
            FROM invoice i JOIN customer c ON c.id = i.customer_id
            ORDER BY i.invoice_date DESC, i.id
            "#,
        )?;

        let invoices = stmt
            .query_map([], |row| {
                Ok(InvoiceSummary {
                    id: row.get(0)?,
                    customer_name: row.get(1)?,
                    invoice_date: date_column(row, 2)?,
                    amount: row.get(3)?,
                    paid: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(invoices)
    }

    // ========== Statistics ==========

    fn count(conn: &Connection, table: &str) -> Result<usize> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let conn = self.connect()?;
        let unpaid: i64 = conn.query_row("SELECT COUNT(*) FROM invoice WHERE paid = 0", [], |row| row.get(0))?;
        let outstanding: Option<f64> =
            conn.query_row("SELECT SUM(amount) FROM invoice WHERE paid = 0", [], |row| row.get(0))?;
        Ok(DbStats {
            customers: Self::count(&conn, "customer")?,
            usage_records: Self::count(&conn, "usage_record")?,
            invoices: Self::count(&conn, "invoice")?,
            unpaid_invoices: unpaid as usize,
            outstanding: outstanding.unwrap_or(0.0),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read a `YYYY-MM-DD` text column
fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    model::parse_date(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Database statistics
#[derive(Debug, Clone, PartialEq)]
pub struct DbStats {
    pub customers: usize,
    pub usage_records: usize,
    pub invoices: usize,
    pub unpaid_invoices: usize,
    /// Sum of unpaid invoice amounts
    pub outstanding: f64,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Usage records: {}", self.usage_records)?;
        writeln!(f, "  Invoices: {}", self.invoices)?;
        writeln!(f, "  Unpaid invoices: {}", self.unpaid_invoices)?;
        writeln!(f, "  Outstanding: {:.2}", self.outstanding)
    }
}
