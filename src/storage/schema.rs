//! Database schema definitions

/// SQL to create the customer table
pub const CREATE_CUSTOMER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    mobile TEXT,
    address TEXT
)
"#;

/// SQL to create the usage_record table
/// One row per metered usage entry, priced at a flat unit rate
pub const CREATE_USAGE_RECORD_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS usage_record (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER,
    usage_units REAL,
    unit_rate REAL,
    usage_date TEXT,
    FOREIGN KEY(customer_id) REFERENCES customer(id)
)
"#;

/// SQL to create the invoice table
pub const CREATE_INVOICE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS invoice (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER,
    invoice_date TEXT,
    amount REAL,
    paid INTEGER DEFAULT 0,
    FOREIGN KEY(customer_id) REFERENCES customer(id)
)
"#;

/// All schema creation statements, in execution order
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_CUSTOMER_TABLE,
        CREATE_USAGE_RECORD_TABLE,
        CREATE_INVOICE_TABLE,
    ]
}
