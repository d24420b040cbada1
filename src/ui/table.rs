use crate::model::{format_date, CustomerSummary, InvoiceSummary};
use crate::storage::DbStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "Invoice")]
    id: i64,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid")]
    paid: &'static str,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &DbStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Customers", &stats.customers.to_string());
    builder.add_row("Usage records", &stats.usage_records.to_string());
    builder.add_row("Invoices", &stats.invoices.to_string());
    builder.add_row("Unpaid invoices", &stats.unpaid_invoices.to_string());
    builder.add_row("Outstanding", &format!("{:.2}", stats.outstanding));
    builder.build()
}

pub fn customers_table(customers: &[CustomerSummary]) -> String {
    let rows: Vec<CustomerRow> = customers
        .iter()
        .map(|c| CustomerRow {
            id: c.id,
            name: c.name.clone(),
            mobile: c.mobile.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn invoices_table(invoices: &[InvoiceSummary]) -> String {
    let rows: Vec<InvoiceRow> = invoices
        .iter()
        .map(|i| InvoiceRow {
            id: i.id,
            customer: i.customer_name.clone(),
            date: format_date(i.invoice_date),
            amount: format!("{:.2}", i.amount),
            paid: if i.paid { "Yes" } else { "No" },
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_invoices_table_contains_rows() {
        let invoices = vec![InvoiceSummary {
            id: 7,
            customer_name: "Alice".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            amount: 10.0,
            paid: true,
        }];
        let table = invoices_table(&invoices);
        assert!(table.contains("Alice"));
        assert!(table.contains("2024-05-01"));
        assert!(table.contains("10.00"));
        assert!(table.contains("Yes"));
    }

    #[test]
    fn test_empty_builder_renders_nothing() {
        assert!(TableBuilder::new().build().is_empty());
    }
}
