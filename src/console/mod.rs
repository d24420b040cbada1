//! Interactive Console - numbered menu over the billing store
//!
//! The console reads one line per prompt from its input, dispatches on the
//! menu key and returns to the menu after every action. Store failures are
//! reported where they happen and the action falls back to its neutral
//! outcome; malformed numbers abort the current action and are reported by
//! the menu loop. Only choice `0` or the end of input ends the session.

pub mod menu;

pub use menu::MenuChoice;

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use crate::storage::BillingStore;
use crate::{ui, Error, Result};

/// Menu-driven session bound to explicit input, output and error streams.
pub struct Console<R, W, E> {
    store: BillingStore,
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(store: BillingStore, input: R, out: W, err: E) -> Self {
        Self { store, input, out, err }
    }

    /// Give back the output and error streams
    pub fn into_streams(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Run the menu loop until exit is chosen or input runs out.
    ///
    /// Only failures of the console streams themselves end the loop early.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(Error::Parse(_)) => {
                    writeln!(self.out, "{}", ui::error("Invalid choice"))?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let choice = match MenuChoice::from_str(&line) {
                Ok(MenuChoice::Exit) => break,
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.out, "{}", ui::error("Invalid choice"))?;
                    continue;
                }
            };

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(Error::Io(e)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("{} aborted: {}", choice.label(), e);
                    writeln!(self.err, "{}", ui::error(&format!("Error: {}", e)))?;
                }
            }
        }

        writeln!(self.out, "Bye")?;
        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::InitDatabase => self.init_database(),
            MenuChoice::AddCustomer => self.add_customer(),
            MenuChoice::RecordUsage => self.record_usage(),
            MenuChoice::GenerateInvoice => self.generate_invoice(),
            MenuChoice::ListCustomers => self.list_customers(),
            MenuChoice::ListInvoices => self.list_invoices(),
            MenuChoice::MarkInvoicePaid => self.mark_invoice_paid(),
            MenuChoice::ShowStats => self.show_stats(),
            MenuChoice::Exit => Ok(()),
        }
    }

    // ========== Menu Actions ==========

    /// Create missing tables; also callable before the loop starts.
    pub fn init_database(&mut self) -> Result<()> {
        match self.store.init_schema() {
            Ok(()) => {
                let msg = format!("Database initialized ({}).", self.store.path().display());
                writeln!(self.out, "{}", ui::success(&msg))?;
            }
            Err(e) => self.report("DB init", &e)?,
        }
        Ok(())
    }

    fn add_customer(&mut self) -> Result<()> {
        let name = self.ask("Name")?;
        let mobile = self.ask("Mobile")?;
        let address = self.ask("Address")?;

        match self.store.add_customer(&name, Some(&mobile), Some(&address)) {
            Ok(id) => writeln!(self.out, "{}", ui::success(&format!("Customer added. ID = {}", id)))?,
            Err(e) => {
                self.report("addCustomer", &e)?;
                writeln!(self.out, "{}", ui::error("Failed to add customer."))?;
            }
        }
        Ok(())
    }

    fn record_usage(&mut self) -> Result<()> {
        let customer_id: i64 = self.ask_number("Customer ID", "customer id")?;
        let units: f64 = self.ask_number("Usage units (e.g., minutes/MB)", "usage units")?;
        let rate: f64 = self.ask_number("Unit rate (per unit)", "unit rate")?;

        match self.store.record_usage(customer_id, units, rate) {
            Ok(_) => writeln!(self.out, "{}", ui::success("Usage recorded."))?,
            Err(e) => self.report("recordUsage", &e)?,
        }
        Ok(())
    }

    /// Compute the due amount, then create an invoice after a `y` answer.
    fn generate_invoice(&mut self) -> Result<()> {
        let customer_id: i64 = self.ask_number("Customer ID to invoice", "customer id")?;

        let due = match self.store.compute_due_amount(customer_id) {
            Ok(due) => due,
            Err(e) => {
                self.report("computeDueAmount", &e)?;
                0.0
            }
        };
        writeln!(self.out, "{}", ui::info("Total due", &ui::amount(due)))?;

        if due <= 0.0 {
            writeln!(self.out, "{}", ui::notice("No due amount, aborting."))?;
            return Ok(());
        }

        let answer = self.ask("Create invoice? (y/n)")?;
        if answer.trim().eq_ignore_ascii_case("y") {
            match self.store.create_invoice(customer_id, due) {
                Ok(id) => writeln!(self.out, "{}", ui::success(&format!("Invoice created. ID: {}", id)))?,
                Err(e) => self.report("createInvoice", &e)?,
            }
        } else {
            writeln!(self.out, "{}", ui::notice("Cancelled."))?;
        }
        Ok(())
    }

    fn list_customers(&mut self) -> Result<()> {
        match self.store.list_customers() {
            Ok(customers) => {
                writeln!(self.out, "{} Customers:", ui::Icons::PERSON)?;
                if customers.is_empty() {
                    writeln!(self.out, "{} No customers.", ui::Icons::EMPTY)?;
                } else {
                    writeln!(self.out, "{}", ui::customers_table(&customers))?;
                }
            }
            Err(e) => self.report("listCustomers", &e)?,
        }
        Ok(())
    }

    fn list_invoices(&mut self) -> Result<()> {
        match self.store.list_invoices() {
            Ok(invoices) => {
                writeln!(self.out, "{} Invoices:", ui::Icons::INVOICE)?;
                if invoices.is_empty() {
                    writeln!(self.out, "{} No invoices.", ui::Icons::EMPTY)?;
                } else {
                    writeln!(self.out, "{}", ui::invoices_table(&invoices))?;
                }
            }
            Err(e) => self.report("listInvoices", &e)?,
        }
        Ok(())
    }

    fn mark_invoice_paid(&mut self) -> Result<()> {
        let invoice_id: i64 = self.ask_number("Invoice ID to mark paid", "invoice id")?;

        match self.store.mark_invoice_paid(invoice_id) {
            Ok(true) => writeln!(self.out, "{}", ui::success("Invoice marked paid."))?,
            Ok(false) => {
                let msg = format!("No invoice with ID {}; nothing changed.", invoice_id);
                writeln!(self.out, "{}", ui::notice(&msg))?;
            }
            Err(e) => self.report("markInvoicePaid", &e)?,
        }
        Ok(())
    }

    fn show_stats(&mut self) -> Result<()> {
        match self.store.stats() {
            Ok(stats) => {
                writeln!(
                    self.out,
                    "{} Statistics ({} {})",
                    ui::Icons::STATS,
                    ui::Icons::DATABASE,
                    self.store.path().display()
                )?;
                writeln!(self.out, "{}", ui::stats_table(&stats))?;
            }
            Err(e) => self.report("stats", &e)?,
        }
        Ok(())
    }

    // ========== Prompting ==========

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", ui::header("--- Telecom Billing System ---"))?;
        for choice in MenuChoice::all() {
            writeln!(self.out, "{}", ui::menu_item(choice.key(), choice.label()))?;
        }
        write!(self.out, "{}", ui::prompt("Choose"))?;
        self.out.flush()?;
        Ok(())
    }

    /// Next input line without its line terminator; `None` at end of input.
    ///
    /// The whole line is consumed even when it is not valid UTF-8, which is
    /// reported as a parse error.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8(buf)
            .map_err(|_| Error::Parse("input is not valid UTF-8".to_string()))?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{}", ui::prompt(label))?;
        self.out.flush()?;
        self.read_line()?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input closed at prompt").into()
        })
    }

    fn ask_number<T: FromStr>(&mut self, label: &str, what: &str) -> Result<T> {
        let text = self.ask(label)?;
        parse_number(&text, what)
    }

    /// Report a store failure on the error stream.
    fn report(&mut self, operation: &str, e: &Error) -> Result<()> {
        tracing::error!("{} failed: {}", operation, e);
        writeln!(self.err, "{}", ui::error(&format!("{} error: {}", operation, e)))?;
        Ok(())
    }
}

/// Parse a trimmed numeric field.
pub fn parse_number<T: FromStr>(text: &str, what: &str) -> Result<T> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| Error::Parse(format!("invalid {}: '{}'", what, trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> BillingStore {
        BillingStore::open(dir.path().join("billing.db"))
    }

    fn session(store: &BillingStore, input: &str) -> (String, String) {
        let mut console = Console::new(
            store.clone(),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Vec::new(),
        );
        console.run().unwrap();
        let (out, err) = console.into_streams();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn ready_store(dir: &TempDir) -> BillingStore {
        let store = store_in(dir);
        store.init_schema().unwrap();
        store
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<i64>(" 42 ", "customer id").unwrap(), 42);
        assert_eq!(parse_number::<f64>("0.1", "unit rate").unwrap(), 0.1);
        let err = parse_number::<i64>("abc", "customer id").unwrap_err();
        assert!(err.to_string().contains("invalid customer id: 'abc'"));
    }

    #[test]
    fn test_exit_ends_session() {
        let dir = TempDir::new().unwrap();
        let (out, err) = session(&store_in(&dir), "0\n");
        assert!(out.contains("Telecom Billing System"));
        assert!(out.contains("Bye"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let dir = TempDir::new().unwrap();
        let (out, _) = session(&store_in(&dir), "");
        assert!(out.contains("Bye"));

        let (out, _) = session(&ready_store(&dir), "2\nAlice\n");
        assert!(out.contains("Bye"));
        assert!(!out.contains("Customer added"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let dir = TempDir::new().unwrap();
        let (out, _) = session(&store_in(&dir), "9\nhello\n0\n");
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert_eq!(out.matches("Telecom Billing System").count(), 3);
    }

    #[test]
    fn test_init_database_twice() {
        let dir = TempDir::new().unwrap();
        let (out, err) = session(&store_in(&dir), "1\n1\n0\n");
        assert_eq!(out.matches("Database initialized").count(), 2);
        assert!(err.is_empty());
    }

    #[test]
    fn test_add_customer_before_init_reports_failure() {
        let dir = TempDir::new().unwrap();
        let (out, err) = session(&store_in(&dir), "2\nAlice\n\n\n0\n");
        assert!(out.contains("Failed to add customer."));
        assert!(err.contains("addCustomer error"));
        assert!(out.contains("Bye"));
    }

    #[test]
    fn test_bad_number_keeps_loop_running() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        let (out, err) = session(&store, "3\nabc\n5\n0\n");
        assert!(err.contains("invalid customer id: 'abc'"));
        assert!(out.contains("Customers:"));
        assert_eq!(store.stats().unwrap().usage_records, 0);
    }

    #[test]
    fn test_zero_due_aborts_without_prompt() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        store.add_customer("Alice", None, None).unwrap();

        let (out, _) = session(&store, "4\n1\n0\n");
        assert!(out.contains("0.00"));
        assert!(out.contains("No due amount, aborting."));
        assert!(!out.contains("Create invoice?"));
        assert!(store.list_invoices().unwrap().is_empty());
    }

    #[test]
    fn test_declined_invoice_is_cancelled() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        let id = store.add_customer("Alice", None, None).unwrap();
        store.record_usage(id, 10.0, 2.5).unwrap();
        store.record_usage(id, 4.0, 1.0).unwrap();

        let (out, _) = session(&store, "4\n1\nmaybe\n0\n");
        assert!(out.contains("29.00"));
        assert!(out.contains("Cancelled."));
        assert_eq!(store.stats().unwrap().invoices, 0);
    }

    #[test]
    fn test_invalid_utf8_input_keeps_loop_running() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        let mut console = Console::new(
            store.clone(),
            Cursor::new(b"2\nAl\xffce\n\n\n5\n\xfe\n0\n".to_vec()),
            Vec::new(),
            Vec::new(),
        );
        console.run().unwrap();
        let (out, err) = console.into_streams();
        let (out, err) = (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap());

        assert!(err.contains("input is not valid UTF-8"));
        assert!(out.contains("Customers:"));
        assert!(out.contains("Bye"));
        assert_eq!(store.stats().unwrap().customers, 0);
    }

    #[test]
    fn test_init_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let store = BillingStore::open(dir.path());
        let (out, err) = session(&store, "1\n0\n");
        assert!(err.contains("DB init error"));
        assert!(!out.contains("Database initialized"));
        assert!(out.contains("Bye"));
    }

    #[test]
    fn test_due_failure_falls_back_to_zero() {
        let dir = TempDir::new().unwrap();
        let (out, err) = session(&store_in(&dir), "4\n1\n0\n");
        assert!(err.contains("computeDueAmount error"));
        assert!(out.contains("0.00"));
        assert!(out.contains("No due amount, aborting."));
        assert!(!out.contains("Create invoice?"));
        assert!(out.contains("Bye"));
    }

    #[test]
    fn test_mark_unknown_invoice_is_informational() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        let (out, err) = session(&store, "7\n42\n0\n");
        assert!(out.contains("No invoice with ID 42; nothing changed."));
        assert!(err.is_empty());
    }

    #[test]
    fn test_listings() {
        let dir = TempDir::new().unwrap();
        let store = ready_store(&dir);
        let (out, _) = session(&store, "5\n6\n0\n");
        assert!(out.contains("No customers."));
        assert!(out.contains("No invoices."));

        let id = store.add_customer("Alice", Some("555-1111"), None).unwrap();
        store.create_invoice(id, 10.0).unwrap();
        let (out, _) = session(&store, "5\n6\n8\n0\n");
        assert!(out.contains("555-1111"));
        assert!(out.contains("10.00"));
        assert!(out.contains("Outstanding"));
    }

    #[test]
    fn test_end_to_end_billing_cycle() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let input = "1\n2\nAlice\n555-1111\n1 Main St\n3\n1\n100\n0.1\n4\n1\nY\n7\n1\n0\n";

        let (out, err) = session(&store, input);
        assert!(err.is_empty(), "unexpected errors: {}", err);
        assert!(out.contains("Customer added. ID = 1"));
        assert!(out.contains("Usage recorded."));
        assert!(out.contains("10.00"));
        assert!(out.contains("Invoice created. ID: 1"));
        assert!(out.contains("Invoice marked paid."));

        let customer = store.get_customer(1).unwrap().unwrap();
        assert_eq!(customer.address.as_deref(), Some("1 Main St"));
        let invoice = store.get_invoice(1).unwrap().unwrap();
        assert!((invoice.amount - 10.0).abs() < 1e-9);
        assert!(invoice.paid);
    }
}
