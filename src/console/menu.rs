//! Menu choices for the interactive console

use crate::{Error, Result};
use std::str::FromStr;

/// One entry of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    InitDatabase,
    AddCustomer,
    RecordUsage,
    GenerateInvoice,
    ListCustomers,
    ListInvoices,
    MarkInvoicePaid,
    ShowStats,
    Exit,
}

impl MenuChoice {
    /// Key typed at the prompt
    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::InitDatabase => "1",
            MenuChoice::AddCustomer => "2",
            MenuChoice::RecordUsage => "3",
            MenuChoice::GenerateInvoice => "4",
            MenuChoice::ListCustomers => "5",
            MenuChoice::ListInvoices => "6",
            MenuChoice::MarkInvoicePaid => "7",
            MenuChoice::ShowStats => "8",
            MenuChoice::Exit => "0",
        }
    }

    /// Text shown next to the key
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::InitDatabase => "Initialize DB (create tables)",
            MenuChoice::AddCustomer => "Add Customer",
            MenuChoice::RecordUsage => "Record Usage (customer)",
            MenuChoice::GenerateInvoice => "Compute Due & Generate Invoice",
            MenuChoice::ListCustomers => "List Customers",
            MenuChoice::ListInvoices => "List Invoices",
            MenuChoice::MarkInvoicePaid => "Mark Invoice Paid",
            MenuChoice::ShowStats => "Database Statistics",
            MenuChoice::Exit => "Exit",
        }
    }

    /// All choices in display order, exit last
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::InitDatabase,
            MenuChoice::AddCustomer,
            MenuChoice::RecordUsage,
            MenuChoice::GenerateInvoice,
            MenuChoice::ListCustomers,
            MenuChoice::ListInvoices,
            MenuChoice::MarkInvoicePaid,
            MenuChoice::ShowStats,
            MenuChoice::Exit,
        ]
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        MenuChoice::all()
            .iter()
            .copied()
            .find(|choice| choice.key() == key)
            .ok_or_else(|| Error::Parse(format!("unknown menu choice: '{}'", key)))
    }
}
