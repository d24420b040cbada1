//! Line formatting for console messages.
//!
//! Helpers return the styled line instead of printing so the console can
//! route it to whichever stream it owns.

use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) -> String {
    format!("{} {}", Icons::PHONE, text.style(theme().header.clone()))
}

pub fn menu_item(key: &str, label: &str) -> String {
    format!("{}) {}", key.style(theme().info.clone()), label)
}

pub fn prompt(label: &str) -> String {
    format!("{}: ", label.style(theme().dim.clone()))
}

pub fn success(label: &str) -> String {
    format!("{} {}", Icons::CHECK, label.style(theme().success.clone()))
}

pub fn error(label: &str) -> String {
    format!("{} {}", Icons::CROSS, label.style(theme().error.clone()))
}

/// Informational outcome that is not a failure (no-ops, cancellations).
pub fn notice(label: &str) -> String {
    format!("{} {}", Icons::INFO.style(theme().info.clone()), label)
}

pub fn info(label: &str, value: &str) -> String {
    format!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    )
}

/// Money with two decimals, in the amount style.
pub fn amount(value: f64) -> String {
    format!("{:.2}", value).style(theme().amount.clone()).to_string()
}
