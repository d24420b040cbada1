pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{amount, error, header, info, menu_item, notice, prompt, success};
pub use table::{customers_table, invoices_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
