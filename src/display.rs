use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::table::Table;

/// Output format for list-style console commands.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayStyle {
    /// Formatted table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Types that can be rendered as a table row in the console.
pub trait TerminalDisplay {
    fn table_titles() -> Vec<&'static str>;
    fn table_row(self) -> Vec<String>;
}

pub fn pretty_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}

pub fn display_list<T>(items: Vec<T>, style: DisplayStyle) -> Result<()>
where
    T: Serialize + TerminalDisplay,
{
    match style {
        DisplayStyle::Table => {
            if items.is_empty() {
                println!("<empty list>");
                return Ok(());
            }

            let mut table = Table::with_capacity(items.len() + 1);
            let titles = T::table_titles();
            table.add(titles.iter().map(|s| s.to_string()).collect());
            for item in items {
                table.add(item.table_row());
            }
            table.show();
        }
        DisplayStyle::Json => pretty_json(items)?,
    }

    Ok(())
}
