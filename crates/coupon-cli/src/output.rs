//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        match serde_json::to_value(first)? {
            serde_json::Value::Object(map) => {
                if let Some(value) = map.get("value") {
                    println!("{}", value.as_str().map_or_else(|| value.to_string(), str::to_string));
                } else {
                    println!("{}", serde_json::Value::Object(map));
                }
            }
            other => println!("{}", other),
        }
    }
    Ok(())
}

/// Rounds half away from zero to `places` decimals.
///
/// Falls back to plain float formatting for values `Decimal` cannot hold
/// (non-finite or beyond ~7.9e28).
pub fn format_amount(value: f64, places: u32) -> String {
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.prec$}", rounded, prec = places as usize)
        }
        None => format!("{:.prec$}", value, prec = places as usize),
    }
}

/// Formats a decimal rate (0.05) as a percentage ("5.0000%").
pub fn format_percent(rate: f64, places: u32) -> String {
    format!("{}%", format_amount(rate * 100.0, places))
}

/// Formats a small quantity such as a step or residual in scientific notation.
pub fn format_scientific(value: f64) -> String {
    format!("{:.3e}", value)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from an amount rounded to `places` decimals.
    pub fn amount(key: impl Into<String>, value: f64, places: u32) -> Self {
        Self::new(key, format_amount(value, places))
    }

    /// Creates a key-value pair formatted as a percentage.
    pub fn percent(key: impl Into<String>, rate: f64, places: u32) -> Self {
        Self::new(key, format_percent(rate, places))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}
