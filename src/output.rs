//! Rendering of search results for the terminal.

use shop_scraper::{ProductRecord, SearchResult};

use crate::config::OutputFormat;
use crate::error::{AppError, Result};

/// Records ordered by ascending price, then name.
pub fn sorted(results: &SearchResult) -> Vec<&ProductRecord> {
    let mut records: Vec<&ProductRecord> = results.iter().collect();
    records.sort_by(|a, b| a.price().cmp(&b.price()).then_with(|| a.name().cmp(b.name())));
    records
}

/// Render `results` in the requested format.
///
/// # Errors
///
/// Returns [`AppError::Config`] if JSON serialization fails.
pub fn render(results: &SearchResult, format: OutputFormat) -> Result<String> {
    let records = sorted(results);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)
            .map(|json| json + "\n")
            .map_err(|e| AppError::Config(format!("cannot serialize results: {e}"))),
        OutputFormat::Table => Ok(render_table(&records)),
    }
}

fn render_table(records: &[&ProductRecord]) -> String {
    if records.is_empty() {
        return "no products found\n".to_owned();
    }

    let prices: Vec<String> = records.iter().map(|r| format!("${}", r.price())).collect();
    let width = prices.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (record, price) in records.iter().zip(&prices) {
        out.push_str(&format!("{price:>width$}  {}\n", record.name()));
    }
    out
}
