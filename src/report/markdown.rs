//! Markdown report generation
//!
//! Renders a lookup report as a human-readable markdown document for the
//! command-line lookup mode.

use crate::report::{PriceReport, ReportStatistics};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown rendering of a report to a file
pub fn write_markdown_report(report: &PriceReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &PriceReport) -> String {
    let stats = ReportStatistics::from_report(report);
    let mut md = String::new();

    md.push_str(&format!("# Best price for \"{}\"\n\n", report.product));

    match report.best.as_ref().and_then(|b| b.price.map(|p| (b, p))) {
        Some((best, price)) => {
            md.push_str(&format!("**{}** at <{}>\n\n", format_price(price), best.url));
        }
        None => md.push_str("No price could be extracted from any listing.\n\n"),
    }

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Links Found**: {}\n", report.found_links));
    md.push_str(&format!(
        "- **Priced**: {} ({:.0}%)\n",
        stats.priced,
        stats.hit_rate()
    ));
    md.push_str(&format!("- **Failed**: {}\n", stats.failed));
    md.push_str(&format!("- **No Price Detected**: {}\n", stats.unpriced));
    if let Some(spread) = stats.spread() {
        md.push_str(&format!("- **Price Spread**: {}\n", format_price(spread)));
    }
    md.push('\n');

    md.push_str("## Listings\n\n");
    md.push_str("| # | URL | Price | Error |\n");
    md.push_str("|---|-----|-------|-------|\n");
    for (i, observation) in report.all.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            observation.url,
            observation.price.map(format_price).unwrap_or_else(|| "-".to_string()),
            observation
                .error
                .as_deref()
                .map(escape_cell)
                .unwrap_or_else(|| "-".to_string())
        ));
    }

    md
}

/// Formats an amount with the currency symbol and at most two decimals
fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("₹{:.0}", value)
    } else {
        format!("₹{:.2}", value)
    }
}

/// Keeps error text from breaking the table layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
