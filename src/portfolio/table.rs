use std::fmt::Write;

use super::PortfolioReport;
use crate::clock::format_local;
use crate::config::DisplayConfig;
use crate::format::{format_decimal, format_optional, NO_VALUE};

/// Render the report as a plain-text table.
///
/// Text columns are left-aligned and numeric columns right-aligned.
pub fn render_table(report: &PortfolioReport, display: &DisplayConfig) -> String {
    let quote = &report.quote_currency;
    let headers = [
        "Time".to_string(),
        "Symbol".to_string(),
        "Amount".to_string(),
        format!("Price ({quote})"),
        "Exchange".to_string(),
        format!("Total Value ({quote})"),
    ];
    let numeric = [false, false, true, true, false, true];

    let cells: Vec<[String; 6]> = report
        .rows
        .iter()
        .map(|row| {
            [
                format_local(row.timestamp),
                row.symbol.clone(),
                format_optional(row.amount, display),
                format_optional(row.price, display),
                row.source.clone().unwrap_or_else(|| NO_VALUE.to_string()),
                format_decimal(row.value, display),
            ]
        })
        .collect();

    let mut widths = headers.clone().map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |fields: &[String; 6]| {
        let line: Vec<String> = fields
            .iter()
            .zip(widths.iter().zip(numeric))
            .map(|(field, (&width, right))| {
                if right {
                    format!("{field:>width$}")
                } else {
                    format!("{field:<width$}")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    };

    push_line(&headers);
    for row in &cells {
        push_line(row);
    }
    out
}
