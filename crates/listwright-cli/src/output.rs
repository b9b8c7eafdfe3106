//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use listwright_domain::{Asin, ListingRecord, ResolveError};
use listwright_optimizer::{BatchReport, ManualResult, AUDIT_MARKER, REWRITE_MARKER};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format identifier resolutions, in input order.
    pub fn format_resolutions(
        &self,
        results: &[(String, std::result::Result<Asin, ResolveError>)],
    ) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let json: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(input, result)| match result {
                        Ok(asin) => serde_json::json!({ "input": input, "asin": asin }),
                        Err(e) => serde_json::json!({ "input": input, "error": e.to_string() }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            CliFormat::Text => {
                let mut builder = Builder::default();
                builder.push_record(["Input", "ASIN"]);

                for (input, result) in results {
                    let asin = match result {
                        Ok(asin) => self.colorize(asin.as_str(), "green"),
                        Err(_) => self.colorize("not found", "red"),
                    };
                    builder.push_record([input.as_str(), asin.as_str()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Format a fetched listing.
    pub fn format_listing(&self, source: &str, listing: &ListingRecord) -> Result<String> {
        if self.format == CliFormat::Json {
            return Ok(serde_json::to_string_pretty(listing)?);
        }

        let mut out = self.heading(&format!("{} (from {})", listing.asin(), source));
        out.push_str("\n\n");
        out.push_str(&self.heading("Title"));
        out.push('\n');
        out.push_str(placeholder(listing.title(), "(no title found)"));
        out.push_str("\n\n");
        out.push_str(&self.heading("Bullets"));
        out.push('\n');
        out.push_str(placeholder(&listing.bullets_text(), "(no bullets found)"));
        out.push_str("\n\n");
        out.push_str(&self.heading("Description"));
        out.push('\n');
        out.push_str(placeholder(listing.description(), "(no description found)"));
        Ok(out)
    }

    /// Format the audit and rewrite of a manual run.
    pub fn format_manual(&self, result: &ManualResult) -> Result<String> {
        if self.format == CliFormat::Json {
            return Ok(serde_json::to_string_pretty(result)?);
        }

        Ok(format!(
            "{}\n\n{}\n\n{}\n\n{}",
            self.heading(AUDIT_MARKER),
            result.audit,
            self.heading(REWRITE_MARKER),
            result.rewrite
        ))
    }

    /// Format a batch report.
    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        if self.format == CliFormat::Json {
            let items: Vec<serde_json::Value> = report
                .items()
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "line": item.line,
                        "success": item.is_success(),
                        "block": item.render(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "succeeded": report.succeeded(),
                "failed": report.failed(),
                "items": items,
            }))?);
        }

        Ok(report.render())
    }

    /// Format a batch summary line.
    pub fn batch_summary(&self, report: &BatchReport) -> String {
        let msg = format!(
            "{} line(s): {} optimized, {} failed",
            report.len(),
            report.succeeded(),
            report.failed()
        );
        if report.failed() == 0 {
            self.success(&msg)
        } else {
            self.warning(&msg)
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn placeholder<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() {
        fallback
    } else {
        text
    }
}
