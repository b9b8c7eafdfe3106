//! Batch mode: many identifiers, one shared targeting context
//!
//! Lines are processed strictly in order, one fetch and at most two
//! generation calls per line. A failing line becomes an inline error block
//! and the run moves on, so N non-empty lines always yield N blocks.

use crate::error::OptimizerError;
use crate::optimizer::Optimizer;
use crate::types::{AuditResult, ListingFields, RewriteResult, Targeting};
use listwright_domain::traits::{ListingSource, LlmProvider};
use listwright_domain::{resolve, ListingRecord};
use std::fmt;
use std::time::Instant;
use tracing::{info, warn};

/// Shown instead of a report when the input holds no identifiers
pub const EMPTY_BATCH_MESSAGE: &str = "⚠️ No ASINs or URLs provided. Please add one per line.";

/// Where a batch line failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureStage {
    /// The line is neither a bare ASIN nor a product URL
    Resolve,
    /// The listing source could not deliver the listing
    Fetch {
        /// Display name of the source
        source: String,
    },
    /// The audit or rewrite call failed
    Generate,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Resolve => f.write_str("Could not read identifier"),
            FailureStage::Fetch { source } => write!(f, "Error fetching from {}", source),
            FailureStage::Generate => f.write_str("Error generating copy"),
        }
    }
}

/// Result of processing one batch line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Fetched, audited and rewritten
    Optimized {
        /// The listing as fetched
        listing: ListingRecord,
        /// Audit pass output
        audit: AuditResult,
        /// Rewrite pass output
        rewrite: RewriteResult,
    },
    /// Stopped at `stage`
    Failed {
        /// Pipeline stage that failed
        stage: FailureStage,
        /// Error text
        message: String,
    },
}

/// One input line and what became of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// The trimmed input line
    pub line: String,
    /// Outcome for the line
    pub outcome: ItemOutcome,
}

impl BatchItem {
    /// True when the line produced copy
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Optimized { .. })
    }

    /// Render this item as one Markdown block
    pub fn render(&self) -> String {
        match &self.outcome {
            ItemOutcome::Optimized {
                listing,
                audit,
                rewrite,
            } => {
                let bullets = listing.bullets_text();
                format!(
                    "## {line}  _(ASIN: {asin})_\n\n\
                     ### 🧾 Original Title\n{title}\n\n\
                     ### 📌 Original Bullets\n{bullets}\n\n\
                     ### 📝 Original Description\n{description}\n\n\
                     ---\n\n\
                     ### 🔍 AI Audit\n{audit}\n\n\
                     ---\n\n\
                     ### ✏️ Optimized Listing\n{rewrite}\n\n\
                     ---",
                    line = self.line,
                    asin = listing.asin(),
                    title = or_placeholder(listing.title(), "_(no title found)_"),
                    bullets = or_placeholder(&bullets, "_(no bullets found)_"),
                    description =
                        or_placeholder(listing.description(), "_(no description found)_"),
                    audit = audit,
                    rewrite = rewrite,
                )
            }
            ItemOutcome::Failed { stage, message } => {
                format!("## {}\n\n❌ {}: `{}`\n\n---", self.line, stage, message)
            }
        }
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

/// Ordered outcomes of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    items: Vec<BatchItem>,
}

impl BatchReport {
    /// Items in input order
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Number of processed lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the input held no identifiers
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines that produced copy
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    /// Lines that failed at any stage
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Markdown report, one block per line, blocks separated by a blank line
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_BATCH_MESSAGE.to_string();
        }

        self.items
            .iter()
            .map(BatchItem::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<L> Optimizer<L>
where
    L: LlmProvider,
{
    /// Resolve, fetch, audit and rewrite every non-empty line of `input`
    pub async fn run_batch(
        &self,
        source: &dyn ListingSource,
        input: &str,
        targeting: &Targeting,
    ) -> BatchReport {
        // CR-only line endings count as line breaks too
        let lines: Vec<&str> = input
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            info!("Batch input holds no identifiers");
            return BatchReport::default();
        }

        let start = Instant::now();
        info!("Starting batch of {} lines from {}", lines.len(), source.name());

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let outcome = self.process_line(source, line, targeting).await;
            if let ItemOutcome::Failed { stage, message } = &outcome {
                warn!(line = %line, stage = %stage, "Batch item failed: {}", message);
            }
            items.push(BatchItem {
                line: line.to_string(),
                outcome,
            });
        }

        let report = BatchReport { items };
        info!(
            "Batch complete: {} succeeded, {} failed in {} ms",
            report.succeeded(),
            report.failed(),
            start.elapsed().as_millis()
        );
        report
    }

    async fn process_line(
        &self,
        source: &dyn ListingSource,
        line: &str,
        targeting: &Targeting,
    ) -> ItemOutcome {
        let asin = match resolve(line) {
            Ok(asin) => asin,
            Err(e) => {
                return ItemOutcome::Failed {
                    stage: FailureStage::Resolve,
                    message: e.to_string(),
                }
            }
        };

        let listing = match source.fetch(&asin).await {
            Ok(listing) => listing,
            Err(e) => {
                return ItemOutcome::Failed {
                    stage: FailureStage::Fetch {
                        source: source.name().to_string(),
                    },
                    message: e.to_string(),
                }
            }
        };

        match self.generate_for(&listing, targeting).await {
            Ok((audit, rewrite)) => ItemOutcome::Optimized {
                listing,
                audit,
                rewrite,
            },
            Err(e) => ItemOutcome::Failed {
                stage: FailureStage::Generate,
                message: e.to_string(),
            },
        }
    }

    async fn generate_for(
        &self,
        listing: &ListingRecord,
        targeting: &Targeting,
    ) -> Result<(AuditResult, RewriteResult), OptimizerError> {
        let fields = ListingFields::from(listing);
        let audit = self.audit(&fields, targeting).await?;
        let rewrite = self.rewrite(&fields, targeting, &audit).await?;
        Ok((audit, rewrite))
    }
}
