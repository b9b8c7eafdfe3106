//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::error::Result;
use crate::output::Formatter;
use listwright_domain::traits::{ListingSource, LlmProvider};
use listwright_optimizer::{export_batch, Optimizer, Targeting};
use std::io::Read;
use std::path::Path;

/// Execute the batch command.
///
/// Per-line failures are part of the report, not an error exit.
pub async fn execute_batch<L: LlmProvider>(
    args: BatchArgs,
    optimizer: &Optimizer<L>,
    source: &dyn ListingSource,
    export_dir: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let targeting = Targeting::from(args.targeting);

    let report = optimizer.run_batch(source, &input, &targeting).await;
    println!("{}", formatter.format_batch(&report)?);

    if report.is_empty() {
        return Ok(());
    }
    eprintln!("{}", formatter.batch_summary(&report));

    if args.export {
        let path = export_batch(export_dir, &report.render())?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}
