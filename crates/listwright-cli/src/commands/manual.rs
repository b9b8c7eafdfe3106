//! Manual command implementation.

use crate::cli::ManualArgs;
use crate::error::Result;
use crate::output::Formatter;
use listwright_domain::traits::LlmProvider;
use listwright_optimizer::{export_manual, ListingFields, Optimizer, Targeting};
use std::path::Path;

/// Execute the manual command.
pub async fn execute_manual<L: LlmProvider>(
    args: ManualArgs,
    optimizer: &Optimizer<L>,
    export_dir: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let listing = ListingFields {
        title: args.title,
        bullets: args.bullets,
        description: args.description,
        reviews: args.reviews,
    };
    let targeting = Targeting::from(args.targeting);

    let result = optimizer.optimize(&listing, &targeting).await?;
    println!("{}", formatter.format_manual(&result)?);

    if args.export {
        let path = export_manual(export_dir, result.audit.as_str(), result.rewrite.as_str())?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}
