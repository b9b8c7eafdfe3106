//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::error::Result;
use crate::output::Formatter;
use listwright_domain::resolve;
use listwright_domain::traits::ListingSource;

/// Execute the fetch command.
pub async fn execute_fetch(
    args: FetchArgs,
    source: &dyn ListingSource,
    formatter: &Formatter,
) -> Result<()> {
    let asin = resolve(&args.input)?;
    let listing = source.fetch(&asin).await?;

    println!("{}", formatter.format_listing(source.name(), &listing)?);

    Ok(())
}
