//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use listwright_domain::resolve;

/// Execute the resolve command.
///
/// Prints every input with its ASIN; fails when any input is unresolvable.
pub fn execute_resolve(args: ResolveArgs, formatter: &Formatter) -> Result<()> {
    let results: Vec<_> = args
        .inputs
        .into_iter()
        .map(|input| {
            let result = resolve(&input);
            (input, result)
        })
        .collect();

    println!("{}", formatter.format_resolutions(&results)?);

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        return Err(CliError::InvalidInput(format!(
            "{} of {} input(s) could not be resolved",
            failed,
            results.len()
        )));
    }

    Ok(())
}
