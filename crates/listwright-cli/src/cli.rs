//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use listwright_catalog::SourceKind;
use listwright_domain::Marketplace;
use listwright_optimizer::{Persona, Targeting};
use std::path::PathBuf;

/// Listwright - Audit and rewrite marketplace listings from the terminal.
#[derive(Debug, Parser)]
#[command(name = "listwright")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.listwright/config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Listing source (overrides the configuration file)
    #[arg(short, long, global = true, value_parser = parse_source)]
    pub source: Option<SourceKind>,

    /// Rewrite persona (overrides the configuration file)
    #[arg(short, long, global = true, value_parser = parse_persona)]
    pub persona: Option<Persona>,

    /// Marketplace code, e.g. US, UK, DE (overrides the configuration file)
    #[arg(short, long, global = true, value_parser = parse_marketplace)]
    pub marketplace: Option<Marketplace>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract ASINs from identifiers or product URLs
    Resolve(ResolveArgs),

    /// Fetch one listing from the configured source
    Fetch(FetchArgs),

    /// Audit and rewrite listing text given on the command line
    Manual(ManualArgs),

    /// Audit and rewrite many listings, one identifier per line
    Batch(BatchArgs),
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// ASINs or product URLs
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// ASIN or product URL
    pub input: String,
}

/// Targeting shared by the manual and batch commands.
#[derive(Debug, Clone, Args)]
pub struct TargetingArgs {
    /// Target keywords, comma separated
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// Marketplace category path
    #[arg(long, default_value = "")]
    pub category: String,

    /// Intended audience
    #[arg(short, long, default_value = "")]
    pub audience: String,
}

impl From<TargetingArgs> for Targeting {
    fn from(args: TargetingArgs) -> Self {
        Targeting {
            keywords: args.keywords,
            category: args.category,
            audience: args.audience,
        }
    }
}

/// Arguments for the manual command.
#[derive(Debug, Parser)]
pub struct ManualArgs {
    /// Current title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Current bullet points
    #[arg(short, long, default_value = "")]
    pub bullets: String,

    /// Current description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Reviews or voice-of-customer snippets
    #[arg(short, long, default_value = "")]
    pub reviews: String,

    #[command(flatten)]
    pub targeting: TargetingArgs,

    /// Write the result to an export file
    #[arg(short, long)]
    pub export: bool,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// File with one ASIN or URL per line (default: stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub targeting: TargetingArgs,

    /// Write the report to an export file
    #[arg(short, long)]
    pub export: bool,
}

fn parse_source(s: &str) -> Result<SourceKind, String> {
    s.parse()
}

fn parse_persona(s: &str) -> Result<Persona, String> {
    s.parse()
}

fn parse_marketplace(s: &str) -> Result<Marketplace, String> {
    s.parse()
}
