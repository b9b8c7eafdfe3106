//! Listwright CLI - Audit and rewrite marketplace listings from the terminal.

use clap::Parser;
use listwright_cli::commands;
use listwright_cli::config;
use listwright_cli::{Cli, Command, Formatter};
use listwright_optimizer::Credentials;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> listwright_cli::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    let mut config = config::load(cli.config.as_deref())?;
    config::apply_overrides(&mut config, &cli);

    let export_dir = config.export_dir();

    match cli.command {
        // Resolving needs no credentials and no network
        Command::Resolve(args) => commands::execute_resolve(args, &formatter),
        Command::Fetch(args) => {
            let credentials = Credentials::from_env()?;
            let source = config.build_source(&credentials);
            commands::execute_fetch(args, &source, &formatter).await
        }
        Command::Manual(args) => {
            let credentials = Credentials::from_env()?;
            let optimizer = config.build_optimizer(config.build_provider(&credentials));
            commands::execute_manual(args, &optimizer, &export_dir, &formatter).await
        }
        Command::Batch(args) => {
            let credentials = Credentials::from_env()?;
            let source = config.build_source(&credentials);
            let optimizer = config.build_optimizer(config.build_provider(&credentials));
            commands::execute_batch(args, &optimizer, &source, &export_dir, &formatter).await
        }
    }
}
