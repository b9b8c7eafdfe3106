//! Listwright web server
//!
//! Loads `.env`, reads credentials and configuration, then serves the UI.

use listwright_optimizer::{AppConfig, Credentials};
use listwright_web::{start_server, WebError};
use std::env;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), WebError> {
    // A missing .env file is fine; the variables may come from the environment
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().collect();

    let mut config = if args.len() > 2 && args[1] == "--config" {
        AppConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        AppConfig::default()
    };
    config.apply_env_overrides()?;

    // Both keys are required before anything is served
    let credentials = Credentials::from_env()?;

    start_server(config, credentials).await
}

fn print_help() {
    println!("Listwright - Marketplace listing audit and rewrite");
    println!();
    println!("USAGE:");
    println!("    listwright-web [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     Chat-completions API key (required)");
    println!("    KEEPA_API_KEY      Keepa API key (required)");
    println!("    PORT               Overrides bind_port");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("A .env file in the working directory is loaded first when present.");
}
