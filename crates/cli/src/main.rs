//! # sqlgen: natural-language questions to SQL
//!
//! This binary is a thin entrypoint: it loads `.env`, sets up logging and
//! delegates everything else to the `sqlgen_cli` library crate.

use anyhow::Result;
use clap::Parser;
use sqlgen_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load credentials from a local .env file, if any.
    dotenvy::dotenv().ok();

    // 2. Setup logging
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sqlgen=info".parse()?))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments and run
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("[sqlgen error] Failed to execute command: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
