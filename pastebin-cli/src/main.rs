//! pastebin - HTTP service for pastebin posts
//!
//! Reads `.env`, resolves settings from the environment (with command-line
//! overrides), opens the shared database connection and serves until
//! Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;

use pastebin_server::db::create_pool;
use pastebin_server::{run_server, Settings};

mod tracing_setup;

use tracing_setup::LogOptions;

#[derive(Parser, Debug)]
#[command(name = "pastebin", version, about = "Serve pastebin posts over HTTP/JSON")]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Connection string for the DATABASE_URL target (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Connect through DATABASE_URL instead of the local pastebin database
    /// (TLS unless LOCAL is set)
    #[arg(long)]
    use_database_url: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long)]
    otel: bool,
}

impl Cli {
    /// Environment lookup with command-line values taking precedence.
    fn lookup(&self, key: &str) -> Option<String> {
        let cli_value = match key {
            "PORT" => self.port.map(|port| port.to_string()),
            "DATABASE_URL" => self.database_url.clone(),
            _ => None,
        };
        cli_value.or_else(|| std::env::var(key).ok())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _logs = tracing_setup::init(LogOptions {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_lookup(|key| cli.lookup(key))?
        .with_database_url_target(cli.use_database_url);

    let target = settings
        .connection_target()
        .context("Failed to resolve database connection")?;
    let options = target.connect_options()?;

    tracing::info!(database = %target, "Connecting to database");
    let pool = create_pool(options)
        .await
        .with_context(|| format!("Failed to connect to {}", target))?;

    run_server(pool, settings.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
