use std::sync::Arc;

use clap::Parser;
use latch_config::LatchConfig;
use latch_db::LatchDb;
use latch_engine::LockService;
use latchd::gateway;

#[derive(Debug, Parser)]
#[command(name = "latchd", about = "Single-door smart-lock service", version)]
struct Cli {
    /// Override the listen address from config.
    #[arg(long)]
    listen: Option<String>,

    /// Override the database path from config.
    #[arg(long)]
    db: Option<String>,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Log debug detail.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("latchd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = LatchConfig::load_with_dotenv()?;
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    if let Some(db) = cli.db {
        config.store.path = db;
    }

    if config.access.is_factory_pin() {
        tracing::warn!("running with the factory PIN; set LATCHD_ACCESS__PIN");
    }

    let db = LatchDb::open_local(&config.store.path).await?;
    let service = Arc::new(LockService::new(
        db,
        config.access.pin.clone(),
        config.log.page_size,
    ));

    let gateway = gateway::Gateway::bind(&config.server.listen, service)?;
    tracing::info!(addr = %gateway.local_addr()?, "latchd listening");
    gateway.run().await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LATCHD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
