use anyhow::Result;
use clap::Parser;
use phonespot_cli::{run, Config, DemoOutcome};
use phonespot_core::ShopApi;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;

    let mut api = ShopApi::new(&config.backend_url);
    let stdout = std::io::stdout();
    let outcome = run(&mut api, &config, &mut stdout.lock())?;
    if outcome == DemoOutcome::LoginFailed {
        tracing::warn!(backend = %config.backend_url, "stopped after failed login");
    }
    Ok(())
}

/// Diagnostics go to stderr so the report on stdout stays clean.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
