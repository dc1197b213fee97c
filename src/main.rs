//! pushlink CLI entry point

mod cli;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use pushlink::config::ENV_APP_SECRET;
use pushlink::{authorize, build_url, AppConfig, ClientInfo, MemberData};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Auth {
            socket_id,
            channel,
            data,
        } => auth(app_config(&cli, true)?, socket_id, channel, data.as_deref()),
        Commands::Url => url(app_config(&cli, false)?),
    }
}

/// Load config through the same rules as `AppConfig::from_env`
///
/// Flags win over `PUSHER_*` env vars. `url` signs nothing, so it runs
/// without a secret.
fn app_config(cli: &Cli, needs_secret: bool) -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|name| match cli.lookup(name) {
        None if name == ENV_APP_SECRET && !needs_secret => Some(String::new()),
        value => value,
    })
    .context("Invalid configuration")?;

    Ok(if cli.insecure {
        config.encrypted(false)
    } else {
        config
    })
}

fn auth(config: AppConfig, socket_id: &str, channel: &str, data: Option<&str>) -> Result<()> {
    let member_data = data
        .map(MemberData::from_json)
        .transpose()
        .context("--data must be a JSON object")?;

    let state = config.connection_state().with_socket_id(socket_id);
    debug!(?config, channel, "Signing subscription");

    match authorize(&state, channel, member_data)
        .with_context(|| format!("Failed to authorize channel {}", channel))?
    {
        Some(response) => println!("{}", response.to_json()?),
        None => info!("{} is a public channel; no auth required", channel),
    }

    Ok(())
}

fn url(config: AppConfig) -> Result<()> {
    let endpoint = build_url(&config.endpoint(), &ClientInfo::default());
    println!("{}", endpoint);
    Ok(())
}
