use std::path::PathBuf;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;

use connect_four_web::config::AppConfig;
use connect_four_web::server::{self, AppState};
use connect_four_web::telemetry;

/// Serve two-player Connect Four over HTTP.
#[derive(Parser)]
#[command(name = "connect-four-web", about = "Two-player Connect Four web server")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the listen address
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().context("validating config")?;

    telemetry::init_tracing(&config.log);

    let server_config = config.server;
    tracing::info!(
        host = %server_config.host,
        port = server_config.port,
        workers = server_config.workers,
        max_games = server_config.max_games,
        "starting server"
    );

    let data = web::Data::new(AppState::new(server_config.max_games));

    HttpServer::new(move || App::new().app_data(data.clone()).configure(server::configure))
        .workers(server_config.workers)
        .bind((server_config.host.as_str(), server_config.port))
        .with_context(|| format!("binding {}:{}", server_config.host, server_config.port))?
        .run()
        .await
        .context("running HTTP server")?;

    tracing::info!("server stopped");
    Ok(())
}
