/// Mock Full Node + Blob Store Server
///
/// A lightweight mock of the gateway's external collaborators, backed by
/// in-memory state. Designed for local development and integration tests.

mod handlers;
mod server;
mod state;
mod types;

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use server::run_server;
use state::Ledger;

#[derive(Debug)]
struct Config {
    server_host: String,
    server_port: u16,
}

impl Config {
    fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "9180".to_string())
            .parse()
            .context("Invalid SERVER_PORT")?;

        Ok(Self {
            server_host,
            server_port,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting mock full node...");

    let config = Config::from_env().context("Failed to load configuration")?;

    log::info!(
        "Server will listen on {}:{}",
        config.server_host,
        config.server_port
    );

    let ledger = Arc::new(Ledger::new());

    run_server(ledger, config.server_host, config.server_port)
        .await
        .context("Server error")?;

    Ok(())
}
