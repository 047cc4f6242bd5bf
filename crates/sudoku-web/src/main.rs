//! Browser Sudoku player.
//!
//! Serves the static page and two API routes: puzzle generation
//! (external service when a key is configured, built-in sample board
//! otherwise) and solving (external service first, local backtracking
//! solver as the fallback).

mod client;
mod routes;
mod source;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::client::ExternalClient;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "sudoku-web", version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// API key for the external Sudoku service. Without one, generation
    /// serves the built-in sample board and solving stays local.
    #[arg(long, env = "SUDOKU_API_KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let client = args.api_key.as_deref().map(ExternalClient::new);
    if client.is_none() {
        info!("no API key configured; using the sample board and the local solver");
    }

    let state = Arc::new(AppState::new(client));
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
