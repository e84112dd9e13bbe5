//! CLI entry point for natter.

mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use natter_client::HttpReplyClient;
use natter_core::{ChatCommand, ChatEvent};
use natter_runtime::{RuntimeConfig, SessionController};
use natter_tui::run_tui;

#[derive(Parser)]
#[command(name = "natter")]
#[command(version)]
#[command(about = "Terminal chat client: multiple conversations, one reply service")]
struct Cli {
    /// Reply service endpoint (overrides NATTER_REPLY_URL).
    #[arg(long)]
    url: Option<String>,

    /// Seconds to wait for one reply before giving up (overrides
    /// NATTER_TIMEOUT_SECS).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init();

    let mut config = RuntimeConfig::from_env();
    if let Some(url) = cli.url {
        config = config.with_reply_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    info!(endpoint = %config.reply_url, "starting natter");

    let client = HttpReplyClient::new(config.reply_url.clone(), config.request_timeout)
        .context("building reply client")?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<ChatEvent>();
    let (command_tx, command_rx) = mpsc::unbounded_channel::<ChatCommand>();

    let mut controller = SessionController::new(config, Arc::new(client), event_tx);
    tokio::spawn(async move {
        controller.run(command_rx).await;
    });

    run_tui(event_rx, command_tx)?;
    Ok(())
}
