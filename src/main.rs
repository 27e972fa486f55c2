mod client;
mod config;
mod domain;
mod engine;
mod export;
mod ids;
mod seed;
mod server;
mod state;

use std::io;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Command, Config, Resource};
use crate::domain::{AgentApi, Error};
use crate::server::Server;
use crate::state::{FileKv, StateStore};

fn pretty<T: Serialize>(value: T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&value)?)
}

async fn show(api: &dyn AgentApi, resource: Resource) -> Result<String, Error> {
    match resource {
        Resource::Wallet => pretty(api.get_wallet_summary().await?),
        Resource::Health => pretty(api.get_wallet_health().await?),
        Resource::Ledger => pretty(api.get_ledger().await?),
        Resource::Players => pretty(api.get_players().await?),
        Resource::Invites => pretty(api.get_invites().await?),
        Resource::Invitations => pretty(api.get_invitations().await?),
        Resource::Payouts => pretty(api.get_payouts().await?),
        Resource::Escalations => pretty(api.get_escalation_tickets().await?),
        Resource::Deposits => pretty(api.get_player_deposits_summary().await?),
        Resource::Statements => pretty(api.get_statements().await?),
        Resource::Goals => pretty(api.get_goals().await?),
        Resource::Wars => pretty(api.get_wars().await?),
        Resource::Alerts => pretty(api.get_alerts().await?),
        Resource::Dashboard => pretty(api.dashboard().await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("agent_desk={},warn", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match &config.command {
        Command::Serve { listen } => {
            let server = Server::bind(*listen, client::mock(&config)?).await?;
            tokio::select! {
                result = server.run() => result?,
                _ = tokio::signal::ctrl_c() => info!("shutting down"),
            }
        }
        Command::Show { resource } => {
            let api = client::connect(&config)?;
            println!("{}", show(api.as_ref(), *resource).await?);
        }
        Command::ExportLedger => {
            let api = client::connect(&config)?;
            let ledger = api.get_ledger().await?;
            export::write_ledger(&ledger, io::stdout().lock())?;
        }
        Command::Reset => match &config.data_dir {
            Some(dir) => {
                let now = Utc::now();
                StateStore::open(FileKv::open(dir)?, now).reset(now);
                info!(dir = %dir.display(), "persisted state reset to seed");
            }
            None => info!("no DATA_DIR configured; nothing to reset"),
        },
    }

    Ok(())
}
