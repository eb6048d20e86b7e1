#![forbid(unsafe_code)]

//! Hydro Oasis CLI
//!
//! Exercises the calculator helpers from the command line: mirrored data
//! fetching, preview detection, recommendation rendering, the harvest
//! handoff list, and report branding.

mod cli;
mod commands;
mod config_handlers;

use anyhow::Result;
use clap::Parser;
use hoa::HoaConfig;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command, HarvestAction};

fn init_tracing(verbose: bool) {
    let default = if verbose { "info,hoa=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config_path = args.config.as_deref();
    let load = || HoaConfig::load(config_path);
    tracing::debug!(config = ?config_path, command = ?args.command, "Starting");

    match args.command {
        Command::Fetch {
            path,
            page_url,
            text,
        } => commands::cmd_fetch(load()?, &path, page_url.as_deref(), text).await,
        Command::Candidates { path, page_url } => {
            commands::cmd_candidates(load()?, &path, &page_url)
        }
        Command::Preview { url } => commands::cmd_preview(&load()?, &url),
        Command::Render { file } => commands::cmd_render(&file),
        Command::Harvest { action } => match action {
            HarvestAction::Push { payload } => commands::cmd_harvest_push(load()?, &payload),
            HarvestAction::List => commands::cmd_harvest_list(load()?),
            HarvestAction::Clear => commands::cmd_harvest_clear(load()?),
        },
        Command::BrandPlan { pages, offline } => {
            commands::cmd_brand_plan(load()?, pages, offline).await
        }
        Command::Config { action } => config_handlers::handle_config_command(config_path, action),
    }
}
