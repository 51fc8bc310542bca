//! Garage CLI Application
//!
//! Command-line repair order board: prints the board, creates and edits
//! orders, moves them between columns, and runs an interactive session.

mod args;
mod cli;
mod renderer;
mod shell;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{BoardArgs, Cli};
use garage_core::{GarageConfig, OrderStoreBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config_file,
        no_color,
        me,
        command,
    } = Args::parse();

    let mut config =
        GarageConfig::load(config_file.as_deref()).context("Failed to load configuration")?;
    if let Some(me) = me {
        config.current_user = me;
    }

    let store = OrderStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize order store")?;

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(store, config, renderer);

    info!("Garage started");

    match command {
        Some(Board(args)) => cli.show_board(args.into()).await,
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Seed) => cli.seed().await,
        Some(Shell) => shell::run(&mut cli).await,
        None => cli.show_board(BoardArgs::default().into()).await,
    }
}
