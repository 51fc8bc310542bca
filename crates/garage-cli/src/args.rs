use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BoardArgs, OrderCommands};

/// Repair order board for the garage
///
/// Orders move through three columns: Pending, In Progress and Completed.
/// Without a command the board is printed.
#[derive(Parser)]
#[command(version, about, name = "garage")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/garage/garage.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/garage/config.json
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Identity used by the "my" filter: a worker id or name
    #[arg(long, global = true)]
    pub me: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board
    #[command(alias = "b")]
    Board(BoardArgs),
    /// Manage orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Add the demo orders
    Seed,
    /// Start an interactive board session
    Shell,
}
