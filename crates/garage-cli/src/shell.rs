//! Interactive board session
//!
//! Reads one command per line from stdin until `quit`, end of input or
//! Ctrl-C. Search terms go through the session's debouncer, so a search
//! shows the board once the term has settled.

use std::{
    io::{IsTerminal, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use garage_core::{CategoryFilter, DropTarget, OrderId, Status};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::Cli;

const HELP: &str = "\
Commands:

- `show`: print the board
- `search <text>`: filter by text, `search` alone clears it
- `filter <all|my|due-today>`: category filter
- `move <id> <pending|in-progress|completed>`: move an order to the end of a column
- `drop <id> <status> [before <id>]`: drop an order in front of another card
- `refresh`: reload orders from the store
- `quit`: leave the session
";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Show,
    Search(String),
    Filter(CategoryFilter),
    Move(OrderId, Status),
    Drop(OrderId, DropTarget),
    Refresh,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" | "show" | "ls" => Ok(ShellCommand::Show),
            "search" | "/" => Ok(ShellCommand::Search(rest.to_string())),
            "filter" => rest.parse().map(ShellCommand::Filter),
            "move" | "mv" => {
                let (id, status) = rest
                    .split_once(' ')
                    .ok_or_else(|| "Usage: move <id> <status>".to_string())?;
                let status = status.parse::<Status>()?;
                Ok(ShellCommand::Move(OrderId::new(id), status))
            }
            "drop" => parse_drop(rest),
            "refresh" => Ok(ShellCommand::Refresh),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command: {other}. Type `help` for commands.")),
        }
    }
}

fn parse_drop(rest: &str) -> Result<ShellCommand, String> {
    const USAGE: &str = "Usage: drop <id> <status> [before <id>]";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let (id, status, before) = match parts.as_slice() {
        [id, status] => (id, status, None),
        [id, status, "before", other] => (id, status, Some(*other)),
        _ => return Err(USAGE.to_string()),
    };
    let status = status.parse::<Status>()?;
    let target = match before {
        Some(other) => DropTarget::before(status, other),
        None => DropTarget::column(status),
    };
    Ok(ShellCommand::Drop(OrderId::new(*id), target))
}

pub async fn run(cli: &mut Cli) -> Result<()> {
    if let Err(e) = cli.load().await {
        cli.renderer().render(&format!("Error: {e:#}\n"))?;
    }
    cli.render_current_board()?;

    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("garage> ");
            std::io::stdout().flush().context("Failed to write prompt")?;
        }

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                cli.renderer().render(&format!("{message}\n"))?;
                continue;
            }
        };

        let result = match command {
            ShellCommand::Show => cli.render_current_board(),
            ShellCommand::Search(text) => {
                cli.session().set_search(text);
                cli.session().settle_search().await;
                cli.render_current_board()
            }
            ShellCommand::Filter(filter) => {
                cli.session().set_filter(filter);
                cli.render_current_board()
            }
            ShellCommand::Move(id, status) => match cli.move_order(&id, status).await {
                Ok(()) => cli.render_current_board(),
                Err(e) => Err(e),
            },
            ShellCommand::Drop(id, target) => match cli.drop_order(&id, target).await {
                Ok(()) => cli.render_current_board(),
                Err(e) => Err(e),
            },
            ShellCommand::Refresh => match cli.refresh().await {
                Ok(()) => cli.render_current_board(),
                Err(e) => Err(e),
            },
            ShellCommand::Help => cli.renderer().render(HELP),
            ShellCommand::Quit => break,
        };
        if let Err(e) = result {
            cli.renderer().render(&format!("Error: {e:#}\n"))?;
        }
    }
    Ok(())
}
