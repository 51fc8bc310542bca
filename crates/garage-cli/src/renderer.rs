//! Terminal rendering for board output
//!
//! Renders the markdown produced by `garage_core::display` with termimad, or
//! prints it untouched when color is disabled.

use anyhow::Result;
use garage_core::OperationStatus;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    // Column headers keep their hashes, tinted per column
                    println!("\x1b[{}m{line}\x1b[0m", header_color(line));
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render notifications in the order they were raised
    pub fn render_notifications(&self, notifications: &[OperationStatus]) -> Result<()> {
        for notification in notifications {
            if self.rich_enabled {
                let color = if notification.success { 32 } else { 31 };
                println!("\x1b[{color}m{}\x1b[0m", notification.to_string().trim_end());
            } else {
                print!("{notification}");
            }
        }
        Ok(())
    }
}

fn header_color(line: &str) -> u8 {
    if line.contains("Completed") {
        32
    } else if line.contains("In Progress") {
        33
    } else {
        34
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
