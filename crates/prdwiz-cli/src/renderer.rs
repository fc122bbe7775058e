//! Terminal rendering of markdown output and wizard notifications.
//!
//! Rich mode styles the markdown with termimad; plain mode prints it as-is,
//! which is what tests and pipes get with `--no-color`.

use anyhow::Result;
use prdwiz_core::notify::{Notification, NotificationKind};
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else if let Some(task) = line.strip_prefix("- [x] ") {
                println!("\x1b[32m✓\x1b[0m {task}");
            } else if let Some(task) = line.strip_prefix("- [ ] ") {
                println!("○ {task}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }

    /// Print one notification on its own line, colored by kind.
    pub fn render_notification(&self, notification: &Notification) -> Result<()> {
        if !self.rich_enabled {
            println!("{notification}");
            return Ok(());
        }

        let color = match notification.kind {
            NotificationKind::Success => 32,
            NotificationKind::Error => 31,
            NotificationKind::Info => 36,
        };
        println!("\x1b[{color}m{notification}\x1b[0m");
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
