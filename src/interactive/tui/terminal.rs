//! Entering and leaving the full-screen window.

use std::io::stdout;

use color_eyre::Result;
use crossterm::{execute, terminal::SetTitle};
use ratatui::DefaultTerminal;

pub type Tui = DefaultTerminal;

/// Raw mode on the alternate screen, with the window titled `title`
///
/// ratatui's panic hook puts the terminal back before any report is printed.
pub fn init(title: &str) -> Result<Tui> {
    // a second install fails harmlessly
    let _ = color_eyre::install();

    let terminal = ratatui::try_init()?;
    execute!(stdout(), SetTitle(title))?;
    Ok(terminal)
}

pub fn restore() -> Result<()> {
    ratatui::try_restore()?;
    Ok(())
}
