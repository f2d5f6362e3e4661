//! Tomodachi window
//!
//! Full-screen terminal front end using ratatui: a face for the pet's mood,
//! gauges for its meters, and one key per action.
//!
//! - `app.rs` - window state, key bindings and the event loop
//! - `terminal.rs` - entering and leaving the window
//! - `ui.rs` - layout and rendering

pub mod app;
pub mod terminal;
pub mod ui;

pub use app::{App, Button};

use color_eyre::Result;

use crate::clock::Clock;
use crate::state::Keeper;

/// Run the window until the user quits
///
/// The terminal is restored even when the loop fails.
pub fn run<C: Clock>(keeper: &mut Keeper<C>) -> Result<()> {
    let mut terminal = terminal::init(&format!("Tomodachi - {}", keeper.pet().name()))?;

    let mut app = App::new(keeper);
    let result = app.run(&mut terminal);

    terminal::restore()?;

    result
}
