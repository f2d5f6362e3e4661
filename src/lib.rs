//! # Tomodachi
//!
//! A single virtual pet whose hunger, happiness and energy change through
//! explicit actions (feed, play, sleep) and through the passage of time.
//! Time-based decay is computed lazily from the elapsed wall-clock time at
//! the next read or action; nothing runs in the background.
//!
//! The [`Keeper`] owns the pet and is the only interface the two front ends
//! (the command loop in [`interactive`] and the window in
//! [`interactive::tui`]) use.

pub mod clock;
pub mod config;
pub mod errors;
pub mod interactive;
pub mod pet;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_config, TomodachiConfig};
pub use errors::{Result, TomodachiError};
pub use pet::{Meter, Mood, Outcome, Pet, PetSnapshot, Rules};
pub use state::Keeper;
