//! The Keeper: the one interface front ends talk to.
//!
//! It owns the pet, the clock and the rules, and stamps every call with the
//! current time so decay is always applied before anything else happens.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::errors::{Result, TomodachiError};
use crate::pet::{Mood, Outcome, Pet, PetSnapshot, Rules, DEFAULT_NAME};

use super::persistence::{load_snapshot, save_snapshot};

/// How far ahead of our clock a loaded save may have been written
const LOAD_CLOCK_SKEW_MINUTES: i64 = 5;

pub struct Keeper<C: Clock = SystemClock> {
    pet: Pet,
    clock: C,
    rules: Rules,
    save_path: PathBuf,
}

impl<C: Clock> Keeper<C> {
    pub fn new(
        name: impl Into<String>,
        clock: C,
        rules: Rules,
        save_path: impl Into<PathBuf>,
    ) -> Self {
        let pet = Pet::new(name, clock.now());
        Self {
            pet,
            clock,
            rules,
            save_path: save_path.into(),
        }
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Current values after applying pending decay
    pub fn status(&mut self) -> PetSnapshot {
        self.pet.status(self.clock.now(), &self.rules)
    }

    /// Values and mood from a single refresh
    pub fn observe(&mut self) -> (PetSnapshot, Mood) {
        let snapshot = self.status();
        (snapshot, self.pet.mood(&self.rules))
    }

    pub fn feed(&mut self, amount: Option<u32>) -> Outcome {
        let amount = amount.unwrap_or(self.rules.feed_amount);
        self.pet.feed(amount, self.clock.now(), &self.rules)
    }

    pub fn play(&mut self, minutes: Option<u32>) -> Outcome {
        let minutes = minutes.unwrap_or(self.rules.play_minutes);
        self.pet.play(minutes, self.clock.now(), &self.rules)
    }

    pub fn sleep(&mut self, hours: Option<u32>) -> Outcome {
        let hours = hours.unwrap_or(self.rules.sleep_hours);
        self.pet.sleep(hours, self.clock.now(), &self.rules)
    }

    /// Replace the pet with a newborn one
    pub fn adopt(&mut self, name: Option<&str>) -> &Pet {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME);
        info!("Adopting a new pet named {}", name);
        self.pet = Pet::new(name, self.clock.now());
        &self.pet
    }

    /// Save the pet as it is right now
    ///
    /// Returns the path written.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.map_or_else(|| self.save_path.clone(), Path::to_path_buf);
        let snapshot = self.status();
        save_snapshot(&path, &snapshot)?;
        Ok(path)
    }

    /// Replace the pet with the one saved at `path`
    ///
    /// The current pet is only replaced once the file has been read and fully
    /// validated; on any error it is left exactly as it was.
    pub fn load(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.map_or_else(|| self.save_path.clone(), Path::to_path_buf);
        let restored = load_snapshot(&path)
            .and_then(Pet::restore)
            .and_then(|pet| self.check_not_from_future(pet));

        match restored {
            Ok(pet) => {
                debug!("Restored {} last updated at {}", pet.name(), pet.last_updated());
                self.pet = pet;
                Ok(path)
            }
            Err(e) => {
                warn!("Failed to load pet from {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    /// A save stamped after now would never decay until that date arrives
    fn check_not_from_future(&self, pet: Pet) -> Result<Pet> {
        let limit = self.clock.now() + TimeDelta::minutes(LOAD_CLOCK_SKEW_MINUTES);
        if pet.last_updated() > limit {
            return Err(TomodachiError::invalid_snapshot(
                "last_updated",
                format!("is in the future ({})", pet.last_updated()),
            ));
        }
        Ok(pet)
    }
}
