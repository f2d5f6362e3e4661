//! The pet and its update rules.
//!
//! All state changes happen here. Decay is lazy: nothing ticks in the
//! background, instead every action and every status read first calls
//! [`Pet::refresh`] with the current time, which applies whatever decay the
//! elapsed interval implies.

pub mod meter;
pub mod rules;

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::errors::{Result, TomodachiError};

pub use meter::Meter;
pub use rules::Rules;

pub const DEFAULT_NAME: &str = "Tomo";

/// Result of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action took full effect
    Done,
    /// The pet played but ran out of energy, so enjoyed it less (or not at all)
    Exhausted,
    /// The pet is dead and nothing happened
    Deceased,
}

/// How the pet looks right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Dead,
    Sleepy,
    Hungry,
    Happy,
    Content,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Dead => "dead",
            Mood::Sleepy => "sleepy",
            Mood::Hungry => "hungry",
            Mood::Happy => "happy",
            Mood::Content => "content",
        };
        f.write_str(s)
    }
}

/// Full set of pet values at one instant, for display and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSnapshot {
    pub name: String,
    pub hunger: Meter,
    pub happiness: Meter,
    pub energy: Meter,
    pub care: Meter,
    pub age_ms: u64,
    pub play_secs: u64,
    pub alive: bool,
    pub born_at: DateTime<Utc>,
    pub last_cared: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl PetSnapshot {
    /// Age as a short human string, e.g. `2d 3h 15m`
    pub fn age_display(&self) -> String {
        let minutes = self.age_ms / 60_000;
        let (days, hours, mins) = (minutes / 1440, (minutes / 60) % 24, minutes % 60);
        if days > 0 {
            format!("{days}d {hours}h {mins}m")
        } else if hours > 0 {
            format!("{hours}h {mins}m")
        } else {
            format!("{mins}m")
        }
    }
}

impl fmt::Display for PetSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | Hunger: {}, Happiness: {}, Energy: {}, Care: {}, Age: {}",
            self.name,
            if self.alive { "alive" } else { "dead" },
            self.hunger,
            self.happiness,
            self.energy,
            self.care,
            self.age_display()
        )
    }
}

/// A single virtual pet
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    name: String,
    hunger: Meter,
    happiness: Meter,
    energy: Meter,
    care: Meter,
    age_ms: u64,
    play_secs: u64,
    alive: bool,
    born_at: DateTime<Utc>,
    last_cared: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Pet {
    /// A newborn pet with default meters
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            hunger: Meter::default(),
            happiness: Meter::default(),
            energy: Meter::default(),
            care: Meter::default(),
            age_ms: 0,
            play_secs: 0,
            alive: true,
            born_at: now,
            last_cared: now,
            last_updated: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hunger(&self) -> Meter {
        self.hunger
    }

    pub fn happiness(&self) -> Meter {
        self.happiness
    }

    pub fn energy(&self) -> Meter {
        self.energy
    }

    pub fn care(&self) -> Meter {
        self.care
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Apply decay for the time since the last update
    ///
    /// A clock that went backwards applies nothing and leaves `last_updated`
    /// where it was.
    pub fn refresh(&mut self, now: DateTime<Utc>, rules: &Rules) {
        if now <= self.last_updated {
            trace!("refresh with no elapsed time for {}", self.name);
            return;
        }

        if self.alive {
            // None when the window runs past the last representable date
            let deadline = self
                .last_cared
                .checked_add_signed(rules.neglect_window(self.care.value()));
            let until = deadline.map_or(now, |d| now.min(d));
            let elapsed = until - self.last_updated;
            if elapsed > TimeDelta::zero() {
                self.decay(elapsed, rules);
            }
            if deadline.is_some_and(|d| now >= d) {
                self.alive = false;
                info!(
                    "{} died of neglect after {}",
                    self.name,
                    self.snapshot().age_display()
                );
            }
        }

        self.last_updated = now;
    }

    /// Decay over one interval
    ///
    /// Hunger only rises and energy only falls here, so the pet turns hungry
    /// or tired at most once per interval. Distress is charged from that
    /// moment on, which makes one long interval equal to any split of it.
    fn decay(&mut self, elapsed: TimeDelta, rules: &Rules) {
        let ms = elapsed.num_milliseconds();
        let hours = ms as f64 / 3_600_000.0;

        let distress_from = self
            .hours_until_hungry(rules)
            .min(self.hours_until_tired(rules));
        let distressed = (hours - distress_from).max(0.0);

        self.hunger.raise(rules.hunger_per_hour * hours);
        self.energy.lower(rules.energy_per_hour * hours);
        self.happiness.lower(
            rules.happiness_per_hour * hours + rules.distress_happiness_per_hour * distressed,
        );

        self.age_ms = self.age_ms.saturating_add(ms as u64);
        debug!(
            "decayed {} over {:.3}h: hunger={:.1} happiness={:.1} energy={:.1}",
            self.name,
            hours,
            self.hunger.value(),
            self.happiness.value(),
            self.energy.value()
        );
    }

    /// Hours of decay until hunger reaches the threshold, infinite if never
    fn hours_until_hungry(&self, rules: &Rules) -> f64 {
        let hunger = self.hunger.value();
        if hunger >= rules.hungry_threshold {
            0.0
        } else if rules.hunger_per_hour > 0.0 && rules.hungry_threshold <= Meter::MAX {
            (rules.hungry_threshold - hunger) / rules.hunger_per_hour
        } else {
            f64::INFINITY
        }
    }

    /// Hours of decay until energy falls to the threshold, infinite if never
    fn hours_until_tired(&self, rules: &Rules) -> f64 {
        let energy = self.energy.value();
        if energy <= rules.tired_threshold {
            0.0
        } else if rules.energy_per_hour > 0.0 && rules.tired_threshold >= Meter::MIN {
            (energy - rules.tired_threshold) / rules.energy_per_hour
        } else {
            f64::INFINITY
        }
    }

    /// Feed the pet: less hungry, a little happier
    pub fn feed(&mut self, amount: u32, now: DateTime<Utc>, rules: &Rules) -> Outcome {
        self.refresh(now, rules);
        if !self.alive {
            return Outcome::Deceased;
        }

        self.hunger.lower(f64::from(amount));
        self.happiness.raise(rules.feed_happiness);
        self.cared(rules.feed_care, now);
        debug!("fed {} by {}", self.name, amount);
        Outcome::Done
    }

    /// Play for a number of minutes
    ///
    /// Costs `max(1, minutes / 2)` energy. When the pet cannot pay the full
    /// cost it still plays, but the happiness gain shrinks in proportion to
    /// the energy it actually had; at zero energy it gains nothing.
    pub fn play(&mut self, minutes: u32, now: DateTime<Utc>, rules: &Rules) -> Outcome {
        self.refresh(now, rules);
        if !self.alive {
            return Outcome::Deceased;
        }

        let cost = f64::from((minutes / 2).max(1));
        let paid = cost.min(self.energy.value());
        let gain = f64::from(minutes / 2) * (paid / cost);

        self.happiness.raise(gain);
        self.energy.lower(paid);
        self.hunger.raise(f64::from(minutes / 3));
        self.play_secs = self.play_secs.saturating_add(u64::from(minutes) * 60);
        self.cared(rules.play_care, now);

        debug!("{} played {}m (paid {:.1}/{:.1} energy)", self.name, minutes, paid, cost);
        if paid < cost {
            Outcome::Exhausted
        } else {
            Outcome::Done
        }
    }

    /// Sleep for a number of hours: rested, but hungrier
    pub fn sleep(&mut self, hours: u32, now: DateTime<Utc>, rules: &Rules) -> Outcome {
        self.refresh(now, rules);
        if !self.alive {
            return Outcome::Deceased;
        }

        let hours_f = f64::from(hours);
        self.energy.raise(rules.sleep_energy_per_hour * hours_f);
        self.hunger.raise(rules.sleep_hunger_per_hour * hours_f);
        self.cared(rules.sleep_care, now);
        debug!("{} slept {}h", self.name, hours);
        Outcome::Done
    }

    /// Refresh, then take a snapshot
    pub fn status(&mut self, now: DateTime<Utc>, rules: &Rules) -> PetSnapshot {
        self.refresh(now, rules);
        self.snapshot()
    }

    fn cared(&mut self, amount: f64, now: DateTime<Utc>) {
        self.care.raise(amount);
        self.last_cared = now;
    }

    pub fn is_hungry(&self, rules: &Rules) -> bool {
        self.hunger.value() >= rules.hungry_threshold
    }

    pub fn is_tired(&self, rules: &Rules) -> bool {
        self.energy.value() <= rules.tired_threshold
    }

    pub fn mood(&self, rules: &Rules) -> Mood {
        if !self.alive {
            Mood::Dead
        } else if self.is_tired(rules) {
            Mood::Sleepy
        } else if self.is_hungry(rules) {
            Mood::Hungry
        } else if self.happiness.value() > rules.happy_threshold {
            Mood::Happy
        } else {
            Mood::Content
        }
    }

    /// Current values without applying decay
    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            name: self.name.clone(),
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
            care: self.care,
            age_ms: self.age_ms,
            play_secs: self.play_secs,
            alive: self.alive,
            born_at: self.born_at,
            last_cared: self.last_cared,
            last_updated: self.last_updated,
        }
    }

    /// Rebuild a pet from a snapshot, verbatim
    ///
    /// Meters are range-checked when the snapshot is deserialized; this checks
    /// what the types cannot.
    pub fn restore(snapshot: PetSnapshot) -> Result<Self> {
        if snapshot.name.trim().is_empty() {
            return Err(TomodachiError::invalid_snapshot("name", "must not be empty"));
        }
        if snapshot.last_updated < snapshot.born_at {
            return Err(TomodachiError::invalid_snapshot(
                "last_updated",
                "is earlier than born_at",
            ));
        }
        if snapshot.last_cared < snapshot.born_at {
            return Err(TomodachiError::invalid_snapshot(
                "last_cared",
                "is earlier than born_at",
            ));
        }

        Ok(Self {
            name: snapshot.name,
            hunger: snapshot.hunger,
            happiness: snapshot.happiness,
            energy: snapshot.energy,
            care: snapshot.care,
            age_ms: snapshot.age_ms,
            play_secs: snapshot.play_secs,
            alive: snapshot.alive,
            born_at: snapshot.born_at,
            last_cared: snapshot.last_cared,
            last_updated: snapshot.last_updated,
        })
    }
}
