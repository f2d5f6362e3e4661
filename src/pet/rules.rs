//! Tuning constants for actions and decay.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TomodachiError};

/// Longest neglect window a config may ask for (about 1000 years)
pub const MAX_NEGLECT_DAYS: f64 = 365_250.0;

/// How actions and elapsed time move the pet's meters
///
/// Every field can be overridden from the `[rules]` table of the config file;
/// missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Hunger removed by `feed` when no amount is given
    pub feed_amount: u32,
    /// Happiness gained per meal
    pub feed_happiness: f64,
    pub feed_care: f64,

    /// Default play length in minutes
    pub play_minutes: u32,
    pub play_care: f64,

    /// Default nap length in hours
    pub sleep_hours: u32,
    pub sleep_energy_per_hour: f64,
    pub sleep_hunger_per_hour: f64,
    pub sleep_care: f64,

    /// Passive decay, per elapsed hour
    pub hunger_per_hour: f64,
    pub energy_per_hour: f64,
    pub happiness_per_hour: f64,
    /// Extra happiness lost per hour while hungry or tired
    pub distress_happiness_per_hour: f64,

    /// Hunger at or above which the pet counts as hungry
    pub hungry_threshold: f64,
    /// Energy at or below which the pet counts as tired
    pub tired_threshold: f64,
    /// Happiness above which the pet looks happy
    pub happy_threshold: f64,

    /// Neglect window at care 0 and care 100
    pub min_neglect_days: f64,
    pub max_neglect_days: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            feed_amount: 20,
            feed_happiness: 5.0,
            feed_care: 3.0,

            play_minutes: 10,
            play_care: 2.0,

            sleep_hours: 2,
            sleep_energy_per_hour: 25.0,
            sleep_hunger_per_hour: 5.0,
            sleep_care: 1.0,

            hunger_per_hour: 5.0,
            energy_per_hour: 5.0,
            happiness_per_hour: 2.0,
            distress_happiness_per_hour: 3.0,

            hungry_threshold: 70.0,
            tired_threshold: 20.0,
            happy_threshold: 65.0,

            min_neglect_days: 3.0,
            max_neglect_days: 30.0,
        }
    }
}

impl Rules {
    /// Reject configurations that would break the decay direction
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("feed_happiness", self.feed_happiness),
            ("feed_care", self.feed_care),
            ("play_care", self.play_care),
            ("sleep_energy_per_hour", self.sleep_energy_per_hour),
            ("sleep_hunger_per_hour", self.sleep_hunger_per_hour),
            ("sleep_care", self.sleep_care),
            ("hunger_per_hour", self.hunger_per_hour),
            ("energy_per_hour", self.energy_per_hour),
            ("happiness_per_hour", self.happiness_per_hour),
            ("distress_happiness_per_hour", self.distress_happiness_per_hour),
            ("min_neglect_days", self.min_neglect_days),
            ("max_neglect_days", self.max_neglect_days),
        ];

        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(TomodachiError::configuration(format!(
                    "rules.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.max_neglect_days > MAX_NEGLECT_DAYS {
            return Err(TomodachiError::configuration(format!(
                "rules.max_neglect_days must be at most {MAX_NEGLECT_DAYS}, got {}",
                self.max_neglect_days
            )));
        }

        if self.min_neglect_days > self.max_neglect_days {
            return Err(TomodachiError::configuration(format!(
                "rules.min_neglect_days ({}) exceeds rules.max_neglect_days ({})",
                self.min_neglect_days, self.max_neglect_days
            )));
        }

        Ok(())
    }

    /// How long the pet survives without care, given its care score
    ///
    /// Linear from `min_neglect_days` at care 0 to `max_neglect_days` at care 100,
    /// never longer than [`MAX_NEGLECT_DAYS`].
    pub fn neglect_window(&self, care: f64) -> TimeDelta {
        let span = self.max_neglect_days - self.min_neglect_days;
        let days = (self.min_neglect_days + (care / 100.0) * span).clamp(0.0, MAX_NEGLECT_DAYS);
        TimeDelta::milliseconds((days * 86_400_000.0) as i64)
    }
}
