//! Bounded 0-100 attribute.
//!
//! Every constructor clamps, so a `Meter` can never hold an out-of-range
//! value. Deserialization is the one place that rejects instead of clamping:
//! a save file claiming `energy: 140` is corrupt, not a pet with lots of energy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pet attribute on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Meter(f64);

impl Meter {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Create a meter, clamping into range. NaN maps to the floor.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(Self::MIN)
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Value rounded for display
    pub fn rounded(self) -> u8 {
        self.0.round() as u8
    }

    pub fn raise(&mut self, by: f64) {
        *self = Self::new(self.0 + by);
    }

    pub fn lower(&mut self, by: f64) {
        *self = Self::new(self.0 - by);
    }

    pub fn is_floor(self) -> bool {
        self.0 <= Self::MIN
    }

    pub fn is_ceiling(self) -> bool {
        self.0 >= Self::MAX
    }

    /// Fraction of the full scale, for gauges
    pub fn ratio(self) -> f64 {
        self.0 / Self::MAX
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self(50.0)
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rounded(), Self::MAX as u8)
    }
}

/// Rejected meter value from a save file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterRangeError(pub f64);

impl fmt::Display for MeterRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} is outside {}..={}",
            self.0,
            Meter::MIN,
            Meter::MAX
        )
    }
}

impl std::error::Error for MeterRangeError {}

impl TryFrom<f64> for Meter {
    type Error = MeterRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MeterRangeError(value))
        }
    }
}

impl From<Meter> for f64 {
    fn from(meter: Meter) -> Self {
        meter.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(Meter::new(-5.0).value(), 0.0);
        assert_eq!(Meter::new(250.0).value(), 100.0);
        assert_eq!(Meter::new(f64::NAN).value(), 0.0);
        assert_eq!(Meter::new(42.5).value(), 42.5);
    }

    #[test]
    fn test_raise_and_lower_stay_in_range() {
        let mut m = Meter::new(95.0);
        m.raise(20.0);
        assert!(m.is_ceiling());
        m.lower(500.0);
        assert!(m.is_floor());
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert!(Meter::try_from(100.0).is_ok());
        assert!(Meter::try_from(100.5).is_err());
        assert!(Meter::try_from(-0.1).is_err());
        assert!(Meter::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let parsed: Result<Meter, _> = serde_json::from_str("140");
        assert!(parsed.is_err());
        let parsed: Meter = serde_json::from_str("12.5").expect("in range");
        assert_eq!(parsed.value(), 12.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Meter::new(49.6).to_string(), "50/100");
    }
}
