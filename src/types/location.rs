//! types/location.rs
//!
//! Defines the LocationSample struct delivered by location sources and
//! the raw-speed → km/h conversion every downstream consumer relies on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meters-per-second to kilometers-per-hour.
pub const MPS_TO_KMH: f64 = 3.6;

/// A single location reading as delivered by a location source.
///
/// Platform location services report speed in m/s and use a negative
/// value to mean "invalid / unknown". Samples are transient: handled
/// once, never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationSample {
    /// Raw ground speed in m/s. Negative means invalid.
    pub speed_mps: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(speed_mps: f64) -> Self {
        Self {
            speed_mps,
            timestamp: Utc::now(),
        }
    }

    /// Speed in km/h, with invalid (negative) readings clamped to zero
    /// before conversion. Every km/h figure reported anywhere downstream
    /// comes from here.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps.max(0.0) * MPS_TO_KMH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_conversion() {
        assert_eq!(LocationSample::new(10.0).speed_kmh(), 36.0);
        assert_eq!(LocationSample::new(0.0).speed_kmh(), 0.0);
    }

    #[test]
    fn test_invalid_speed_clamps_to_zero() {
        // Negative raw speed is the platform convention for "unknown".
        assert_eq!(LocationSample::new(-2.0).speed_kmh(), 0.0);
        assert_eq!(LocationSample::new(-0.01).speed_kmh(), 0.0);
    }
}
