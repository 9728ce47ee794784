//! Coordinate model for map positions

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::{OfficeMapError, Result};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a coordinate from untrusted input, rejecting NaN and infinities.
    ///
    /// Out-of-range but finite values are accepted; nothing downstream clamps.
    pub fn checked(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() {
            return Err(OfficeMapError::validation(format!(
                "latitude must be a finite number, got {lat}"
            )));
        }
        if !lng.is_finite() {
            return Err(OfficeMapError::validation(format!(
                "longitude must be a finite number, got {lng}"
            )));
        }
        Ok(Self::new(lat, lng))
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }

    /// Great-circle distance to `other` in meters
    #[must_use]
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        distance(self.into(), other.into(), Units::Kilometers) * 1000.0
    }
}

impl From<&Coordinate> for HaversineLocation {
    fn from(value: &Coordinate) -> Self {
        HaversineLocation {
            latitude: value.lat,
            longitude: value.lng,
        }
    }
}
