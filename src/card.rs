//! The distance card shown after a route is computed

use std::fmt::Display;

use serde::Serialize;

use crate::estimator::{TravelEstimate, estimate_leg};
use crate::models::{RouteLeg, TravelMode};

/// Summary of one leg: how far away the place is and how long it takes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceCard {
    pub distance_text: String,
    pub estimate: TravelEstimate,
    pub is_open: bool,
}

impl DistanceCard {
    /// `None` when the leg lacks a distance or duration measurement
    pub fn from_leg(leg: &RouteLeg, mode: TravelMode) -> Option<Self> {
        let estimate = estimate_leg(leg, mode)?;
        let distance_text = leg.distance_text()?;
        Some(Self {
            distance_text,
            estimate,
            is_open: true,
        })
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Text to render, or `None` for a closed card
    pub fn render(&self) -> Option<String> {
        self.is_open.then(|| self.to_string())
    }
}

impl Display for DistanceCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "This place is {} away from your place. That would take {} hours each direction. (by ",
            self.distance_text,
            self.estimate.formatted_hours()
        )?;
        if !self.estimate.icon.is_empty() {
            write!(f, "{} ", self.estimate.icon)?;
        }
        write!(f, "{})", self.estimate.label)
    }
}
