//! Data models for the `OfficeMap` application
//!
//! - Coordinate: map positions and great-circle distance
//! - Travel: travel modes and route legs

pub mod coordinate;
pub mod travel;

pub use coordinate::Coordinate;
pub use travel::{Measure, RouteLeg, TravelMode, format_distance};
