//! `OfficeMap` - commute planning around an office
//!
//! Scatters candidate home markers around the user's position, draws
//! distance rings around the chosen office and estimates how long the trip
//! takes by car, bike, bicycle or on foot.

pub mod api;
pub mod card;
pub mod config;
pub mod error;
pub mod estimator;
pub mod logging;
pub mod models;
pub mod rings;
pub mod routing;
pub mod sampler;
pub mod session;
pub mod theme;
pub mod web;

// Re-export core types for public API
pub use card::DistanceCard;
pub use config::OfficeMapConfig;
pub use error::OfficeMapError;
pub use estimator::{TravelEstimate, estimate, estimate_leg};
pub use models::{Coordinate, Measure, RouteLeg, TravelMode};
pub use rings::{DistanceRing, RingSet};
pub use routing::{GraphHopperClient, RouteProvider, RouteRequest};
pub use sampler::{RandomSource, SAMPLE_COUNT, SPREAD_DIVISOR, generate_locations};
pub use session::MapSession;
pub use theme::{MapOptions, MapTheme, PolylineStyle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, OfficeMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
