//! Location sampling
//!
//! Scatters marker positions around a center coordinate. The random source is
//! always passed in, so seeded generators reproduce the same markers.

use rand::RngExt;
use tracing::debug;

use crate::models::Coordinate;

/// Number of markers generated around a center
pub const SAMPLE_COUNT: usize = 100;

/// Magnitude of the divisor applied to each uniform draw
pub const SPREAD_DIVISOR: f64 = 2.0;

/// The draws the sampler needs from a random generator.
///
/// Every `rand` generator implements this; tests can supply fixed sources.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Fair coin flip, `true` for a positive offset
    fn positive(&mut self) -> bool;
}

impl<R: RngExt> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn positive(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Produce exactly [`SAMPLE_COUNT`] coordinates around `center`.
///
/// Latitude and longitude each get their own sign and their own uniform draw,
/// so every offset stays below `1 / SPREAD_DIVISOR` degrees. Results are not
/// clamped to valid latitude/longitude ranges.
pub fn generate_locations<R: RandomSource + ?Sized>(
    center: Coordinate,
    rng: &mut R,
) -> Vec<Coordinate> {
    debug!(
        "Sampling {} locations around {}",
        SAMPLE_COUNT,
        center.format_coordinates()
    );

    (0..SAMPLE_COUNT)
        .map(|_| Coordinate {
            lat: center.lat + offset(rng),
            lng: center.lng + offset(rng),
        })
        .collect()
}

fn offset<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    let direction = if rng.positive() {
        SPREAD_DIVISOR
    } else {
        -SPREAD_DIVISOR
    };
    rng.unit() / direction
}
