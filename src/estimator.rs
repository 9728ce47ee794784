//! Travel time estimation for a route leg
//!
//! Car trips take the routing service's duration as-is. Bike, bicycle and
//! on-foot trips ignore that duration and divide the distance by a fixed
//! assumed speed instead.

use serde::{Deserialize, Serialize};

use crate::models::{RouteLeg, TravelMode};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Estimated one-way travel time for a leg and mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub label: String,
    pub icon: String,
    /// Full precision; use [`TravelEstimate::formatted_hours`] for display
    pub hours: f64,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl TravelEstimate {
    /// Hours with two decimals, as shown to the user
    #[must_use]
    pub fn formatted_hours(&self) -> String {
        format!("{:.2}", self.hours)
    }
}

/// Estimate the travel time for `mode`.
///
/// Returns `None` when the distance or the duration was not measured; callers
/// skip rendering in that case. Negative and non-finite measurements are
/// treated as unmeasured.
pub fn estimate(
    distance_meters: Option<f64>,
    duration_seconds: Option<f64>,
    mode: TravelMode,
) -> Option<TravelEstimate> {
    let distance_meters = distance_meters.filter(|d| is_measured(*d))?;
    let duration_seconds = duration_seconds.filter(|d| is_measured(*d))?;

    let hours = match mode {
        TravelMode::Car => duration_seconds / SECONDS_PER_HOUR,
        TravelMode::Unknown => 0.0,
        TravelMode::Bike | TravelMode::Bicycle | TravelMode::OnFoot => mode
            .assumed_speed()
            .map_or(0.0, |speed| distance_meters / speed),
    };

    Some(TravelEstimate {
        label: mode.label().to_string(),
        icon: mode.icon().to_string(),
        hours,
        distance_meters,
        duration_seconds,
    })
}

/// [`estimate`] applied to the measurements of a route leg
pub fn estimate_leg(leg: &RouteLeg, mode: TravelMode) -> Option<TravelEstimate> {
    estimate(leg.distance_meters(), leg.duration_seconds(), mode)
}

fn is_measured(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measure;
    use rstest::rstest;

    #[rstest]
    #[case(36_000.0, 3600.0, "car", 1.0)]
    #[case(20_000.0, 123.0, "bike", 1.0)]
    #[case(15_000.0, 123.0, "bicycle", 1.0)]
    #[case(5_000.0, 123.0, "onfoot", 1.0)]
    #[case(10_000.0, 5400.0, "car", 1.5)]
    #[case(30_000.0, 5400.0, "bike", 1.5)]
    #[case(0.0, 0.0, "onfoot", 0.0)]
    fn test_hours_per_mode(
        #[case] distance: f64,
        #[case] duration: f64,
        #[case] tag: &str,
        #[case] expected: f64,
    ) {
        let estimate = estimate(Some(distance), Some(duration), TravelMode::from_tag(tag))
            .expect("measurements present");
        assert_eq!(estimate.hours, expected);
    }

    #[test]
    fn test_non_car_modes_ignore_duration() {
        let quick = estimate(Some(20_000.0), Some(60.0), TravelMode::Bike).unwrap();
        let slow = estimate(Some(20_000.0), Some(86_400.0), TravelMode::Bike).unwrap();
        assert_eq!(quick.hours, slow.hours);
    }

    #[test]
    fn test_unknown_mode() {
        let estimate =
            estimate(Some(1000.0), Some(1000.0), TravelMode::from_tag("zeppelin")).unwrap();
        assert_eq!(estimate.label, "unknown mode");
        assert_eq!(estimate.icon, "");
        assert_eq!(estimate.hours, 0.0);
    }

    #[test]
    fn test_labels_and_sources_are_carried() {
        let estimate = estimate(Some(5000.0), Some(900.0), TravelMode::OnFoot).unwrap();
        assert_eq!(estimate.label, "on foot");
        assert_eq!(estimate.icon, "🚶");
        assert_eq!(estimate.distance_meters, 5000.0);
        assert_eq!(estimate.duration_seconds, 900.0);
    }

    #[rstest]
    #[case(None, Some(3600.0))]
    #[case(Some(1000.0), None)]
    #[case(None, None)]
    #[case(Some(f64::NAN), Some(3600.0))]
    #[case(Some(1000.0), Some(-1.0))]
    fn test_unmeasured_leg_yields_none(
        #[case] distance: Option<f64>,
        #[case] duration: Option<f64>,
    ) {
        assert!(estimate(distance, duration, TravelMode::Car).is_none());
    }

    #[test]
    fn test_estimate_leg() {
        let leg = RouteLeg {
            distance: Some(Measure::with_text(15_000.0, "15 km")),
            duration: Some(Measure::new(1200.0)),
        };
        let estimate = estimate_leg(&leg, TravelMode::Bicycle).unwrap();
        assert_eq!(estimate.hours, 1.0);

        let missing = RouteLeg {
            distance: leg.distance.clone(),
            duration: None,
        };
        assert!(estimate_leg(&missing, TravelMode::Bicycle).is_none());
    }

    #[rstest]
    #[case(1.0, "1.00")]
    #[case(0.333_333, "0.33")]
    #[case(2.0 / 3.0, "0.67")]
    fn test_formatted_hours(#[case] hours: f64, #[case] expected: &str) {
        let estimate = TravelEstimate {
            label: "car".into(),
            icon: "🚗".into(),
            hours,
            distance_meters: 0.0,
            duration_seconds: 0.0,
        };
        assert_eq!(estimate.formatted_hours(), expected);
    }
}
