//! Travel modes and route legs as reported by the routing service

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How the user intends to cover a route leg.
///
/// Parsed from the tags `car`, `bike`, `bicycle` and `onfoot`; every other tag
/// maps to [`TravelMode::Unknown`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelMode {
    #[default]
    Car,
    Bike,
    Bicycle,
    OnFoot,
    Unknown,
}

impl TravelMode {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "car" => TravelMode::Car,
            "bike" => TravelMode::Bike,
            "bicycle" => TravelMode::Bicycle,
            "onfoot" => TravelMode::OnFoot,
            _ => TravelMode::Unknown,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bike",
            TravelMode::Bicycle => "bicycle",
            TravelMode::OnFoot => "onfoot",
            TravelMode::Unknown => "unknown",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bike => "bike",
            TravelMode::Bicycle => "bicycle",
            TravelMode::OnFoot => "on foot",
            TravelMode::Unknown => "unknown mode",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TravelMode::Car => "🚗",
            TravelMode::Bike => "🚲",
            TravelMode::Bicycle => "🚴",
            TravelMode::OnFoot => "🚶",
            TravelMode::Unknown => "",
        }
    }

    /// Assumed average speed in meters per hour.
    ///
    /// `None` for car, which takes the routing service's duration instead, and
    /// for unknown modes.
    pub fn assumed_speed(&self) -> Option<f64> {
        match self {
            TravelMode::Bike => Some(20_000.0),
            TravelMode::Bicycle => Some(15_000.0),
            TravelMode::OnFoot => Some(5_000.0),
            TravelMode::Car | TravelMode::Unknown => None,
        }
    }
}

impl From<&str> for TravelMode {
    fn from(value: &str) -> Self {
        TravelMode::from_tag(value)
    }
}

impl From<String> for TravelMode {
    fn from(value: String) -> Self {
        TravelMode::from_tag(&value)
    }
}

impl From<TravelMode> for String {
    fn from(value: TravelMode) -> Self {
        value.tag().to_string()
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single measurement on a leg, with the routing service's own rendering of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: f64,
    pub text: Option<String>,
}

impl Measure {
    pub fn new(value: f64) -> Self {
        Self { value, text: None }
    }

    pub fn with_text(value: f64, text: impl Into<String>) -> Self {
        Self {
            value,
            text: Some(text.into()),
        }
    }
}

/// One distance/duration segment of a computed route.
///
/// Distance is in meters, duration in seconds. Either may be missing when the
/// routing service could not measure it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
}

impl RouteLeg {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance: Some(Measure::new(distance_meters)),
            duration: Some(Measure::new(duration_seconds)),
        }
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.distance.as_ref().map(|d| d.value)
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration.as_ref().map(|d| d.value)
    }

    /// The routing service's distance text, or a locally formatted one
    pub fn distance_text(&self) -> Option<String> {
        let distance = self.distance.as_ref()?;
        Some(
            distance
                .text
                .clone()
                .unwrap_or_else(|| format_distance(distance.value)),
        )
    }
}

/// Render meters the way map services do: `850 m` below a kilometer, `12.3 km` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("car", TravelMode::Car)]
    #[case("bike", TravelMode::Bike)]
    #[case("bicycle", TravelMode::Bicycle)]
    #[case("onfoot", TravelMode::OnFoot)]
    #[case("zeppelin", TravelMode::Unknown)]
    #[case("Car", TravelMode::Unknown)]
    #[case("", TravelMode::Unknown)]
    fn test_from_tag(#[case] tag: &str, #[case] expected: TravelMode) {
        assert_eq!(TravelMode::from_tag(tag), expected);
    }

    #[test]
    fn test_labels_and_icons() {
        assert_eq!(TravelMode::OnFoot.label(), "on foot");
        assert_eq!(TravelMode::OnFoot.icon(), "🚶");
        assert_eq!(TravelMode::Unknown.label(), "unknown mode");
        assert_eq!(TravelMode::Unknown.icon(), "");
    }

    #[test]
    fn test_mode_serde_uses_tags() {
        let json = serde_json::to_string(&TravelMode::OnFoot).unwrap();
        assert_eq!(json, r#""onfoot""#);
        let mode: TravelMode = serde_json::from_str(r#""bicycle""#).unwrap();
        assert_eq!(mode, TravelMode::Bicycle);
        let mode: TravelMode = serde_json::from_str(r#""hovercraft""#).unwrap();
        assert_eq!(mode, TravelMode::Unknown);
    }

    #[rstest]
    #[case(850.0, "850 m")]
    #[case(1000.0, "1.0 km")]
    #[case(12_345.0, "12.3 km")]
    fn test_format_distance(#[case] meters: f64, #[case] expected: &str) {
        assert_eq!(format_distance(meters), expected);
    }

    #[test]
    fn test_distance_text_prefers_service_text() {
        let leg = RouteLeg {
            distance: Some(Measure::with_text(12_345.0, "12.4 km")),
            duration: None,
        };
        assert_eq!(leg.distance_text().as_deref(), Some("12.4 km"));

        let leg = RouteLeg::new(12_345.0, 600.0);
        assert_eq!(leg.distance_text().as_deref(), Some("12.3 km"));

        assert_eq!(RouteLeg::default().distance_text(), None);
    }
}
