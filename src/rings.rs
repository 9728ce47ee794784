//! Distance rings drawn around the office
//!
//! Three rings (10, 20 and 35 km) colour-code how far a marker is from the
//! destination. The extended set adds a fourth ring for very long commutes.

use serde::Serialize;

use crate::models::Coordinate;

/// Which band around the office a point falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceRing {
    Close,
    Middle,
    Far,
    VeryFar,
}

/// Drawing options for a ring, in the shape map SDKs expect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleStyle {
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub clickable: bool,
    pub draggable: bool,
    pub editable: bool,
    pub visible: bool,
    pub z_index: i32,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub fill_color: String,
}

impl CircleStyle {
    /// Base style with a single colour for stroke and fill
    fn colored(color: &str, z_index: i32) -> Self {
        Self {
            stroke_opacity: 0.5,
            stroke_weight: 2,
            clickable: false,
            draggable: false,
            editable: false,
            visible: true,
            z_index,
            fill_opacity: 0.05,
            stroke_color: color.to_string(),
            fill_color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingStyle {
    pub ring: DistanceRing,
    pub radius_meters: f64,
    pub options: CircleStyle,
}

/// A ring placed on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingOverlay {
    pub center: Coordinate,
    #[serde(flatten)]
    pub style: RingStyle,
}

/// Rings ordered from the innermost outwards
#[derive(Debug, Clone, PartialEq)]
pub struct RingSet {
    rings: Vec<RingStyle>,
}

impl RingSet {
    pub fn standard() -> Self {
        Self {
            rings: vec![
                ring(DistanceRing::Close, 10_000.0, "#8BC34A", 3),
                ring(DistanceRing::Middle, 20_000.0, "#FBC02D", 2),
                ring(DistanceRing::Far, 35_000.0, "#FF5252", 1),
            ],
        }
    }

    pub fn extended() -> Self {
        Self {
            rings: vec![
                ring(DistanceRing::Close, 10_000.0, "#8BC34A", 4),
                ring(DistanceRing::Middle, 20_000.0, "#FBC02D", 3),
                ring(DistanceRing::Far, 35_000.0, "#FF5252", 2),
                ring(DistanceRing::VeryFar, 50_000.0, "#4f88e3", 1),
            ],
        }
    }

    pub fn rings(&self) -> &[RingStyle] {
        &self.rings
    }

    /// Place every ring around `office`
    pub fn overlays(&self, office: Coordinate) -> Vec<RingOverlay> {
        self.rings
            .iter()
            .map(|style| RingOverlay {
                center: office,
                style: style.clone(),
            })
            .collect()
    }

    /// Innermost ring containing `point`, `None` when it lies outside all of them
    pub fn classify(&self, office: &Coordinate, point: &Coordinate) -> Option<DistanceRing> {
        let meters = office.distance_meters(point);
        self.rings
            .iter()
            .find(|style| meters <= style.radius_meters)
            .map(|style| style.ring)
    }
}

impl Default for RingSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn ring(ring: DistanceRing, radius_meters: f64, color: &str, z_index: i32) -> RingStyle {
    RingStyle {
        ring,
        radius_meters,
        options: CircleStyle::colored(color, z_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_standard_rings() {
        let set = RingSet::standard();
        let radii: Vec<f64> = set.rings().iter().map(|r| r.radius_meters).collect();
        assert_eq!(radii, vec![10_000.0, 20_000.0, 35_000.0]);

        let close = &set.rings()[0].options;
        assert_eq!(close.stroke_color, "#8BC34A");
        assert_eq!(close.z_index, 3);
        assert_eq!(close.fill_opacity, 0.05);
        assert!(!close.clickable && close.visible);
    }

    #[test]
    fn test_extended_rings_shift_z_index() {
        let set = RingSet::extended();
        let z: Vec<i32> = set.rings().iter().map(|r| r.options.z_index).collect();
        assert_eq!(z, vec![4, 3, 2, 1]);
        assert_eq!(set.rings()[3].options.fill_color, "#4f88e3");
    }

    // 0.01 degree of latitude is about 1.1 km
    #[rstest]
    #[case(0.05, Some(DistanceRing::Close))]
    #[case(0.15, Some(DistanceRing::Middle))]
    #[case(0.25, Some(DistanceRing::Far))]
    #[case(0.40, None)]
    fn test_classify_standard(#[case] lat_offset: f64, #[case] expected: Option<DistanceRing>) {
        let office = Coordinate::new(0.0, 0.0);
        let point = Coordinate::new(lat_offset, 0.0);
        assert_eq!(RingSet::standard().classify(&office, &point), expected);
    }

    #[test]
    fn test_classify_extended_catches_very_far() {
        let office = Coordinate::new(0.0, 0.0);
        let point = Coordinate::new(0.40, 0.0);
        assert_eq!(
            RingSet::extended().classify(&office, &point),
            Some(DistanceRing::VeryFar)
        );
    }

    #[test]
    fn test_overlays_are_centred_on_office() {
        let office = Coordinate::new(52.37, 4.89);
        let overlays = RingSet::standard().overlays(office);
        assert_eq!(overlays.len(), 3);
        assert!(overlays.iter().all(|o| o.center == office));

        let json = serde_json::to_value(&overlays[0]).unwrap();
        assert_eq!(json["radius_meters"], 10_000.0);
        assert_eq!(json["options"]["strokeColor"], "#8BC34A");
        assert_eq!(json["center"]["lat"], 52.37);
    }
}
