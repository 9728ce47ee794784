//! Map session state
//!
//! Holds what the map screen shows at any moment: where the user is, which
//! office they picked, the markers scattered around them and the last route.

use tracing::debug;

use crate::card::DistanceCard;
use crate::config::MapConfig;
use crate::models::{Coordinate, RouteLeg, TravelMode};
use crate::rings::{RingOverlay, RingSet};
use crate::routing::RouteRequest;
use crate::sampler::{RandomSource, generate_locations};
use crate::theme::{MapOptions, MapTheme};

pub struct MapSession<R: RandomSource> {
    rng: R,
    rings: RingSet,
    center: Coordinate,
    office: Option<Coordinate>,
    dark_mode: bool,
    markers: Vec<Coordinate>,
    leg: Option<RouteLeg>,
    card_open: bool,
}

impl<R: RandomSource> MapSession<R> {
    /// Session centred on `{0, 0}` until a position is known
    pub fn new(mut rng: R) -> Self {
        let center = Coordinate::default();
        let markers = generate_locations(center, &mut rng);
        Self {
            rng,
            rings: RingSet::standard(),
            center,
            office: None,
            dark_mode: false,
            markers,
            leg: None,
            card_open: true,
        }
    }

    pub fn with_rings(mut self, rings: RingSet) -> Self {
        self.rings = rings;
        self
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn office(&self) -> Option<Coordinate> {
        self.office
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn leg(&self) -> Option<&RouteLeg> {
        self.leg.as_ref()
    }

    /// Move the map center. Markers are only resampled when it actually moves.
    pub fn set_center(&mut self, center: Coordinate) {
        if center == self.center {
            return;
        }
        debug!("Center moved to {}", center.format_coordinates());
        self.center = center;
        self.markers = generate_locations(center, &mut self.rng);
    }

    pub fn select_office(&mut self, office: Coordinate) {
        debug!("Office selected at {}", office.format_coordinates());
        self.office = Some(office);
    }

    /// Markers are hidden until an office is selected
    pub fn visible_markers(&self) -> &[Coordinate] {
        match self.office {
            Some(_) => &self.markers,
            None => &[],
        }
    }

    pub fn ring_overlays(&self) -> Vec<RingOverlay> {
        self.office
            .map(|office| self.rings.overlays(office))
            .unwrap_or_default()
    }

    /// Driving request from a clicked marker to the office, `None` without an office
    pub fn route_request(&self, house: Coordinate) -> Option<RouteRequest> {
        self.office.map(|office| RouteRequest::driving(house, office))
    }

    /// Store a freshly computed leg; the distance card opens again
    pub fn apply_route(&mut self, leg: RouteLeg) {
        self.leg = Some(leg);
        self.card_open = true;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_card(&mut self) {
        self.card_open = !self.card_open;
    }

    pub fn theme(&self) -> MapTheme {
        MapTheme::from_dark_mode(self.dark_mode)
    }

    pub fn map_options(&self, config: &MapConfig) -> MapOptions {
        self.theme().options(config)
    }

    /// Card for the current leg, `None` before any route or when the leg is unmeasured
    pub fn distance_card(&self, mode: TravelMode) -> Option<DistanceCard> {
        let mut card = DistanceCard::from_leg(self.leg.as_ref()?, mode)?;
        card.is_open = self.card_open;
        Some(card)
    }
}
