//! JSON API consumed by the map frontend

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    card::DistanceCard,
    config::OfficeMapConfig,
    estimator::{TravelEstimate, estimate},
    models::{Coordinate, RouteLeg, TravelMode},
    rings::{RingOverlay, RingSet},
    routing::{RouteProvider, RouteRequest},
    sampler::generate_locations,
    theme::{MapOptions, MapTheme, PolylineStyle},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<OfficeMapConfig>,
    pub routes: Arc<dyn RouteProvider>,
}

impl AppState {
    pub fn new(config: OfficeMapConfig, routes: Arc<dyn RouteProvider>) -> Self {
        Self {
            config: Arc::new(config),
            routes,
        }
    }
}

#[derive(Deserialize)]
pub struct LocationsQuery {
    pub lat: f64,
    pub lng: f64,
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct EstimateQuery {
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Deserialize)]
pub struct RingsQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub extended: bool,
}

#[derive(Deserialize)]
pub struct MapOptionsQuery {
    #[serde(default)]
    pub dark: bool,
}

#[derive(Deserialize)]
pub struct RouteQuery {
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_lat: f64,
    pub to_lng: f64,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiEstimate {
    #[serde(flatten)]
    pub estimate: TravelEstimate,
    pub hours_text: String,
}

impl From<TravelEstimate> for ApiEstimate {
    fn from(estimate: TravelEstimate) -> Self {
        Self {
            hours_text: estimate.formatted_hours(),
            estimate,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiRoute {
    pub leg: RouteLeg,
    pub card: DistanceCard,
    pub text: String,
    pub polyline: PolylineStyle,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/locations", get(get_locations))
        .route("/estimate", get(get_estimate))
        .route("/rings", get(get_rings))
        .route("/map-options", get(get_map_options))
        .route("/route", get(get_route))
        .with_state(state)
}

async fn get_locations(
    Query(query): Query<LocationsQuery>,
) -> Result<Json<Vec<Coordinate>>, StatusCode> {
    let center = Coordinate::checked(query.lat, query.lng).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok(Json(sample(center, query.seed)))
}

fn sample(center: Coordinate, seed: Option<u64>) -> Vec<Coordinate> {
    match seed {
        Some(seed) => generate_locations(center, &mut StdRng::seed_from_u64(seed)),
        None => generate_locations(center, &mut rand::rng()),
    }
}

async fn get_estimate(Query(query): Query<EstimateQuery>) -> Response {
    match estimate(query.distance, query.duration, query.mode) {
        Some(estimate) => Json(ApiEstimate::from(estimate)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn get_rings(Query(query): Query<RingsQuery>) -> Result<Json<Vec<RingOverlay>>, StatusCode> {
    let office = Coordinate::checked(query.lat, query.lng).map_err(|_| StatusCode::BAD_REQUEST)?;
    let rings = if query.extended {
        RingSet::extended()
    } else {
        RingSet::standard()
    };
    Ok(Json(rings.overlays(office)))
}

async fn get_map_options(
    State(state): State<AppState>,
    Query(query): Query<MapOptionsQuery>,
) -> Json<MapOptions> {
    Json(MapTheme::from_dark_mode(query.dark).options(&state.config.map))
}

async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Response, StatusCode> {
    let origin =
        Coordinate::checked(query.from_lat, query.from_lng).map_err(|_| StatusCode::BAD_REQUEST)?;
    let destination =
        Coordinate::checked(query.to_lat, query.to_lng).map_err(|_| StatusCode::BAD_REQUEST)?;

    let leg = state
        .routes
        .route(&RouteRequest::driving(origin, destination))
        .await
        .map_err(|e| {
            tracing::warn!("Routing failed: {e:#}");
            StatusCode::BAD_GATEWAY
        })?;

    let Some(leg) = leg else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let Some(card) = DistanceCard::from_leg(&leg, query.mode) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    Ok(Json(ApiRoute {
        text: card.to_string(),
        leg,
        card,
        polyline: PolylineStyle::route(),
    })
    .into_response())
}
