use std::{env, fmt::Debug, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    OfficeMapError,
    config::RoutingConfig,
    models::{Coordinate, Measure, RouteLeg, format_distance},
};

/// Vehicle profile passed to the routing service.
///
/// Only driving routes are requested; other travel modes reuse the driving
/// distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    #[default]
    Car,
}

impl RoutingProfile {
    fn as_str(&self) -> &'static str {
        match self {
            RoutingProfile::Car => "car",
        }
    }
}

/// A route from a marker to the office
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub profile: RoutingProfile,
}

impl RouteRequest {
    /// Driving route, the only kind the map asks for
    pub fn driving(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            profile: RoutingProfile::Car,
        }
    }
}

/// External routing service
#[async_trait]
pub trait RouteProvider: Send + Sync + Debug {
    /// First leg of the best route, `None` when the service found no path
    async fn route(&self, request: &RouteRequest) -> Result<Option<RouteLeg>>;
}

/// GraphHopper route API client
pub struct GraphHopperClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl Debug for GraphHopperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHopperClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GraphHopperClient {
    pub fn new(config: &RoutingConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => env::var("GRAPHHOPPER_API_KEY")
                .context("Missing GRAPHHOPPER_API_KEY env var")?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("OfficeMap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route?point={},{}&point={},{}&profile={}&points_encoded=false&calc_points=false&key={}",
            self.base_url,
            request.origin.lat,
            request.origin.lng,
            request.destination.lat,
            request.destination.lng,
            request.profile.as_str(),
            self.api_key
        )
    }
}

#[async_trait]
impl RouteProvider for GraphHopperClient {
    #[instrument(skip(self))]
    async fn route(&self, request: &RouteRequest) -> Result<Option<RouteLeg>> {
        tracing::debug!("Calling the routing API");
        let response = self
            .client
            .get(self.route_url(request))
            .send()
            .await
            .map_err(|e| OfficeMapError::routing(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OfficeMapError::routing(format!(
                "route API returned {}",
                response.status()
            ))
            .into());
        }

        let response: ApiResponse = response
            .json()
            .await
            .context("Failed to parse routing response")?;

        let leg = response.paths.first().map(RouteLeg::from);
        if leg.is_none() {
            tracing::info!("No paths in response");
        }
        Ok(leg)
    }
}

#[derive(Debug, Deserialize)]
struct PathResponse {
    distance: Option<f64>,
    /// milliseconds
    time: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    paths: Vec<PathResponse>,
}

impl From<&PathResponse> for RouteLeg {
    fn from(path: &PathResponse) -> Self {
        RouteLeg {
            distance: path
                .distance
                .map(|meters| Measure::with_text(meters, format_distance(meters))),
            duration: path.time.map(|ms| Measure::new(ms as f64 / 1000.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    fn client() -> GraphHopperClient {
        let config = RoutingConfig {
            api_key: Some("secret".to_string()),
            base_url: "https://routing.example.com/api/1/".to_string(),
            ..RoutingConfig::default()
        };
        GraphHopperClient::new(&config).unwrap()
    }

    #[test]
    fn test_route_url() {
        let request =
            RouteRequest::driving(Coordinate::new(52.1, 4.2), Coordinate::new(52.3, 4.9));
        assert_eq!(
            client().route_url(&request),
            "https://routing.example.com/api/1/route?point=52.1,4.2&point=52.3,4.9&profile=car&points_encoded=false&calc_points=false&key=secret"
        );
    }

    #[test]
    fn test_path_to_leg() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"paths":[{"distance":12345.6,"time":900000}]}"#).unwrap();
        let leg = RouteLeg::from(&response.paths[0]);
        assert_eq!(leg.distance_meters(), Some(12345.6));
        assert_eq!(leg.duration_seconds(), Some(900.0));
        assert_eq!(leg.distance_text().as_deref(), Some("12.3 km"));
    }

    #[test]
    fn test_path_without_time() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"paths":[{"distance":500.0}]}"#).unwrap();
        let leg = RouteLeg::from(&response.paths[0]);
        assert_eq!(leg.duration, None);
    }

    #[test]
    fn test_driving_request() {
        let request = RouteRequest::driving(Coordinate::default(), Coordinate::new(1.0, 1.0));
        assert_eq!(request.profile, RoutingProfile::Car);
    }

    async fn one_path() -> Json<Value> {
        Json(json!({"paths": [{"distance": 20000.0, "time": 1800000}]}))
    }

    async fn no_paths() -> Json<Value> {
        Json(json!({"paths": []}))
    }

    /// Local stand-in for the route API, one prefix per canned answer
    async fn serve_routes() -> SocketAddr {
        let app = Router::new()
            .route("/ok/route", get(one_path))
            .route("/empty/route", get(no_paths))
            .route("/fail/route", get(|| async { StatusCode::BAD_REQUEST }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        addr
    }

    fn local_client(base_url: String) -> GraphHopperClient {
        let config = RoutingConfig {
            api_key: Some("secret".to_string()),
            base_url,
            max_retries: 0,
            ..RoutingConfig::default()
        };
        GraphHopperClient::new(&config).unwrap()
    }

    fn request() -> RouteRequest {
        RouteRequest::driving(Coordinate::new(52.1, 4.5), Coordinate::new(52.37, 4.89))
    }

    #[tokio::test]
    async fn test_route_returns_first_leg() {
        let addr = serve_routes().await;
        let leg = local_client(format!("http://{addr}/ok"))
            .route(&request())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(leg.distance_meters(), Some(20000.0));
        assert_eq!(leg.duration_seconds(), Some(1800.0));
    }

    #[tokio::test]
    async fn test_route_without_paths_is_none() {
        let addr = serve_routes().await;
        let leg = local_client(format!("http://{addr}/empty"))
            .route(&request())
            .await
            .unwrap();
        assert!(leg.is_none());
    }

    #[tokio::test]
    async fn test_route_error_status_is_routing_error() {
        let addr = serve_routes().await;
        let err = local_client(format!("http://{addr}/fail"))
            .route(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OfficeMapError>(),
            Some(OfficeMapError::Routing { .. })
        ));
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn test_route_unreachable_is_routing_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_client(format!("http://{addr}"))
            .route(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OfficeMapError>(),
            Some(OfficeMapError::Routing { .. })
        ));
    }
}
