use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Route,
    error::{invalid_input_error, upstream_error, Error},
    external::{polyline, DirectionsProvider, DirectionsRequest},
};

pub const DEFAULT_API_BASE: &str = "maps.googleapis.com";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
    error_message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    overview_polyline: EncodedPolyline,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Leg {
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TextValue {
    value: f64,
}

impl TryFrom<DirectionsRoute> for Route {
    type Error = Error;

    fn try_from(route: DirectionsRoute) -> Result<Self, Self::Error> {
        let path = polyline::decode(&route.overview_polyline.points, polyline::GOOGLE_PRECISION)?;

        let distance_meters = route
            .legs
            .iter()
            .filter_map(|leg| leg.distance.as_ref())
            .map(|d| d.value)
            .sum();
        let expected_travel_time_secs = route
            .legs
            .iter()
            .filter_map(|leg| leg.duration.as_ref())
            .map(|d| d.value)
            .sum();

        Ok(Route {
            path,
            distance_meters,
            expected_travel_time_secs,
        })
    }
}

/// Google Directions API client.
#[derive(Clone, Debug)]
pub struct GoogleDirections {
    client: reqwest::Client,
    api_base: String,
    key: String,
}

impl GoogleDirections {
    pub fn new(api_base: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            key: key.into(),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let api_base = env::var("GOOGLE_MAPS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let key = env::var("GOOGLE_MAPS_API_KEY")?;

        Ok(Self::new(api_base, key))
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirections {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<Route>, Error> {
        let url = format!("https://{}/maps/api/directions/json", self.api_base);
        let origin: String = request.source.into();
        let destination: String = request.destination.into();

        let res = self
            .client
            .get(url)
            .query(&[("key", self.key.as_str())])
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("mode", request.mode.name())])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error(format!("directions returned HTTP {}", status_code)));
        }

        let data: Response = res.json().await?;
        parse_response(data)
    }
}

fn parse_response(data: Response) -> Result<Vec<Route>, Error> {
    match data.status.as_str() {
        "OK" => data.routes.into_iter().map(Route::try_from).collect(),
        "ZERO_RESULTS" => Ok(Vec::new()),
        status => Err(upstream_error(format!(
            "directions status {}: {}",
            status,
            data.error_message.unwrap_or_default()
        ))),
    }
}
