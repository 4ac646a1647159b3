pub mod google_maps;
pub mod local;
pub mod polyline;

use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{Coordinates, Route, RouteRequest, TransportMode};
use crate::error::Error;

pub use google_maps::GoogleDirections;
pub use local::LocalDirections;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionsRequest {
    pub source: Coordinates,
    pub destination: Coordinates,
    pub mode: TransportMode,
}

impl From<&RouteRequest> for DirectionsRequest {
    fn from(request: &RouteRequest) -> Self {
        Self {
            source: request.source(),
            destination: request.destination(),
            mode: request.mode,
        }
    }
}

/// Computes routes between two coordinates. Candidates come back in the
/// provider's own preference order.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<Route>, Error>;
}

pub type DynDirections = Arc<dyn DirectionsProvider>;
