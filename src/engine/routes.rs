use uuid::Uuid;

use super::Session;
use crate::{
    entities::{Route, RouteOverlay, RouteRequest, Segment, TransportMode},
    error::{upstream_error, Error},
    external::{DirectionsProvider, DirectionsRequest},
    surface::{MapSurface, OverlayLevel},
};

/// Asks the provider for one segment and keeps its first candidate. A single
/// attempt; failures are handed back to the caller.
#[tracing::instrument(skip(provider))]
pub async fn request_route(
    provider: &dyn DirectionsProvider,
    request: &RouteRequest,
) -> Result<Route, Error> {
    let routes = provider.directions(DirectionsRequest::from(request)).await?;

    routes
        .into_iter()
        .next()
        .ok_or_else(|| upstream_error("no route between pins"))
}

#[derive(Clone, Debug, PartialEq)]
pub enum RouteApplied {
    Drawn(Uuid),
    Stale,
    Failed(Error),
}

impl<S: MapSurface> Session<S> {
    /// Switches the travel profile. Existing overlays were computed for the
    /// old mode, so they are dropped and every segment is requested again.
    #[tracing::instrument(skip(self))]
    pub fn set_transport_mode(&mut self, mode: TransportMode) -> Vec<RouteRequest> {
        let changed = mode != self.transport_mode;
        self.transport_mode = mode;
        self.redraw_annotations();

        if !changed {
            return Vec::new();
        }

        self.pending.clear();

        let overlay_ids: Vec<Uuid> = self
            .overlays
            .drain()
            .map(|(_, overlay)| overlay.id)
            .collect();
        if !overlay_ids.is_empty() {
            self.surface.remove_overlays(&overlay_ids);
        }

        let requests: Vec<RouteRequest> = self
            .segments()
            .into_iter()
            .map(|segment| self.track_request(segment))
            .collect();

        tracing::info!(%mode, requests = requests.len(), "transport mode changed");
        requests
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.pins
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect()
    }

    /// Applies the outcome of a request dispatched earlier. Results for
    /// tickets no longer pending belong to segments that are gone.
    #[tracing::instrument(skip(self, result))]
    pub fn apply_route(&mut self, ticket: Uuid, result: Result<Route, Error>) -> RouteApplied {
        let request = match self.pending.remove(&ticket) {
            Some(request) => request,
            None => {
                tracing::debug!(%ticket, "discarding result for a segment that no longer exists");
                return RouteApplied::Stale;
            }
        };

        let route = match result {
            Ok(route) => route,
            Err(err) => {
                tracing::error!(%ticket, "error getting directions: {}", err);
                return RouteApplied::Failed(err);
            }
        };

        let key = request.segment.key();
        if let Some(previous) = self.overlays.remove(&key) {
            self.surface.remove_overlay(previous.id);
        }

        let overlay = RouteOverlay::new(&request, route);
        let id = overlay.id;
        self.surface.add_overlay(&overlay, OverlayLevel::AboveRoads);
        self.overlays.insert(key, overlay);

        RouteApplied::Drawn(id)
    }
}
