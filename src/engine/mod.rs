mod pins;
mod routes;
pub mod runtime;
mod snapshot;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::{
        Annotation, Coordinates, Pin, Region, RouteOverlay, RouteRequest, Segment, SegmentKey,
        TransportMode,
    },
    surface::{MapSurface, TrackingMode},
};

pub use pins::{PinAdded, PinRemoved};
pub use routes::{request_route, RouteApplied};
pub use runtime::{spawn, SessionHandle};
pub use snapshot::{MapSnapshot, OverlaySnapshot};

pub const MAX_PINS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Partial,
    Routed { at_capacity: bool },
}

/// Pins, their annotations and the route overlays between them for one map
/// screen. Every mutation of the surface goes through here.
pub struct Session<S> {
    surface: S,
    pins: Vec<Pin>,
    annotations: Vec<Annotation>,
    overlays: HashMap<SegmentKey, RouteOverlay>,
    pending: HashMap<Uuid, RouteRequest>,
    transport_mode: TransportMode,
    region: Option<Region>,
}

impl<S: MapSurface> Session<S> {
    pub fn new(mut surface: S, transport_mode: TransportMode) -> Self {
        surface.set_tracking_mode(TrackingMode::Follow);

        Self {
            surface,
            pins: Vec::with_capacity(MAX_PINS),
            annotations: Vec::with_capacity(MAX_PINS),
            overlays: HashMap::new(),
            pending: HashMap::new(),
            transport_mode,
            region: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.pins.len() {
            0 => SessionState::Empty,
            1 => SessionState::Partial,
            n => SessionState::Routed {
                at_capacity: n >= MAX_PINS,
            },
        }
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Recenters the visible region on the user.
    #[tracing::instrument(skip(self))]
    pub fn user_location_updated(&mut self, coordinates: Coordinates) {
        let region = Region::around(coordinates);
        self.region = Some(region);
        self.surface.set_region(region);
    }

    fn track_request(&mut self, segment: Segment) -> RouteRequest {
        let request = RouteRequest::new(segment, self.transport_mode);
        self.pending.insert(request.ticket, request);
        request
    }
}
