use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Session, SessionState};
use crate::{
    entities::{Annotation, Coordinates, Pin, Region, RouteOverlay, Segment, TransportMode},
    surface::MapSurface,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub id: Uuid,
    pub source_pin_id: Uuid,
    pub destination_pin_id: Uuid,
    pub mode: TransportMode,
    pub path: Vec<Coordinates>,
    pub distance_meters: f64,
    pub expected_travel_time_secs: f64,
    pub received_at: DateTime<Utc>,
}

impl From<&RouteOverlay> for OverlaySnapshot {
    fn from(overlay: &RouteOverlay) -> Self {
        Self {
            id: overlay.id,
            source_pin_id: overlay.segment.source.id,
            destination_pin_id: overlay.segment.destination.id,
            mode: overlay.mode,
            path: overlay.route.coordinates(),
            distance_meters: overlay.route.distance_meters,
            expected_travel_time_secs: overlay.route.expected_travel_time_secs,
            received_at: overlay.received_at,
        }
    }
}

/// Read-only view of a session, overlays ordered along the pins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub state: SessionState,
    pub transport_mode: TransportMode,
    pub pins: Vec<Pin>,
    pub annotations: Vec<Annotation>,
    pub overlays: Vec<OverlaySnapshot>,
    pub pending_routes: usize,
    pub region: Option<Region>,
}

impl<S: MapSurface> Session<S> {
    pub fn snapshot(&self) -> MapSnapshot {
        let overlays = self
            .segments()
            .iter()
            .map(Segment::key)
            .filter_map(|key| self.overlays.get(&key))
            .map(OverlaySnapshot::from)
            .collect();

        MapSnapshot {
            state: self.state(),
            transport_mode: self.transport_mode,
            pins: self.pins.clone(),
            annotations: self.annotations.clone(),
            overlays,
            pending_routes: self.pending.len(),
            region: self.region,
        }
    }
}
