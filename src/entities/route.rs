use chrono::{DateTime, Utc};
use geo_types::LineString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::entities::{Coordinates, Pin};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
    #[default]
    Driving,
}

impl TransportMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => Ok(Self::Walking),
            "driving" => Ok(Self::Driving),
            _ => Err(invalid_input_error()),
        }
    }
}

/// Two adjacent pins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub source: Pin,
    pub destination: Pin,
}

impl Segment {
    pub fn new(source: Pin, destination: Pin) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn key(&self) -> SegmentKey {
        SegmentKey {
            source: self.source.id,
            destination: self.destination.id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub source: Uuid,
    pub destination: Uuid,
}

impl SegmentKey {
    pub fn touches(&self, pin_id: Uuid) -> bool {
        self.source == pin_id || self.destination == pin_id
    }
}

/// An in-flight request for one segment. The ticket ties the provider's answer
/// back to the request that asked for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteRequest {
    pub ticket: Uuid,
    pub segment: Segment,
    pub mode: TransportMode,
}

impl RouteRequest {
    pub fn new(segment: Segment, mode: TransportMode) -> Self {
        Self {
            ticket: Uuid::new_v4(),
            segment,
            mode,
        }
    }

    pub fn source(&self) -> Coordinates {
        self.segment.source.coordinates
    }

    pub fn destination(&self) -> Coordinates {
        self.segment.destination.coordinates
    }
}

/// One route candidate returned by a directions provider.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub path: LineString<f64>,
    pub distance_meters: f64,
    pub expected_travel_time_secs: f64,
}

impl Route {
    pub fn coordinates(&self) -> Vec<Coordinates> {
        self.path.coords().map(|c| Coordinates::from(*c)).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
    pub id: Uuid,
    pub segment: Segment,
    pub mode: TransportMode,
    pub route: Route,
    pub received_at: DateTime<Utc>,
}

impl RouteOverlay {
    pub fn new(request: &RouteRequest, route: Route) -> Self {
        Self {
            id: Uuid::new_v4(),
            segment: request.segment,
            mode: request.mode,
            route,
            received_at: Utc::now(),
        }
    }
}
