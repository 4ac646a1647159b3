use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: Uuid,
    pub coordinates: Coordinates,
}

impl Pin {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
        }
    }
}

/// Point marker handed to the display surface for one pin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub pin_id: Uuid,
    pub coordinates: Coordinates,
}

impl Annotation {
    pub fn for_pin(pin: &Pin) -> Self {
        Self {
            id: Uuid::new_v4(),
            pin_id: pin.id,
            coordinates: pin.coordinates,
        }
    }
}
