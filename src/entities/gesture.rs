use serde::{Deserialize, Serialize};

/// Point in the map view's coordinate space, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Began,
    Changed,
    Ended,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LongPress {
    #[serde(flatten)]
    pub point: ScreenPoint,
    pub state: GestureState,
}

impl LongPress {
    pub fn is_complete(&self) -> bool {
        self.state == GestureState::Ended
    }
}
