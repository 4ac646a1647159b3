mod gesture;
mod location;
mod notice;
mod pin;
mod route;

pub use gesture::{GestureState, LongPress, ScreenPoint};
pub use location::{Coordinates, Region};
pub use notice::Notice;
pub use pin::{Annotation, Pin};
pub use route::{Route, RouteOverlay, RouteRequest, Segment, SegmentKey, TransportMode};
