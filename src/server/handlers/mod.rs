pub mod gestures;
pub mod map;
pub mod pins;
pub mod transport;
