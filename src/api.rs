use async_trait::async_trait;

use crate::engine::MapSnapshot;
use crate::entities::{Coordinates, LongPress, Pin, TransportMode};
use crate::error::Error;

#[async_trait]
pub trait PinAPI {
    /// `None` while the press is still in progress.
    async fn long_press(&self, event: LongPress) -> Result<Option<Pin>, Error>;
    async fn add_pin(&self, coordinates: Coordinates) -> Result<Pin, Error>;
    async fn list_pins(&self) -> Result<Vec<Pin>, Error>;
    async fn delete_last_pin(&self) -> Result<Pin, Error>;
    async fn delete_all_pins(&self) -> Result<usize, Error>;
}

#[async_trait]
pub trait TransportAPI {
    async fn set_transport_mode(&self, mode: TransportMode) -> Result<TransportMode, Error>;
}

#[async_trait]
pub trait MapAPI {
    async fn update_user_location(&self, coordinates: Coordinates) -> Result<(), Error>;
    async fn snapshot(&self) -> Result<MapSnapshot, Error>;
}

pub trait API: PinAPI + TransportAPI + MapAPI {}
