use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Pin};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
pub struct DeleteAllResponse {
    removed: usize,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Pin>, Error> {
    let pin = api
        .add_pin(Coordinates::new(params.latitude, params.longitude))
        .await?;

    Ok(pin.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Pin>>, Error> {
    let pins = api.list_pins().await?;

    Ok(pins.into())
}

pub async fn delete_last(Extension(api): Extension<DynAPI>) -> Result<Json<Pin>, Error> {
    let pin = api.delete_last_pin().await?;

    Ok(pin.into())
}

pub async fn delete_all(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<DeleteAllResponse>, Error> {
    let removed = api.delete_all_pins().await?;

    Ok(DeleteAllResponse { removed }.into())
}
