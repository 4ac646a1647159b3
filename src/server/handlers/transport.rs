use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::TransportMode;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct UpdateParams {
    mode: TransportMode,
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<UpdateParams>,
) -> Result<Json<UpdateParams>, Error> {
    let mode = api.set_transport_mode(params.mode).await?;

    Ok(UpdateParams { mode }.into())
}
