use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::{LongPress, Pin};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LongPressResponse {
    pin: Option<Pin>,
}

pub async fn long_press(
    Extension(api): Extension<DynAPI>,
    Json(event): Json<LongPress>,
) -> Result<Json<LongPressResponse>, Error> {
    let pin = api.long_press(event).await?;

    Ok(LongPressResponse { pin }.into())
}
