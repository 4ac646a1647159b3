use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::engine::MapSnapshot;
use crate::entities::Coordinates;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<MapSnapshot>, Error> {
    let snapshot = api.snapshot().await?;

    Ok(snapshot.into())
}

pub async fn update_user_location(
    Extension(api): Extension<DynAPI>,
    Json(coordinates): Json<Coordinates>,
) -> Result<StatusCode, Error> {
    api.update_user_location(coordinates).await?;

    Ok(StatusCode::NO_CONTENT)
}
