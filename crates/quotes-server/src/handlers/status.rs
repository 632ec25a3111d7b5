//! Store status handler

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use quotes_core::StoreStatus;

pub async fn status(State(state): State<AppState>) -> Result<Json<StoreStatus>, ApiError> {
    let status = state
        .store
        .status()
        .await
        .map_err(ApiError::store("Error getting database status"))?;
    Ok(Json(status))
}
