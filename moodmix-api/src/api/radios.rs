//! Radio directory

use axum::{extract::State, Json};
use moodmix_common::RadioStation;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RadiosResponse {
    pub radios: Vec<RadioStation>,
}

/// GET /api/radios
///
/// Full station list in catalog order.
pub async fn list_radios(State(state): State<AppState>) -> Json<RadiosResponse> {
    Json(RadiosResponse {
        radios: state.catalog.list_radios().to_vec(),
    })
}
