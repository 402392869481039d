//! Liveness endpoint (`GET /health`)
//!
//! Answers from in-process state only. Reachability of the document store
//! is the job of `GET /test`; here we only report what startup decided.

use axum::{extract::State, Json};
use moodmix_common::db::Persistence;
use moodmix_common::Mood;
use serde::Serialize;

use crate::AppState;

/// Whether recommendations are being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryState {
    Enabled,
    Disabled,
    Unavailable,
}

impl From<&Persistence> for HistoryState {
    fn from(persistence: &Persistence) -> Self {
        match persistence {
            Persistence::Disabled => HistoryState::Disabled,
            Persistence::Unavailable { .. } => HistoryState::Unavailable,
            Persistence::Ready(_) => HistoryState::Enabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub history: HistoryState,
    /// Moods the catalog holds
    pub moods: usize,
    pub radios: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let moods = Mood::ALL
        .into_iter()
        .filter(|mood| state.catalog.contains_mood(*mood))
        .count();

    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        history: HistoryState::from(state.assembler.persistence()),
        moods,
        radios: state.catalog.list_radios().len(),
    })
}
