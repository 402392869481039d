//! Mood-based suggestions

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::recommend::{build_suggestions, resolve_mood, SuggestResponse};
use crate::AppState;

/// Request body for the suggest endpoint
///
/// A body without a string `mood` is rejected by the `Json` extractor.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub mood: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /api/agent/suggest
///
/// Never fails for business reasons: unknown moods fall back to the default
/// and history recording problems are swallowed by the assembler.
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Json<SuggestResponse> {
    let mood = resolve_mood(Some(&request.mood), &state.aliases, &state.catalog);
    debug!(requested = %request.mood, resolved = %mood, "Resolved mood");

    let suggestions = build_suggestions(mood, &state.catalog);
    let response = state
        .assembler
        .assemble(mood, request.message, suggestions)
        .await;

    Json(response)
}
