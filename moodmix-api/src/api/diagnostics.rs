//! Persistence diagnostics (`GET /test`)
//!
//! Reports whether the document store is configured, initialized and
//! reachable. Every failure is turned into a status string; the endpoint
//! always answers 200 OK and never writes anything.

use std::fmt;
use std::time::Duration;

use axum::{extract::State, Json};
use moodmix_common::config::ConnectionEnv;
use moodmix_common::db::Persistence;
use serde::Serialize;

use crate::AppState;

/// Most collection names listed by the connectivity check
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Error text is cut to this many characters in status strings
const ERROR_EXCERPT_CHARS: usize = 50;

/// Diagnostics response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Store state as observed by the probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// No store configured at all
    NotFound,
    /// Configured but never opened
    NotInitialized,
    /// Connectivity check succeeded
    Working,
    /// Opened, but the connectivity check returned an error
    ConnectedWithError(String),
    /// Connectivity check did not complete (timeout or crash)
    Error(String),
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseStatus::NotFound => {
                f.write_str("❌ Database module not found (set DATABASE_URL first)")
            }
            DatabaseStatus::NotInitialized => f.write_str("⚠️  Available but not initialized"),
            DatabaseStatus::Working => f.write_str("✅ Connected & Working"),
            DatabaseStatus::ConnectedWithError(e) => {
                write!(f, "⚠️  Connected but Error: {}", excerpt(e))
            }
            DatabaseStatus::Error(e) => write!(f, "❌ Error: {}", excerpt(e)),
        }
    }
}

fn excerpt(message: &str) -> String {
    message.chars().take(ERROR_EXCERPT_CHARS).collect()
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

/// Inspect the persistence collaborator
pub async fn probe(persistence: &Persistence, env: ConnectionEnv, timeout: Duration) -> DiagnosticsReport {
    let (status, connected, collections) = match persistence {
        Persistence::Disabled => (DatabaseStatus::NotFound, false, Vec::new()),
        Persistence::Unavailable { .. } => (DatabaseStatus::NotInitialized, false, Vec::new()),
        Persistence::Ready(store) => {
            let store = store.clone();
            let check = tokio::spawn(async move {
                tokio::time::timeout(timeout, store.list_collection_names(MAX_LISTED_COLLECTIONS))
                    .await
            });

            match check.await {
                Ok(Ok(Ok(mut names))) => {
                    names.truncate(MAX_LISTED_COLLECTIONS);
                    (DatabaseStatus::Working, true, names)
                }
                Ok(Ok(Err(e))) => (DatabaseStatus::ConnectedWithError(e.to_string()), true, Vec::new()),
                Ok(Err(_elapsed)) => (
                    DatabaseStatus::Error(format!("connectivity check timed out after {:?}", timeout)),
                    true,
                    Vec::new(),
                ),
                Err(join_error) => (DatabaseStatus::Error(join_error.to_string()), true, Vec::new()),
            }
        }
    };

    DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: status.to_string(),
        database_url: presence(env.database_url_set),
        database_name: presence(env.database_name_set),
        connection_status: if connected { "Connected" } else { "Not Connected" }.to_string(),
        collections,
    }
}

/// GET /test
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let assembler = &state.assembler;
    Json(probe(assembler.persistence(), ConnectionEnv::from_env(), assembler.timeout()).await)
}
