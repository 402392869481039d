//! Recommendation assembly and best-effort history recording

use std::time::Duration;

use moodmix_common::db::{insert_document, Persistence};
use moodmix_common::{Mood, Recommendation, SuggestionItem};
use serde::Serialize;
use tracing::{debug, warn};

/// Body of a successful suggest response
///
/// The original message is persisted but not echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestResponse {
    pub mood: Mood,
    pub suggestions: Vec<SuggestionItem>,
}

/// Outcome of one history write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryWrite {
    Recorded { id: String },
    /// No usable store; nothing attempted
    Skipped,
    Failed { reason: String },
}

/// Wraps suggestions into a [`Recommendation`] and records it
#[derive(Debug, Clone)]
pub struct RecommendationAssembler {
    persistence: Persistence,
    timeout: Duration,
}

impl RecommendationAssembler {
    pub fn new(persistence: Persistence, timeout: Duration) -> Self {
        Self {
            persistence,
            timeout,
        }
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn assemble(
        &self,
        mood: Mood,
        message: Option<String>,
        suggestions: Vec<SuggestionItem>,
    ) -> SuggestResponse {
        let recommendation = Recommendation {
            mood,
            message,
            suggestions,
        };

        // History is an audit trail only: whatever happens here is logged and
        // dropped, and the response below is identical either way.
        match self.record(&recommendation).await {
            HistoryWrite::Recorded { id } => debug!(%id, mood = %mood, "Recorded recommendation"),
            HistoryWrite::Skipped => debug!("Recommendation history disabled, not recorded"),
            HistoryWrite::Failed { reason } => warn!("Recommendation not recorded: {}", reason),
        }

        SuggestResponse {
            mood: recommendation.mood,
            suggestions: recommendation.suggestions,
        }
    }

    /// Write one recommendation to the store
    ///
    /// The write runs on its own task so that a store error, a panic inside
    /// the store or an expired timeout all come back as [`HistoryWrite::Failed`].
    pub async fn record(&self, recommendation: &Recommendation) -> HistoryWrite {
        let Some(store) = self.persistence.store().cloned() else {
            return HistoryWrite::Skipped;
        };

        let recommendation = recommendation.clone();
        let timeout = self.timeout;
        let write = tokio::spawn(async move {
            tokio::time::timeout(timeout, insert_document(store.as_ref(), &recommendation)).await
        });

        match write.await {
            Ok(Ok(Ok(id))) => HistoryWrite::Recorded { id },
            Ok(Ok(Err(e))) => HistoryWrite::Failed {
                reason: e.to_string(),
            },
            Ok(Err(_elapsed)) => HistoryWrite::Failed {
                reason: format!("timed out after {:?}", timeout),
            },
            Err(join_error) => HistoryWrite::Failed {
                reason: format!("store task aborted: {}", join_error),
            },
        }
    }
}
