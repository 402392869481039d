//! Document persistence
//!
//! Recommendation history is written to a document store on a best-effort
//! basis. The store is an external collaborator: it may be absent, may have
//! failed to connect, or may fail on any individual call.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::models::Document;
use crate::Result;

mod sqlite;
pub use sqlite::SqliteDocumentStore;

/// Schemaless store of JSON documents grouped into named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Database name, for diagnostics and logs
    fn name(&self) -> &str;

    /// Insert one JSON object into `collection`, returning the new document id
    async fn create_document(&self, collection: &str, record: Value) -> Result<String>;

    /// Names of non-empty collections, at most `limit`, in name order
    async fn list_collection_names(&self, limit: usize) -> Result<Vec<String>>;
}

/// Serialize a typed record and insert it into its collection
pub async fn insert_document<D: Document + Sync>(store: &dyn DocumentStore, doc: &D) -> Result<String> {
    let record = serde_json::to_value(doc)?;
    store.create_document(D::COLLECTION, record).await
}

/// Handle to the persistence collaborator as seen at startup
#[derive(Clone, Default)]
pub enum Persistence {
    /// No store configured
    #[default]
    Disabled,
    /// A store was configured but could not be opened
    Unavailable { reason: String },
    /// Store opened and ready for use
    Ready(Arc<dyn DocumentStore>),
}

impl Persistence {
    /// Open the configured store; never fails, degraded states are logged
    pub async fn connect(config: &ServiceConfig) -> Self {
        let Some(url) = config.database_url.as_deref() else {
            info!("DATABASE_URL not set; recommendation history disabled");
            return Persistence::Disabled;
        };

        match SqliteDocumentStore::connect(url, &config.database_name).await {
            Ok(store) => {
                info!("✓ Connected to document store '{}'", store.name());
                Persistence::Ready(Arc::new(store))
            }
            Err(e) => {
                warn!("Document store unavailable, recommendation history disabled: {}", e);
                Persistence::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(store: impl DocumentStore + 'static) -> Self {
        Persistence::Ready(Arc::new(store))
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        match self {
            Persistence::Ready(store) => Some(store),
            _ => None,
        }
    }
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persistence::Disabled => f.write_str("Disabled"),
            Persistence::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
            Persistence::Ready(store) => f.debug_tuple("Ready").field(&store.name()).finish(),
        }
    }
}
