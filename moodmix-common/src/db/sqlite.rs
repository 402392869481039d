//! SQLite-backed document store
//!
//! Documents are kept in a single `documents` table as JSON text, with the
//! collection name as a column.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::DocumentStore;
use crate::{Error, Result};

const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY,
        collection TEXT NOT NULL,
        body TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const CREATE_COLLECTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection)";

/// Document store on top of a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    name: String,
}

impl SqliteDocumentStore {
    /// Open (creating if missing) the database at `url` and ensure the schema exists
    pub async fn connect(url: &str, name: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            // Every connection to an in-memory database sees its own database,
            // so the single connection must never be closed or recycled.
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        let store = Self {
            pool,
            name: name.to_string(),
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_DOCUMENTS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_COLLECTION_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Most recent documents of a collection, newest first
    pub async fn recent_documents(&self, collection: &str, limit: usize) -> Result<Vec<Value>> {
        let bodies: Vec<String> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(collection)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_document(&self, collection: &str, mut record: Value) -> Result<String> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let object = record.as_object_mut().ok_or_else(|| {
            Error::InvalidInput(format!("document for '{}' is not a JSON object", collection))
        })?;
        object.insert("created_at".to_string(), Value::String(timestamp.clone()));
        object.insert("updated_at".to_string(), Value::String(timestamp.clone()));

        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(&record)?;

        sqlx::query(
            "INSERT INTO documents (id, collection, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(collection)
        .bind(body)
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_collection_names(&self, limit: usize) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT collection FROM documents ORDER BY collection ASC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Mood};
    use crate::config::ServiceConfig;
    use crate::db::{insert_document, Persistence};
    use crate::models::{Recommendation, SuggestionItem};
    use serde_json::json;
    use tempfile::TempDir;

    async fn temp_store() -> (TempDir, SqliteDocumentStore) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("moodmix.db").display());
        let store = SqliteDocumentStore::connect(&url, "moodmix-test").await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_create_document_adds_timestamps() {
        let (_dir, store) = temp_store().await;

        let id = store
            .create_document("recommendation", json!({ "mood": "chill" }))
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let docs = store.recent_documents("recommendation", 10).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["mood"], "chill");
        assert!(docs[0]["created_at"].is_string());
        assert_eq!(docs[0]["created_at"], docs[0]["updated_at"]);
    }

    #[tokio::test]
    async fn test_create_document_rejects_non_object() {
        let (_dir, store) = temp_store().await;

        let result = store.create_document("recommendation", json!(["not", "an", "object"])).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_collection_names_sorted_and_limited() {
        let (_dir, store) = temp_store().await;
        assert!(store.list_collection_names(10).await.unwrap().is_empty());

        for collection in ["zeta", "alpha", "recommendation", "alpha"] {
            store.create_document(collection, json!({})).await.unwrap();
        }

        assert_eq!(
            store.list_collection_names(10).await.unwrap(),
            ["alpha", "recommendation", "zeta"]
        );
        assert_eq!(store.list_collection_names(2).await.unwrap(), ["alpha", "recommendation"]);
    }

    #[tokio::test]
    async fn test_insert_typed_recommendation() {
        let (_dir, store) = temp_store().await;
        let catalog = Catalog::reference();

        let rec = Recommendation {
            mood: Mood::Sad,
            message: Some("long week".to_string()),
            suggestions: vec![SuggestionItem::from_station(&catalog.list_radios()[0])],
        };
        insert_document(&store, &rec).await.unwrap();

        let docs = store.recent_documents("recommendation", 1).await.unwrap();
        let stored: Recommendation = serde_json::from_value(docs[0].clone()).unwrap();
        assert_eq!(stored, rec);
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let store = SqliteDocumentStore::connect("sqlite::memory:", "memory").await.unwrap();
        store.create_document("recommendation", json!({})).await.unwrap();
        assert_eq!(store.list_collection_names(10).await.unwrap(), ["recommendation"]);
    }

    #[tokio::test]
    async fn test_in_memory_connection_is_never_recycled() {
        let store = SqliteDocumentStore::connect("sqlite::memory:", "memory").await.unwrap();
        let options = store.pool.options();
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);

        store.create_document("recommendation", json!({ "mood": "sad" })).await.unwrap();
        store.create_document("recommendation", json!({ "mood": "chill" })).await.unwrap();
        assert_eq!(store.recent_documents("recommendation", 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_file_database_keeps_pool_defaults() {
        let (_dir, store) = temp_store().await;
        assert_eq!(store.pool.options().get_max_connections(), 5);
        assert!(store.pool.options().get_idle_timeout().is_some());
    }

    #[tokio::test]
    async fn test_persistence_connect_states() {
        let disabled = Persistence::connect(&ServiceConfig::default()).await;
        assert!(matches!(disabled, Persistence::Disabled));

        let dir = TempDir::new().unwrap();
        let unreachable = ServiceConfig {
            database_url: Some(format!(
                "sqlite://{}",
                dir.path().join("missing").join("nested").join("db.sqlite").display()
            )),
            ..ServiceConfig::default()
        };
        let unavailable = Persistence::connect(&unreachable).await;
        assert!(matches!(unavailable, Persistence::Unavailable { .. }));
        assert!(unavailable.store().is_none());

        let reachable = ServiceConfig {
            database_url: Some(format!("sqlite://{}", dir.path().join("db.sqlite").display())),
            database_name: "history".to_string(),
            ..ServiceConfig::default()
        };
        let ready = Persistence::connect(&reachable).await;
        assert_eq!(ready.store().map(|s| s.name()), Some("history"));
    }
}
