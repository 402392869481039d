//! # MoodMix Common Library
//!
//! Shared code for the MoodMix services including:
//! - Curated catalog data (radio stations, mood-tagged music picks, mood aliases)
//! - Recommendation record types (what gets returned and persisted)
//! - Document store abstraction used for best-effort recommendation history
//! - Configuration resolution

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use catalog::{AliasTable, Catalog, Mood, MusicPick, RadioStation};
pub use error::{Error, Result};
pub use models::{Recommendation, SuggestionItem};
