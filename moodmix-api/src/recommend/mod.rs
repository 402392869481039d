//! Mood-to-recommendation pipeline
//!
//! Free-text mood → [`resolve_mood`] → [`build_suggestions`] →
//! [`RecommendationAssembler`] (best-effort history write).

pub mod assembler;
pub mod builder;
pub mod resolver;

pub use assembler::{HistoryWrite, RecommendationAssembler, SuggestResponse};
pub use builder::{build_suggestions, RadioPolicy, MAX_MUSIC_PICKS};
pub use resolver::{normalize_mood, resolve_mood, DEFAULT_MOOD};
