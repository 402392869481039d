//! Mood resolution
//!
//! Unrecognized input is never an error: it degrades to [`DEFAULT_MOOD`].

use moodmix_common::{AliasTable, Catalog, Mood};

/// Mood used when the input matches neither an alias nor a catalog mood
pub const DEFAULT_MOOD: Mood = Mood::Chill;

/// Trim and lowercase raw mood text
pub fn normalize_mood(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_lowercase()
}

/// Resolve free-text mood input to a canonical mood
///
/// Alias lookup wins over a direct catalog match. Either way the result must
/// be a mood the catalog holds; anything else falls back to the default mood.
pub fn resolve_mood(raw: Option<&str>, aliases: &AliasTable, catalog: &Catalog) -> Mood {
    let key = normalize_mood(raw);

    let candidate = aliases.get(&key).or_else(|| key.parse::<Mood>().ok());
    match candidate {
        Some(mood) if catalog.contains_mood(mood) => mood,
        _ => DEFAULT_MOOD,
    }
}
