//! Suggestion list assembly
//!
//! Music picks come first (catalog priority order, capped), followed by the
//! radio stations selected by the mood's [`RadioPolicy`] in catalog order.

use moodmix_common::{Catalog, Mood, RadioStation, SuggestionItem};

/// Maximum number of music suggestions per response
pub const MAX_MUSIC_PICKS: usize = 5;

/// How radio stations are chosen for a mood
///
/// Name matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioPolicy {
    /// Stations whose name contains any of the fragments
    NameContains(&'static [&'static str]),
    /// Stations whose name equals one of the names
    NameIn(&'static [&'static str]),
    /// Only the first station in catalog order
    FirstStation,
}

impl RadioPolicy {
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::Chill | Mood::Focus => RadioPolicy::NameContains(&["Groove", "LoFi"]),
            Mood::Party | Mood::Happy => RadioPolicy::NameIn(&["TruckersFM", "1.FM - Top 40"]),
            Mood::Sad => RadioPolicy::FirstStation,
        }
    }

    /// Stations matching this policy, in catalog order
    pub fn select<'a>(&self, radios: &'a [RadioStation]) -> Vec<&'a RadioStation> {
        match self {
            RadioPolicy::NameContains(fragments) => radios
                .iter()
                .filter(|r| fragments.iter().any(|f| r.name.contains(f)))
                .collect(),
            RadioPolicy::NameIn(names) => radios
                .iter()
                .filter(|r| names.contains(&r.name.as_str()))
                .collect(),
            RadioPolicy::FirstStation => radios.iter().take(1).collect(),
        }
    }
}

/// Build the ordered suggestion list for an already-resolved mood
///
/// Picks without a video id are skipped and do not count toward the cap.
pub fn build_suggestions(mood: Mood, catalog: &Catalog) -> Vec<SuggestionItem> {
    let music = catalog
        .picks_for(mood)
        .iter()
        .filter(|pick| pick.has_video_id())
        .take(MAX_MUSIC_PICKS)
        .map(|pick| SuggestionItem::from_pick(pick, mood));

    let radios = RadioPolicy::for_mood(mood)
        .select(catalog.list_radios())
        .into_iter()
        .map(SuggestionItem::from_station);

    music.chain(radios).collect()
}
