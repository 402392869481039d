//! Recommendation records
//!
//! These are both the response payload of the suggest endpoint and the
//! documents written to the `recommendation` collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Mood, MusicPick, RadioStation};

/// Thumbnail URL for a YouTube video id
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id)
}

/// A record that lives in a named document collection
pub trait Document: Serialize {
    /// Collection name (lowercased entity name)
    const COLLECTION: &'static str;
}

/// One recommended item, keyed on `source`
///
/// Serialized with an inline `"source": "youtube" | "radio"` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SuggestionItem {
    Youtube(YoutubeSuggestion),
    Radio(RadioSuggestion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeSuggestion {
    pub title: String,
    /// YouTube video id, never empty
    pub id: String,
    pub thumbnail: String,
    pub meta: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioSuggestion {
    pub title: String,
    pub stream_url: String,
}

impl SuggestionItem {
    /// Music suggestion tagged with the mood it was picked for
    pub fn from_pick(pick: &MusicPick, mood: Mood) -> Self {
        let mut meta = BTreeMap::new();
        meta.insert("mood".to_string(), mood.as_str().to_string());

        SuggestionItem::Youtube(YoutubeSuggestion {
            title: pick.title.clone(),
            id: pick.video_id.clone(),
            thumbnail: youtube_thumbnail_url(&pick.video_id),
            meta,
        })
    }

    /// Live stream suggestion for a catalog station
    pub fn from_station(station: &RadioStation) -> Self {
        SuggestionItem::Radio(RadioSuggestion {
            title: station.name.clone(),
            stream_url: station.stream_url.clone(),
        })
    }

    pub fn title(&self) -> &str {
        match self {
            SuggestionItem::Youtube(item) => &item.title,
            SuggestionItem::Radio(item) => &item.title,
        }
    }

    pub fn is_radio(&self) -> bool {
        matches!(self, SuggestionItem::Radio(_))
    }
}

/// Result of one suggest request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub mood: Mood,
    /// Original user message, if any
    pub message: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<SuggestionItem>,
}

impl Document for Recommendation {
    const COLLECTION: &'static str = "recommendation";
}
