//! Curated catalog: radio stations, mood-tagged music picks and mood aliases
//!
//! All tables are built once at startup and never mutated afterwards, so they
//! can be shared behind an `Arc` and read from any number of requests.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Canonical mood keys understood by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Chill,
    Focus,
    Party,
}

impl Mood {
    /// All canonical moods, in declaration order
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Sad, Mood::Chill, Mood::Focus, Mood::Party];

    /// Lowercase key used on the wire and in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Chill => "chill",
            Mood::Focus => "focus",
            Mood::Party => "party",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    /// Exact, case-sensitive match on the lowercase key.
    /// Callers normalize free text before parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown mood: {:?}", s)))
    }
}

/// A live radio stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioStation {
    /// Display name, unique within a catalog
    pub name: String,
    pub stream_url: String,
    pub genre: String,
    pub country: String,
}

impl RadioStation {
    pub fn new(name: &str, stream_url: &str, genre: &str, country: &str) -> Self {
        Self {
            name: name.to_string(),
            stream_url: stream_url.to_string(),
            genre: genre.to_string(),
            country: country.to_string(),
        }
    }
}

/// A single music reference (YouTube video)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicPick {
    pub title: String,
    pub video_id: String,
}

impl MusicPick {
    pub fn new(title: &str, video_id: &str) -> Self {
        Self {
            title: title.to_string(),
            video_id: video_id.to_string(),
        }
    }

    /// False for picks whose video id is blank and cannot be linked
    pub fn has_video_id(&self) -> bool {
        !self.video_id.trim().is_empty()
    }
}

/// Read-only catalog of radio stations and per-mood music picks
///
/// Pick order within a mood is significant: it is the suggestion priority.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    radios: Vec<RadioStation>,
    picks: BTreeMap<Mood, Vec<MusicPick>>,
}

impl Catalog {
    /// Create a catalog from arbitrary data
    pub fn new(radios: Vec<RadioStation>, picks: BTreeMap<Mood, Vec<MusicPick>>) -> Self {
        Self { radios, picks }
    }

    /// Curated reference catalog shipped with the service
    pub fn reference() -> Self {
        let radios = vec![
            RadioStation::new(
                "TruckersFM",
                "https://radio.truckers.fm/stream",
                "Gaming / Community",
                "UK",
            ),
            RadioStation::new(
                "1.FM - Top 40",
                "https://strm112.1.fm/top40_64?aw_0_1st.playerid=1fmweb",
                "Top 40 / Pop",
                "International",
            ),
            RadioStation::new(
                "SomaFM Groove Salad",
                "https://ice6.somafm.com/groovesalad-128-mp3",
                "Ambient / Downtempo",
                "USA",
            ),
            RadioStation::new(
                "LoFi HipHop Radio",
                "https://streams.ilovemusic.de/iloveradio15.mp3",
                "LoFi / Beats",
                "DE",
            ),
        ];

        let mut picks = BTreeMap::new();
        picks.insert(
            Mood::Happy,
            vec![
                MusicPick::new("Pharrell Williams - Happy", "ZbZSe6N_BXs"),
                MusicPick::new("Avicii - Levels", "_ovdm2yX4MA"),
                MusicPick::new("Daft Punk - One More Time", "FGBhQbmPwH8"),
            ],
        );
        picks.insert(
            Mood::Sad,
            vec![
                MusicPick::new("Adele - Someone Like You", "hLQl3WQQoQ0"),
                MusicPick::new("Lewis Capaldi - Someone You Loved", "zABLecsR5UE"),
                MusicPick::new("Billie Eilish - when the party's over", "pbMwTqkKSps"),
            ],
        );
        picks.insert(
            Mood::Chill,
            vec![
                MusicPick::new("Joji - Glimpse of Us", "NgsWGfUlwJI"),
                MusicPick::new("ODESZA - A Moment Apart", "aQkPcPqTq4M"),
                MusicPick::new("Lauv - I Like Me Better", "BXa8JqZrK30"),
            ],
        );
        picks.insert(
            Mood::Focus,
            vec![
                MusicPick::new("lofi hip hop mix - beats to study/relax to", "jfKfPfyJRdk"),
                MusicPick::new("Tycho - Awake", "t1tG0K3tQFQ"),
                MusicPick::new("Aphex Twin - Avril 14th", "MBFXJw7n-fU"),
            ],
        );
        picks.insert(
            Mood::Party,
            vec![
                MusicPick::new("David Guetta - Titanium", "JRfuAukYTKg"),
                MusicPick::new("Calvin Harris - Feel So Close", "dGghkjpNCQ8"),
                MusicPick::new("Black Eyed Peas - I Gotta Feeling", "uSD4vsh1zDA"),
            ],
        );

        Self::new(radios, picks)
    }

    /// All radio stations in catalog order
    pub fn list_radios(&self) -> &[RadioStation] {
        &self.radios
    }

    /// Music picks for a mood in priority order (empty if the mood is absent)
    pub fn picks_for(&self, mood: Mood) -> &[MusicPick] {
        self.picks.get(&mood).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the mood is a key of this catalog
    pub fn contains_mood(&self, mood: Mood) -> bool {
        self.picks.contains_key(&mood)
    }
}

/// Many-to-one mapping from lowercase free-text tokens to canonical moods
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, Mood>,
}

impl AliasTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Mood)>,
        S: Into<String>,
    {
        Self {
            aliases: entries
                .into_iter()
                .map(|(token, mood)| (token.into(), mood))
                .collect(),
        }
    }

    /// Alias table shipped with the service
    pub fn reference() -> Self {
        Self::new([
            ("good", Mood::Happy),
            ("great", Mood::Happy),
            ("awesome", Mood::Happy),
            ("excited", Mood::Party),
            ("energetic", Mood::Party),
            ("ok", Mood::Chill),
            ("fine", Mood::Chill),
            ("relaxed", Mood::Chill),
            ("study", Mood::Focus),
            ("work", Mood::Focus),
            ("sad", Mood::Sad),
            ("down", Mood::Sad),
        ])
    }

    /// Look up an already-normalized token
    pub fn get(&self, token: &str) -> Option<Mood> {
        self.aliases.get(token).copied()
    }

    /// Iterate over `(token, mood)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Mood)> {
        self.aliases.iter().map(|(token, mood)| (token.as_str(), *mood))
    }
}
