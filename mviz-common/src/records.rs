//! Raw and normalized record types for the music dataset
//!
//! Raw types mirror the JSON files in the static data directory,
//! including the Mongo-style `{"$oid": ...}` id wrapper the export
//! carries. [`Album`] is the normalized form produced by
//! [`crate::normalize::normalize_albums`].

use crate::fallback::{Fallback, UNKNOWN_ARTIST, UNKNOWN_COUNTRY};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Mongo export id wrapper: `{"$oid": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl ObjectId {
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

/// One entry of `album.json`, fields as exported
///
/// Everything but the id is optional in the wild; `name` is the artist
/// display name denormalized into the album export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(rename = "_id", default)]
    pub id: ObjectId,
    #[serde(rename = "id_artist", default)]
    pub artist_id: Option<ObjectId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "publicationDate", default)]
    pub publication_date: Option<String>,
    /// Album length as `"HH:MM"`
    #[serde(default)]
    pub length: Option<String>,
    #[serde(rename = "deezerFans", default)]
    pub deezer_fans: Option<u64>,
    #[serde(rename = "explicitLyrics", default)]
    pub explicit_lyrics: Option<bool>,
}

/// One entry of `artist-without-members.json`
///
/// `genres` lists the genres the artist is filed under; `dbp_genre`
/// carries the DBpedia genre labels, which name the groups of the
/// artists-by-genre tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
    #[serde(rename = "_id", default)]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "dbp_genre", default)]
    pub dbp_genre: Vec<String>,
}

/// One entry of `genres.json`: a genre and the artists tagged with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreEntry {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<GenreArtist>,
}

/// Artist reference inside a [`GenreEntry`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreArtist {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// One entry of `emotion-tags.json`
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionTagEntry {
    #[serde(default)]
    pub emotions: Vec<EmotionCount>,
}

/// A tag/count pair inside an [`EmotionTagEntry`]
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionCount {
    pub emotion_tag: String,
    #[serde(default)]
    pub nbr_tags: u64,
}

/// One entry of `social-tags.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SocialTagEntry {
    #[serde(default)]
    pub socials: Vec<SocialCount>,
}

/// A tag/count pair inside a [`SocialTagEntry`]
#[derive(Debug, Clone, Deserialize)]
pub struct SocialCount {
    pub social_tag: String,
    #[serde(default)]
    pub nbr_tags: u64,
}

/// Normalized album record
///
/// Text fields hold `None` when absent or empty in the raw record;
/// fan count and explicit flag already carry their defaults (0, false).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    pub id: String,
    pub artist_id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub length_minutes: Option<u32>,
    pub fans: u64,
    pub explicit: bool,
}

impl Album {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    pub fn artist_or_unknown(&self) -> &str {
        Fallback::text(self.artist.as_deref()).resolve(UNKNOWN_ARTIST)
    }

    pub fn country_or_unknown(&self) -> &str {
        Fallback::text(self.country.as_deref()).resolve(UNKNOWN_COUNTRY)
    }
}
