//! Record normalization and field coercion
//!
//! The normalizer keeps only records where every required field is
//! present and non-empty, applying type coercions on the way through:
//! `"HH:MM"` lengths become whole minutes, publication dates become
//! comparable dates, missing booleans become false. Malformed
//! individual records are dropped silently (debug-logged in bulk);
//! they never abort the page.

use crate::records::{Album, RawAlbum};
use chrono::NaiveDate;
use tracing::debug;

/// Fields a page requires to be present and non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredFields {
    pub title: bool,
    pub artist: bool,
    pub genre: bool,
    pub country: bool,
    pub language: bool,
    pub release_date: bool,
    pub length: bool,
}

impl RequiredFields {
    /// Strict set used by the parallel coordinates page.
    pub fn parallel_coordinates() -> Self {
        Self {
            genre: true,
            country: true,
            language: true,
            release_date: true,
            length: true,
            ..Self::default()
        }
    }

    /// Artist and release year, the scatter plot minimum.
    pub fn scatter() -> Self {
        Self {
            artist: true,
            release_date: true,
            ..Self::default()
        }
    }
}

/// Parse an album length of the form `"HH:MM"` into whole minutes.
///
/// The format check requires exactly two digits on each side, so
/// `"01:05"` is 65 minutes while `"5:5"` is rejected.
pub fn parse_length_minutes(length: &str) -> Option<u32> {
    let (hours, minutes) = length.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Parse a publication date.
///
/// The export mixes `YYYY-MM-DD`, `YYYY-MM` and bare `YYYY`; partial
/// dates resolve to the first day of the period so records stay
/// comparable.
pub fn parse_release_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d") {
        return Some(parsed);
    }
    if date.len() == 4 && date.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = date.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

/// Normalize a batch of raw albums, dropping records that fail the
/// required-field check.
pub fn normalize_albums(raw: &[RawAlbum], required: RequiredFields) -> Vec<Album> {
    let total = raw.len();
    let albums: Vec<Album> = raw
        .iter()
        .filter_map(|record| normalize_album(record, required))
        .collect();
    let dropped = total - albums.len();
    if dropped > 0 {
        debug!("Dropped {} of {} album records during normalization", dropped, total);
    }
    albums
}

/// Normalize one raw album, or `None` when a required field is absent,
/// empty, or fails coercion.
pub fn normalize_album(raw: &RawAlbum, required: RequiredFields) -> Option<Album> {
    let title = non_empty(raw.title.as_deref());
    let artist = non_empty(raw.name.as_deref());
    let genre = non_empty(raw.genre.as_deref());
    let country = non_empty(raw.country.as_deref());
    let language = non_empty(raw.language.as_deref());
    let release_date = non_empty(raw.publication_date.as_deref())
        .and_then(|date| parse_release_date(&date));
    let length_minutes = non_empty(raw.length.as_deref())
        .and_then(|length| parse_length_minutes(&length));

    if required.title && title.is_none() {
        return None;
    }
    if required.artist && artist.is_none() {
        return None;
    }
    if required.genre && genre.is_none() {
        return None;
    }
    if required.country && country.is_none() {
        return None;
    }
    if required.language && language.is_none() {
        return None;
    }
    if required.release_date && release_date.is_none() {
        return None;
    }
    if required.length && length_minutes.is_none() {
        return None;
    }

    Some(Album {
        id: raw.id.oid.clone(),
        artist_id: raw.artist_id.as_ref().map(|id| id.oid.clone()),
        title,
        artist,
        genre,
        country,
        language,
        release_date,
        length_minutes,
        fans: raw.deezer_fans.unwrap_or(0),
        explicit: raw.explicit_lyrics.unwrap_or(false),
    })
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
