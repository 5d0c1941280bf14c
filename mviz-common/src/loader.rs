//! Dataset loading from the static data directory
//!
//! The servers load every JSON source once at startup, concurrently,
//! and hold the result immutable for the life of the process. A source
//! that is missing or fails to parse logs one error and degrades to
//! empty, so the affected pages render nothing instead of the server
//! failing to start.

use crate::error::Result;
use crate::genres::GenreMap;
use crate::records::{EmotionTagEntry, GenreEntry, RawAlbum, RawArtist, SocialTagEntry};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{error, info};

/// File names inside the data directory.
pub const ALBUMS_FILE: &str = "album.json";
pub const ARTISTS_FILE: &str = "artist-without-members.json";
pub const GENRES_FILE: &str = "genres.json";
pub const GENRE_CATEGORIES_FILE: &str = "genre-categories.json";
pub const EMOTION_TAGS_FILE: &str = "emotion-tags.json";
pub const SOCIAL_TAGS_FILE: &str = "social-tags.json";

/// Everything the visualization pages draw from.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub albums: Vec<RawAlbum>,
    pub artists: Vec<RawArtist>,
    pub genres: Vec<GenreEntry>,
    pub genre_categories: GenreMap,
    pub emotion_tags: Vec<EmotionTagEntry>,
    pub social_tags: Vec<SocialTagEntry>,
}

impl DataSet {
    /// Load all sources from the data directory concurrently. Each
    /// failed source degrades to empty rather than aborting the load.
    pub async fn load(data_dir: &Path) -> Self {
        let albums_path = data_dir.join(ALBUMS_FILE);
        let artists_path = data_dir.join(ARTISTS_FILE);
        let genres_path = data_dir.join(GENRES_FILE);
        let genre_categories_path = data_dir.join(GENRE_CATEGORIES_FILE);
        let emotion_tags_path = data_dir.join(EMOTION_TAGS_FILE);
        let social_tags_path = data_dir.join(SOCIAL_TAGS_FILE);
        let (albums, artists, genres, genre_categories, emotion_tags, social_tags) = tokio::join!(
            load_json_or_default::<Vec<RawAlbum>>(&albums_path),
            load_json_or_default::<Vec<RawArtist>>(&artists_path),
            load_json_or_default::<Vec<GenreEntry>>(&genres_path),
            load_json_or_default::<GenreMap>(&genre_categories_path),
            load_json_or_default::<Vec<EmotionTagEntry>>(&emotion_tags_path),
            load_json_or_default::<Vec<SocialTagEntry>>(&social_tags_path),
        );

        info!(
            "Loaded dataset: {} albums, {} artists, {} genres",
            albums.len(),
            artists.len(),
            genres.len()
        );

        Self {
            albums,
            artists,
            genres,
            genre_categories,
            emotion_tags,
            social_tags,
        }
    }
}

/// Read and deserialize one JSON source.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like [`load_json`], but a missing or malformed source logs one
/// error and yields the empty default.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to load {}: {}", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn loads_albums_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ALBUMS_FILE),
            r#"[{"_id": {"$oid": "a1"}, "title": "Blue Train", "genre": "Jazz"}]"#,
        )
        .unwrap();

        let albums: Vec<RawAlbum> = load_json(&dir.path().join(ALBUMS_FILE)).await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title.as_deref(), Some("Blue Train"));
    }

    #[tokio::test]
    async fn missing_source_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let albums: Vec<RawAlbum> =
            load_json_or_default(&dir.path().join("does-not-exist.json")).await;
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn malformed_source_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ALBUMS_FILE), "{not json").unwrap();
        let albums: Vec<RawAlbum> = load_json_or_default(&dir.path().join(ALBUMS_FILE)).await;
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn dataset_load_survives_partial_data() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ALBUMS_FILE),
            r#"[{"_id": {"$oid": "a1"}, "title": "Blue Train"}]"#,
        )
        .unwrap();
        // every other source absent

        let dataset = DataSet::load(dir.path()).await;
        assert_eq!(dataset.albums.len(), 1);
        assert!(dataset.artists.is_empty());
        assert!(dataset.genres.is_empty());
        assert!(dataset.genre_categories.is_empty());
    }
}
