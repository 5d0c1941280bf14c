//! Per-page view builders
//!
//! Pure functions from the loaded dataset (plus the viewer's filter
//! selection) to the chart-ready structures the pages fetch. Every
//! call rebuilds from scratch; nothing here holds state.

use crate::emotion;
use crate::fallback::{Fallback, DEFAULT_COLOR, UNKNOWN_ARTIST, UNKNOWN_COUNTRY};
use crate::filter::{visible, visible_by_year, EmptyPolicy, FilterSelection};
use crate::hierarchy::{build_tree, GroupNode, Leaf, TreeNode};
use crate::loader::DataSet;
use crate::normalize::{normalize_albums, RequiredFields};
use crate::records::Album;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Album count cap for the sunburst page.
const SUNBURST_ALBUM_LIMIT: usize = 300;

/// One scatter plot point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub artist: String,
    pub year: i32,
    pub popularity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// Scatter plot points: one per album with artist and release year,
/// narrowed to the selected year ranges and genres.
///
/// `policy` governs an empty year selection; an empty genre selection
/// always shows every genre (the legend is informational).
pub fn scatter_points(
    dataset: &DataSet,
    years: &FilterSelection,
    genres: &FilterSelection,
    policy: EmptyPolicy,
) -> Vec<ScatterPoint> {
    let albums = normalize_albums(&dataset.albums, RequiredFields::scatter());
    let by_genre = visible(&albums, genres, EmptyPolicy::ShowAll, |a: &Album| {
        a.genre.clone().into_iter().collect()
    });
    visible_by_year(by_genre, years, policy, |a: &Album| a.release_year())
        .into_iter()
        .filter_map(|album| {
            let year = album.release_year()?;
            Some(ScatterPoint {
                artist: album.artist_or_unknown().to_string(),
                year,
                popularity: album.fans,
                genre: album.genre.clone(),
            })
        })
        .collect()
}

/// Treemap: albums grouped by artist under a "Music" root, weighted by
/// fan count. An album with no recorded fans still shows with weight 1.
pub fn treemap_tree(dataset: &DataSet) -> GroupNode {
    let albums = normalize_albums(
        &dataset.albums,
        RequiredFields { title: true, ..RequiredFields::default() },
    );
    let artist_names: HashMap<&str, &str> = dataset
        .artists
        .iter()
        .filter_map(|artist| {
            artist
                .name
                .as_deref()
                .map(|name| (artist.id.oid.as_str(), name))
        })
        .collect();

    let artist_key = |album: &Album| -> String {
        album
            .artist_id
            .as_deref()
            .and_then(|id| artist_names.get(id).copied())
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string()
    };
    let album_leaf = |album: &Album| -> Leaf {
        let title = Fallback::text(album.title.as_deref()).resolve("Untitled");
        let mut leaf = Leaf::new(title, album.fans.max(1) as f64);
        if let Some(genre) = &album.genre {
            leaf = leaf.with_label(genre.clone());
        }
        leaf
    };

    build_tree("Music", &albums, &[&artist_key], &album_leaf)
}

/// Sunburst: one slice per album (first 300 of the file), weighted by
/// fan count, with the default slice color.
pub fn sunburst_tree(dataset: &DataSet) -> GroupNode {
    let head = &dataset.albums[..dataset.albums.len().min(SUNBURST_ALBUM_LIMIT)];
    let albums = normalize_albums(
        head,
        RequiredFields { title: true, ..RequiredFields::default() },
    );
    let slice = |album: &Album| -> Leaf {
        let title = Fallback::text(album.title.as_deref()).resolve("Untitled");
        Leaf::new(title, album.fans as f64)
            .with_color(DEFAULT_COLOR)
            .with_label(album.artist_or_unknown())
    };
    build_tree("Albums", &albums, &[], &slice)
}

/// One parallel coordinates row, serialized with the field names the
/// chart expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelRecord {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub length: u32,
    pub publication_date: String,
    pub country: String,
    pub language: String,
    pub explicit_lyrics: bool,
}

/// Parallel coordinates rows: strict normalization (genre, length,
/// country, language and date all required), newest first.
pub fn parallel_records(dataset: &DataSet) -> Vec<ParallelRecord> {
    let mut albums = normalize_albums(&dataset.albums, RequiredFields::parallel_coordinates());
    albums.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    albums
        .into_iter()
        .filter_map(|album| {
            Some(ParallelRecord {
                name: album.artist_or_unknown().to_string(),
                id: album.id,
                genre: album.genre?,
                length: album.length_minutes?,
                publication_date: album.release_date?.to_string(),
                country: album.country?,
                language: album.language?,
                explicit_lyrics: album.explicit,
            })
        })
        .collect()
}

/// One stacked area row: albums published in a year for a main genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreYearCount {
    pub year: i32,
    pub genre: String,
    #[serde(rename = "nbAlbums")]
    pub nb_albums: u64,
}

/// Stacked area rows: album counts per year and main genre category,
/// genres mapped through the category table with unknowns in "Other".
pub fn stacked_area_counts(dataset: &DataSet) -> Vec<GenreYearCount> {
    let albums = normalize_albums(
        &dataset.albums,
        RequiredFields {
            genre: true,
            country: true,
            release_date: true,
            ..RequiredFields::default()
        },
    );
    let mut counts: BTreeMap<(i32, String), u64> = BTreeMap::new();
    for album in &albums {
        let (Some(year), Some(genre)) = (album.release_year(), album.genre.as_deref()) else {
            continue;
        };
        let main = dataset.genre_categories.category_of(genre);
        *counts.entry((year, main.to_string())).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((year, genre), nb_albums)| GenreYearCount { year, genre, nb_albums })
        .collect()
}

/// Artist count for one country on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub artists: u64,
}

/// Map heat values: artists per country for the selected genres.
///
/// Selecting nothing shows an empty map, matching the page behavior of
/// waiting for a genre pick.
pub fn map_counts(dataset: &DataSet, selection: &FilterSelection) -> Vec<CountryCount> {
    let selected = visible(
        &dataset.genres,
        selection,
        EmptyPolicy::ShowNone,
        |genre: &crate::records::GenreEntry| vec![genre.name.clone()],
    );

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for genre in selected {
        for artist in &genre.artists {
            let location = Fallback::text(artist.location.as_deref()).resolve(UNKNOWN_COUNTRY);
            *counts.entry(location.to_string()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(country, artists)| CountryCount { country, artists })
        .collect()
}

/// Tidy tree of artists nested under each genre label of the artist
/// file: groups come from the `dbp_genre` labels, members are the
/// artists whose `genres` list carries the label. Labels no artist is
/// filed under are omitted; groups and members sort alphabetically,
/// matching the tree layout's ordering.
pub fn artists_by_genre_tree(dataset: &DataSet) -> GroupNode {
    let mut labels: BTreeSet<&str> = BTreeSet::new();
    for artist in &dataset.artists {
        for genre in &artist.dbp_genre {
            labels.insert(genre);
        }
    }

    let children: Vec<TreeNode> = labels
        .into_iter()
        .filter_map(|label| {
            let mut members: Vec<&str> = dataset
                .artists
                .iter()
                .filter(|artist| artist.genres.iter().any(|g| g == label))
                .filter_map(|artist| artist.name.as_deref())
                .collect();
            if members.is_empty() {
                return None;
            }
            members.sort_unstable();
            let leaves: Vec<TreeNode> = members
                .into_iter()
                .map(|name| TreeNode::Leaf(Leaf::new(name, 1.0)))
                .collect();
            Some(TreeNode::Group(GroupNode {
                name: label.to_string(),
                value: leaves.len() as f64,
                color: None,
                children: leaves,
            }))
        })
        .collect();

    GroupNode {
        name: "Artists by Genre".to_string(),
        value: children.iter().map(TreeNode::value).sum(),
        color: None,
        children,
    }
}

/// The emotions/genres treemap tree.
pub fn emotions_tree(dataset: &DataSet) -> GroupNode {
    let valid = emotion::valid_emotions(&dataset.emotion_tags);
    let map = emotion::emotion_genre_map(&valid, &dataset.social_tags, &dataset.genre_categories);
    emotion::build_emotions_tree(&map)
}
