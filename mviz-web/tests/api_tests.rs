//! Integration tests for the mviz-web router
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`
//! against a dataset written to a temporary data directory.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mviz_web::{build_router, AppState};
use mviz_common::loader::{self, DataSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn write_fixtures(dir: &Path) {
    fs::write(
        dir.join(loader::ALBUMS_FILE),
        r#"[
            {
                "_id": {"$oid": "al1"},
                "id_artist": {"$oid": "ar1"},
                "title": "Revolver",
                "name": "The Beatles",
                "genre": "rock",
                "country": "United Kingdom",
                "language": "English",
                "publicationDate": "1966-08-05",
                "length": "00:35",
                "deezerFans": 900
            },
            {
                "_id": {"$oid": "al2"},
                "id_artist": {"$oid": "ar2"},
                "title": "Discovery",
                "name": "Daft Punk",
                "genre": "house",
                "country": "France",
                "language": "English",
                "publicationDate": "2001-03-12",
                "length": "01:01",
                "deezerFans": 1500,
                "explicitLyrics": true
            },
            {"_id": {"$oid": "al3"}, "title": "Untitled Demo"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join(loader::ARTISTS_FILE),
        r#"[
            {
                "_id": {"$oid": "ar1"},
                "name": "The Beatles",
                "genres": ["rock", "Rock music"],
                "dbp_genre": ["Rock music"]
            },
            {
                "_id": {"$oid": "ar2"},
                "name": "Daft Punk",
                "genres": ["house", "House music"],
                "dbp_genre": ["House music"]
            }
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join(loader::GENRES_FILE),
        r#"[
            {"name": "French House", "artists": [
                {"name": "Daft Punk", "location": "France"},
                {"name": "Justice", "location": "France"}
            ]}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join(loader::GENRE_CATEGORIES_FILE),
        r#"{"Rock": {"rock": true}, "Electronic": {"house": true}}"#,
    )
    .unwrap();
}

async fn test_state(dir: &TempDir) -> AppState {
    let dataset = DataSet::load(dir.path()).await;
    AppState {
        dataset: Arc::new(dataset),
        assets_dir: dir.path().join("assets"),
        data_dir: dir.path().to_path_buf(),
        port: 0,
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_reports_module_and_dataset_size() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let (status, json) = get_json(state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "mviz-web");
    assert_eq!(json["albums"], 3);
}

#[tokio::test]
async fn scatter_view_honors_year_selection() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let (status, json) = get_json(
        state,
        "/api/views/scatter?years=1960-1969&policy=show_none",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["artist"], "The Beatles");
    assert_eq!(points[0]["year"], 1966);
}

#[tokio::test]
async fn scatter_view_empty_selection_defaults_to_show_all() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let (status, json) = get_json(state, "/api/views/scatter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn treemap_view_keeps_parent_sum_invariant() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let (status, json) = get_json(state, "/api/views/treemap").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Music");

    let children = json["children"].as_array().unwrap();
    let child_sum: f64 = children.iter().map(|c| c["value"].as_f64().unwrap()).sum();
    assert!((json["value"].as_f64().unwrap() - child_sum).abs() < 1e-9);
}

#[tokio::test]
async fn map_view_requires_genre_pick() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let state = test_state(&dir).await;
    let (_, empty) = get_json(state, "/api/views/map").await;
    assert!(empty.as_array().unwrap().is_empty());

    let state = test_state(&dir).await;
    let (_, counts) = get_json(state, "/api/views/map?genre=French%20House").await;
    assert_eq!(counts[0]["country"], "France");
    assert_eq!(counts[0]["artists"], 2);
}

#[tokio::test]
async fn tidy_tree_view_nests_artists_under_genre_labels() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let (status, json) = get_json(state, "/api/views/tidy-tree").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Artists by Genre");

    let genres = json["children"].as_array().unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0]["name"], "House music");
    assert_eq!(genres[0]["children"][0]["name"], "Daft Punk");
    assert_eq!(genres[1]["name"], "Rock music");
}

#[tokio::test]
async fn views_render_empty_for_missing_dataset() {
    let dir = tempfile::tempdir().unwrap();
    // no fixture files at all
    let state = test_state(&dir).await;
    let (status, json) = get_json(state, "/api/views/parallel").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn data_directory_is_served_statically() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let state = test_state(&dir).await;

    let app = build_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/data/{}", loader::GENRE_CATEGORIES_FILE))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn index_lists_the_pages() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir).await;

    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("/scatter"));
    assert!(html.contains("/sunburst"));
}
