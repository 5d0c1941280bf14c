//! mviz-web library interface
//!
//! Exposes the application state and router for integration testing.

pub mod handlers;

use axum::routing::get;
use axum::Router;
use mviz_common::loader::DataSet;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Visualization pages and the asset file each route serves.
pub const PAGES: &[(&str, &str)] = &[
    ("/scatter", "scatter/scatter.html"),
    ("/treemap", "treemap/treemap.html"),
    ("/sunburst", "sunburst/sunburst.html"),
    ("/parallel", "parallel/parallel.html"),
    ("/stacked-area", "stacked-area/stacked-area.html"),
    ("/map", "map/map.html"),
    ("/tidy-tree", "tidy-tree/tidy-tree.html"),
    ("/emotions", "emotions/emotions.html"),
];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Dataset loaded once at startup, immutable afterwards
    pub dataset: Arc<DataSet>,
    /// Static assets directory (page markup and chart scripts)
    pub assets_dir: PathBuf,
    /// Static data directory (the JSON sources, served as-is)
    pub data_dir: PathBuf,
    /// Server port
    pub port: u16,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health));

    for (route, file) in PAGES.iter().copied() {
        app = app.route_service(route, ServeFile::new(state.assets_dir.join(file)));
    }

    app.nest(
        "/api/views",
        Router::new()
            .route("/scatter", get(handlers::scatter_view))
            .route("/treemap", get(handlers::treemap_view))
            .route("/sunburst", get(handlers::sunburst_view))
            .route("/parallel", get(handlers::parallel_view))
            .route("/stacked-area", get(handlers::stacked_area_view))
            .route("/map", get(handlers::map_view))
            .route("/tidy-tree", get(handlers::tidy_tree_view))
            .route("/emotions", get(handlers::emotions_view)),
    )
    .nest_service("/assets", ServeDir::new(&state.assets_dir))
    .nest_service("/data", ServeDir::new(&state.data_dir))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
