//! HTTP request handlers
//!
//! Page routes serve static markup; the `/api/views/*` endpoints run
//! the reshaping pipeline and return chart-ready JSON. Each request
//! rebuilds its view from the immutable dataset, so handlers hold no
//! state of their own.

use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use mviz_common::filter::{EmptyPolicy, FilterSelection};
use mviz_common::hierarchy::GroupNode;
use mviz_common::views;
use serde::Deserialize;
use serde_json::json;

/// Filter selection as carried in query strings, e.g.
/// `/api/views/scatter?years=1960-1969,1970-1979&policy=show_none`
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Comma-separated year range labels
    pub years: Option<String>,
    /// Comma-separated genre labels
    pub genres: Option<String>,
    /// Single genre pick (map page)
    pub genre: Option<String>,
    /// What an empty selection shows
    #[serde(default)]
    pub policy: EmptyPolicy,
}

impl ViewQuery {
    fn year_selection(&self) -> FilterSelection {
        self.years
            .as_deref()
            .map(FilterSelection::from_csv)
            .unwrap_or_default()
    }

    fn genre_selection(&self) -> FilterSelection {
        self.genres
            .as_deref()
            .map(FilterSelection::from_csv)
            .unwrap_or_default()
    }

    fn single_genre_selection(&self) -> FilterSelection {
        FilterSelection::from_labels(self.genre.as_deref())
    }
}

/// GET / - landing page listing the visualizations
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// GET /health - health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "mviz-web",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
        "albums": state.dataset.albums.len(),
    }))
}

/// GET /api/views/scatter
pub async fn scatter_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<Vec<views::ScatterPoint>> {
    Json(views::scatter_points(
        &state.dataset,
        &query.year_selection(),
        &query.genre_selection(),
        query.policy,
    ))
}

/// GET /api/views/treemap
pub async fn treemap_view(State(state): State<AppState>) -> Json<GroupNode> {
    Json(views::treemap_tree(&state.dataset))
}

/// GET /api/views/sunburst
pub async fn sunburst_view(State(state): State<AppState>) -> Json<GroupNode> {
    Json(views::sunburst_tree(&state.dataset))
}

/// GET /api/views/parallel
pub async fn parallel_view(State(state): State<AppState>) -> Json<Vec<views::ParallelRecord>> {
    Json(views::parallel_records(&state.dataset))
}

/// GET /api/views/stacked-area
pub async fn stacked_area_view(
    State(state): State<AppState>,
) -> Json<Vec<views::GenreYearCount>> {
    Json(views::stacked_area_counts(&state.dataset))
}

/// GET /api/views/map
pub async fn map_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<Vec<views::CountryCount>> {
    Json(views::map_counts(
        &state.dataset,
        &query.single_genre_selection(),
    ))
}

/// GET /api/views/tidy-tree
pub async fn tidy_tree_view(State(state): State<AppState>) -> Json<GroupNode> {
    Json(views::artists_by_genre_tree(&state.dataset))
}

/// GET /api/views/emotions
pub async fn emotions_view(State(state): State<AppState>) -> Json<GroupNode> {
    Json(views::emotions_tree(&state.dataset))
}
