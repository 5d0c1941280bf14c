//! # MViz Common Library
//!
//! Shared code for the music visualization services including:
//! - Raw and normalized record types for the dataset JSON files
//! - Record normalization and field coercion
//! - Hierarchy building for treemap/sunburst style charts
//! - Filter selection and visible-subset recompute
//! - Genre category and emotion mapping
//! - Dataset loading from the static data directory
//! - Per-page view builders

pub mod config;
pub mod emotion;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod genres;
pub mod hierarchy;
pub mod loader;
pub mod normalize;
pub mod records;
pub mod views;

pub use error::{Error, Result};
