//! Genre to category mapping
//!
//! `genre-categories.json` carries a category -> sub-genre table:
//! `{"Rock": {"hard rock": true, "punk rock": true}, ...}`.
//! Classification falls back to the "Other" bucket for genres the
//! table does not know.

use crate::error::Result;
use crate::fallback::OTHER_GENRE;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Category -> sub-genre mapping loaded from the auxiliary data file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreMap {
    #[serde(flatten)]
    categories: BTreeMap<String, BTreeMap<String, bool>>,
}

impl GenreMap {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Main category for an exact genre name; unmapped genres land in
    /// "Other".
    pub fn category_of(&self, genre: &str) -> &str {
        self.categories
            .iter()
            .find(|(_, members)| members.get(genre).copied().unwrap_or(false))
            .map(|(category, _)| category.as_str())
            .unwrap_or(OTHER_GENRE)
    }

    /// All known sub-genre terms across categories.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.categories
            .values()
            .flat_map(|members| members.keys())
            .map(String::as_str)
    }

    /// First known sub-genre term contained in a free-form tag, used
    /// when classifying social tags ("classic rock fan" matches
    /// "classic rock").
    pub fn matching_term(&self, tag: &str) -> Option<&str> {
        self.terms().find(|term| tag.contains(term))
    }
}
