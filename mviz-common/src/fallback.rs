//! Default resolution for absent optional fields
//!
//! The dataset leaves many optional fields empty or missing entirely.
//! Absence resolves through a single explicit rule (`Fallback::resolve`)
//! against the named defaults below, instead of each page inventing its
//! own sentinel.

/// Country label for records without a location.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Artist label when the artist cannot be matched by id.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Chart color for leaves without an assigned color.
pub const DEFAULT_COLOR: &str = "#ccc";

/// Bucket for genres absent from the category mapping.
pub const OTHER_GENRE: &str = "Other";

/// An optional field value paired with its documented fallback rule.
///
/// Empty and whitespace-only strings count as missing, matching how the
/// source data marks absent text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback<T> {
    Given(T),
    Missing,
}

impl<T> Fallback<T> {
    /// Resolve to the given value, or the documented default.
    pub fn resolve(self, default: T) -> T {
        match self {
            Fallback::Given(value) => value,
            Fallback::Missing => default,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Fallback::Missing)
    }
}

impl<'a> Fallback<&'a str> {
    /// Treat a text field as missing when absent, empty, or whitespace.
    pub fn text(opt: Option<&'a str>) -> Self {
        match opt {
            Some(value) if !value.trim().is_empty() => Fallback::Given(value),
            _ => Fallback::Missing,
        }
    }
}

impl<T> From<Option<T>> for Fallback<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => Fallback::Given(value),
            None => Fallback::Missing,
        }
    }
}
