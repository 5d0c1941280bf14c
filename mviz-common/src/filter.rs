//! Filter selection and visible-subset recompute
//!
//! A [`FilterSelection`] holds the category labels the viewer has
//! checked (year ranges, genres, countries). Recomputing the visible
//! subset is a pure, synchronous function of the full dataset and the
//! selection; repeating it with unchanged inputs yields the identical
//! set.

use serde::Deserialize;
use std::collections::BTreeSet;

/// What an empty selection means for a page.
///
/// The visualization pages historically disagreed (the scatter plot
/// treated an empty selection as "show nothing", the genre filters as
/// "show everything"), so the policy is an explicit parameter rather
/// than a convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// An empty selection shows the full dataset.
    #[default]
    ShowAll,
    /// An empty selection shows nothing.
    ShowNone,
}

/// The active set of category labels chosen by the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    labels: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(Into::into)
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated label list as sent in query strings.
    pub fn from_csv(csv: &str) -> Self {
        Self::from_labels(csv.split(','))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// The year-range labels in this selection, parsed.
    pub fn year_ranges(&self) -> Vec<YearRange> {
        self.labels
            .iter()
            .filter_map(|label| YearRange::parse(label))
            .collect()
    }
}

/// An inclusive year range label such as `"1960-1969"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Parse a `"YYYY-YYYY"` label; both endpoints are required and
    /// must be ordered.
    pub fn parse(label: &str) -> Option<Self> {
        let (start, end) = label.split_once('-')?;
        let start: i32 = start.trim().parse().ok()?;
        let end: i32 = end.trim().parse().ok()?;
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Recompute the visible subset by label membership.
///
/// `labels` yields the category labels a record belongs to; a record is
/// visible when any of them is selected.
pub fn visible<'r, R: 'r>(
    records: impl IntoIterator<Item = &'r R>,
    selection: &FilterSelection,
    policy: EmptyPolicy,
    labels: impl Fn(&R) -> Vec<String>,
) -> Vec<&'r R> {
    if selection.is_empty() {
        return match policy {
            EmptyPolicy::ShowAll => records.into_iter().collect(),
            EmptyPolicy::ShowNone => Vec::new(),
        };
    }
    records
        .into_iter()
        .filter(|record| labels(record).iter().any(|label| selection.contains(label)))
        .collect()
}

/// Recompute the visible subset by year-range membership.
///
/// A record is visible when its year falls inside any selected range;
/// records without a year never match a non-empty selection.
pub fn visible_by_year<'r, R: 'r>(
    records: impl IntoIterator<Item = &'r R>,
    selection: &FilterSelection,
    policy: EmptyPolicy,
    year: impl Fn(&R) -> Option<i32>,
) -> Vec<&'r R> {
    if selection.is_empty() {
        return match policy {
            EmptyPolicy::ShowAll => records.into_iter().collect(),
            EmptyPolicy::ShowNone => Vec::new(),
        };
    }
    let ranges = selection.year_ranges();
    records
        .into_iter()
        .filter(|record| {
            year(record).is_some_and(|y| ranges.iter().any(|range| range.contains(y)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        genre: &'static str,
        year: Option<i32>,
    }

    fn dataset() -> Vec<Rec> {
        vec![
            Rec { genre: "Rock", year: Some(1969) },
            Rec { genre: "Jazz", year: Some(1959) },
            Rec { genre: "Pop", year: Some(1984) },
            Rec { genre: "Rock", year: None },
        ]
    }

    fn genre_labels(r: &Rec) -> Vec<String> {
        vec![r.genre.to_string()]
    }

    #[test]
    fn year_range_parsing() {
        assert_eq!(
            YearRange::parse("1960-1969"),
            Some(YearRange { start: 1960, end: 1969 })
        );
        assert_eq!(YearRange::parse("1969"), None);
        assert_eq!(YearRange::parse("1970-1960"), None);
        assert_eq!(YearRange::parse("abcd-efgh"), None);
        assert!(YearRange::parse("1960-1969").unwrap().contains(1960));
        assert!(YearRange::parse("1960-1969").unwrap().contains(1969));
        assert!(!YearRange::parse("1960-1969").unwrap().contains(1970));
    }

    #[test]
    fn label_selection_narrows_records() {
        let records = dataset();
        let selection = FilterSelection::from_labels(["Rock"]);
        let shown = visible(&records, &selection, EmptyPolicy::ShowAll, genre_labels);
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|r| r.genre == "Rock"));
    }

    #[test]
    fn empty_selection_follows_policy() {
        let records = dataset();
        let selection = FilterSelection::new();

        let all = visible(&records, &selection, EmptyPolicy::ShowAll, genre_labels);
        assert_eq!(all.len(), records.len());

        let none = visible(&records, &selection, EmptyPolicy::ShowNone, genre_labels);
        assert!(none.is_empty());
    }

    #[test]
    fn year_selection_ignores_undated_records() {
        let records = dataset();
        let selection = FilterSelection::from_csv("1960-1969,1980-1989");
        let shown = visible_by_year(&records, &selection, EmptyPolicy::ShowAll, |r| r.year);
        let years: Vec<i32> = shown.iter().filter_map(|r| r.year).collect();
        assert_eq!(years, vec![1969, 1984]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let records = dataset();
        let selection = FilterSelection::from_labels(["Jazz", "Pop"]);

        let first: Vec<&str> =
            visible(&records, &selection, EmptyPolicy::ShowNone, genre_labels)
                .iter()
                .map(|r| r.genre)
                .collect();
        let second: Vec<&str> =
            visible(&records, &selection, EmptyPolicy::ShowNone, genre_labels)
                .iter()
                .map(|r| r.genre)
                .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn csv_parsing_trims_and_drops_empties() {
        let selection = FilterSelection::from_csv(" Rock , ,Jazz,");
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("Rock"));
        assert!(selection.contains("Jazz"));
    }
}
