//! Emotion tag processing and the emotions/genres tree
//!
//! Crosses the emotion tag file with the social tag file: tags that
//! name a known emotion accumulate emotion weight, tags containing a
//! known sub-genre term accumulate genre weight, and entries carrying
//! both contribute a relationship strength per emotion/genre pair.
//! The result renders as a treemap rooted at "Music Emotions and
//! Genres".

use crate::genres::GenreMap;
use crate::hierarchy::{GroupNode, Leaf, TreeNode};
use crate::records::{EmotionTagEntry, SocialTagEntry};
use std::collections::BTreeMap;
use tracing::debug;

/// Color for emotions absent from the color table.
pub const DEFAULT_EMOTION_COLOR: &str = "#808080";

/// Genres shown per emotion in the tree.
const TOP_GENRES_PER_EMOTION: usize = 20;

/// Psychological color associations for the common emotion tags.
pub fn emotion_color(emotion: &str) -> &'static str {
    match emotion {
        // Calm group - blues and soft teals
        "mellow" | "serene" | "serenity" => "#89CFF0",
        "calm" => "#7CB9E8",
        "relaxing" | "relax" => "#73C2FB",
        "peaceful" | "gentle" => "#B6D0E2",
        "tranquil" | "soothing" => "#A5D7E8",
        "quiet" => "#D6E2E9",
        "soft" => "#C3E0E5",
        // Sad group - deep blues and purples
        "sad" | "sorrow" => "#4B0082",
        "melancholy" | "melancholic" => "#483D8B",
        "blue" => "#4169E1",
        "heartbreak" => "#2E4053",
        "gloomy" | "bleak" => "#34495E",
        "grief" | "depressive" => "#2C3E50",
        // Happy group - yellows and warm colors
        "happy" | "cheerful" => "#FFD700",
        "fun" | "lively" | "playful" => "#FFB347",
        "joyful" => "#FFC30B",
        "bright" => "#FFE87C",
        // Energetic group - reds and oranges
        "energetic" | "intense" | "exciting" => "#FF4500",
        "passionate" | "fierce" | "fiery" => "#FF0000",
        // Dark group
        "dark" => "#1A1A1A",
        "angry" | "aggressive" | "rage" => "#8B0000",
        // Romantic group - pinks and purples
        "romantic" | "desire" | "party" => "#FF69B4",
        "sexy" | "passion" => "#FF1493",
        "tender" | "bittersweet" => "#DDA0DD",
        // Dreamy group
        "dreamy" | "delicate" => "#E6E6FA",
        "poignant" => "#D8BFD8",
        // Playful group
        "funny" | "humor" | "silly" => "#FFA07A",
        _ => DEFAULT_EMOTION_COLOR,
    }
}

/// Emotions that actually occur in the emotion tag file, lowercased,
/// with their total tag counts. Zero-count tags are ignored.
pub fn valid_emotions(entries: &[EmotionTagEntry]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for entry in entries {
        for emotion in &entry.emotions {
            if emotion.nbr_tags > 0 {
                *counts.entry(emotion.emotion_tag.to_lowercase()).or_default() +=
                    emotion.nbr_tags;
            }
        }
    }
    counts
}

/// Accumulated relationship strength per emotion, per genre term.
pub type EmotionGenreMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Cross emotion tags with genre terms found in the social tags.
///
/// Per entry, tag counts accumulate into per-song emotion and genre
/// totals; an entry with both sides contributes
/// `(emotion_count + genre_count) / 2` to every emotion/genre pair it
/// carries. Entries missing either side are skipped.
pub fn emotion_genre_map(
    valid: &BTreeMap<String, u64>,
    socials: &[SocialTagEntry],
    genres: &GenreMap,
) -> EmotionGenreMap {
    let mut map = EmotionGenreMap::new();
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for entry in socials {
        let mut song_emotions: BTreeMap<String, u64> = BTreeMap::new();
        let mut song_genres: BTreeMap<String, u64> = BTreeMap::new();

        for tag in &entry.socials {
            if tag.nbr_tags == 0 {
                continue;
            }
            let tag_name = tag.social_tag.to_lowercase();
            if valid.contains_key(&tag_name) {
                *song_emotions.entry(tag_name.clone()).or_default() += tag.nbr_tags;
            }
            if let Some(term) = genres.matching_term(&tag_name) {
                *song_genres.entry(term.to_string()).or_default() += tag.nbr_tags;
            }
        }

        if song_emotions.is_empty() || song_genres.is_empty() {
            skipped += 1;
            continue;
        }
        for (emotion, emotion_count) in &song_emotions {
            for (genre, genre_count) in &song_genres {
                let strength = (emotion_count + genre_count) as f64 / 2.0;
                *map.entry(emotion.clone())
                    .or_default()
                    .entry(genre.clone())
                    .or_default() += strength;
            }
        }
        processed += 1;
    }

    debug!(
        "Crossed {} social tag entries ({} skipped without both sides)",
        processed, skipped
    );
    map
}

/// Build the "Music Emotions and Genres" tree: emotions descending by
/// total strength, each limited to its strongest genres.
pub fn build_emotions_tree(map: &EmotionGenreMap) -> GroupNode {
    let mut emotions: Vec<(&String, &BTreeMap<String, f64>)> = map.iter().collect();
    emotions.sort_by(|a, b| {
        let total_a: f64 = a.1.values().sum();
        let total_b: f64 = b.1.values().sum();
        total_b
            .partial_cmp(&total_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let children: Vec<TreeNode> = emotions
        .into_iter()
        .map(|(emotion, genres)| {
            let mut ranked: Vec<(&String, f64)> =
                genres.iter().map(|(genre, value)| (genre, *value)).collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            ranked.truncate(TOP_GENRES_PER_EMOTION);

            let leaves: Vec<TreeNode> = ranked
                .into_iter()
                .map(|(genre, value)| {
                    TreeNode::Leaf(Leaf::new(genre.clone(), value).with_label(emotion.clone()))
                })
                .collect();
            let value = leaves.iter().map(TreeNode::value).sum();

            TreeNode::Group(GroupNode {
                name: emotion.clone(),
                value,
                color: Some(emotion_color(emotion).to_string()),
                children: leaves,
            })
        })
        .collect();

    GroupNode {
        name: "Music Emotions and Genres".to_string(),
        value: children.iter().map(TreeNode::value).sum(),
        color: None,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EmotionCount, SocialCount};

    fn emotion_entries() -> Vec<EmotionTagEntry> {
        vec![EmotionTagEntry {
            emotions: vec![
                EmotionCount { emotion_tag: "Happy".into(), nbr_tags: 5 },
                EmotionCount { emotion_tag: "sad".into(), nbr_tags: 3 },
                EmotionCount { emotion_tag: "ignored".into(), nbr_tags: 0 },
            ],
        }]
    }

    fn genre_map() -> GenreMap {
        GenreMap::from_json(r#"{"Rock": {"rock": true}, "Jazz": {"jazz": true}}"#).unwrap()
    }

    #[test]
    fn valid_emotions_lowercase_and_drop_zero_counts() {
        let valid = valid_emotions(&emotion_entries());
        assert_eq!(valid.get("happy"), Some(&5));
        assert_eq!(valid.get("sad"), Some(&3));
        assert!(!valid.contains_key("ignored"));
    }

    #[test]
    fn entries_without_both_sides_are_skipped() {
        let valid = valid_emotions(&emotion_entries());
        let socials = vec![
            // emotion only, no genre: skipped
            SocialTagEntry {
                socials: vec![SocialCount { social_tag: "happy".into(), nbr_tags: 4 }],
            },
            // both sides: contributes (4 + 6) / 2 = 5
            SocialTagEntry {
                socials: vec![
                    SocialCount { social_tag: "happy".into(), nbr_tags: 4 },
                    SocialCount { social_tag: "classic rock".into(), nbr_tags: 6 },
                ],
            },
        ];
        let map = emotion_genre_map(&valid, &socials, &genre_map());
        assert_eq!(map.len(), 1);
        assert_eq!(map["happy"]["rock"], 5.0);
    }

    #[test]
    fn tree_orders_emotions_by_total_strength() {
        let mut map = EmotionGenreMap::new();
        map.entry("sad".into()).or_default().insert("jazz".into(), 10.0);
        map.entry("happy".into()).or_default().insert("rock".into(), 30.0);

        let tree = build_emotions_tree(&map);
        assert_eq!(tree.name, "Music Emotions and Genres");
        assert_eq!(tree.children[0].name(), "happy");
        assert_eq!(tree.children[1].name(), "sad");
        assert!((tree.value - 40.0).abs() < 1e-9);
    }

    #[test]
    fn emotion_groups_carry_colors() {
        let mut map = EmotionGenreMap::new();
        map.entry("happy".into()).or_default().insert("rock".into(), 1.0);
        map.entry("unheard-of".into()).or_default().insert("rock".into(), 1.0);

        let tree = build_emotions_tree(&map);
        let colors: Vec<Option<String>> = tree
            .children
            .iter()
            .map(|child| match child {
                TreeNode::Group(group) => group.color.clone(),
                TreeNode::Leaf(_) => None,
            })
            .collect();
        assert!(colors.contains(&Some("#FFD700".to_string())));
        assert!(colors.contains(&Some(DEFAULT_EMOTION_COLOR.to_string())));
    }
}
