//! Hierarchy building for treemap/sunburst style charts
//!
//! Flat records group into nested `{name, value, children}` trees the
//! chart pages consume directly. A group's value is always the sum of
//! its descendant leaf values.

use serde::Serialize;
use std::collections::HashMap;

/// Weight-carrying leaf of a chart hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Auxiliary label shown by tooltips (artist name, emotion, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Leaf {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            color: None,
            label: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Inner node of a chart hierarchy; `value` aggregates the subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub children: Vec<TreeNode>,
}

/// Either a nested group or a leaf record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Group(GroupNode),
    Leaf(Leaf),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Group(group) => &group.name,
            TreeNode::Leaf(leaf) => &leaf.name,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            TreeNode::Group(group) => group.value,
            TreeNode::Leaf(leaf) => leaf.value,
        }
    }

    /// Sum of the leaf values underneath this node.
    pub fn leaf_sum(&self) -> f64 {
        match self {
            TreeNode::Leaf(leaf) => leaf.value,
            TreeNode::Group(group) => group.children.iter().map(TreeNode::leaf_sum).sum(),
        }
    }
}

/// Build a nested tree from flat records.
///
/// Each entry of `keys` groups one level of the hierarchy; records at
/// the bottom level turn into leaves via `leaf`. Groups keep
/// first-appearance order while forming, then siblings sort descending
/// by aggregate weight. The sort is stable, so equal weights keep
/// input order.
pub fn build_tree<'r, R: 'r>(
    root_name: &str,
    records: impl IntoIterator<Item = &'r R>,
    keys: &[&dyn Fn(&R) -> String],
    leaf: &dyn Fn(&R) -> Leaf,
) -> GroupNode {
    let records: Vec<&R> = records.into_iter().collect();
    build_level(root_name, &records, keys, leaf)
}

fn build_level<R>(
    name: &str,
    records: &[&R],
    keys: &[&dyn Fn(&R) -> String],
    leaf: &dyn Fn(&R) -> Leaf,
) -> GroupNode {
    let mut children: Vec<TreeNode> = match keys.split_first() {
        None => records.iter().map(|r| TreeNode::Leaf(leaf(r))).collect(),
        Some((key, rest)) => {
            // Group by key, preserving first-appearance order.
            let mut order: Vec<String> = Vec::new();
            let mut groups: HashMap<String, Vec<&R>> = HashMap::new();
            for record in records {
                let group_key = key(record);
                if !groups.contains_key(&group_key) {
                    order.push(group_key.clone());
                }
                groups.entry(group_key).or_default().push(record);
            }
            order
                .iter()
                .map(|k| TreeNode::Group(build_level(k, &groups[k], rest, leaf)))
                .collect()
        }
    };

    children.sort_by(|a, b| {
        b.value()
            .partial_cmp(&a.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let value = children.iter().map(TreeNode::value).sum();

    GroupNode {
        name: name.to_string(),
        value,
        color: None,
        children,
    }
}
