//! Typed filter state for narrowing which post-its and characters are shown.
//!
//! Each category holds a set of selected values. A category with no selected
//! values places no constraint; an entity must satisfy every non-empty
//! category to match. Values compare case-insensitively.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::doc::{Character, Postit, Tag};

/// What a filter value is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    Dimension,
    Scale,
    Tag,
}

/// Selected values per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    selected: BTreeMap<FilterCategory, BTreeSet<String>>,
}

impl Filters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` in `category`, or deselect it if already selected.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, category: FilterCategory, value: &str) -> bool {
        let key = normalize(category, value);
        let set = self.selected.entry(category).or_default();
        let selected = if set.remove(&key) { false } else { set.insert(key) };
        if set.is_empty() {
            self.selected.remove(&category);
        }
        selected
    }

    /// Drop every selection in `category`.
    pub fn clear(&mut self, category: FilterCategory) {
        self.selected.remove(&category);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected values in `category`, normalized.
    pub fn values(&self, category: FilterCategory) -> impl Iterator<Item = &str> {
        self.selected.get(&category).into_iter().flatten().map(String::as_str)
    }

    #[must_use]
    pub fn matches_postit(&self, postit: &Postit) -> bool {
        self.accepts(FilterCategory::Dimension, Some(&postit.dimension))
            && self.accepts(FilterCategory::Scale, Some(&postit.section))
            && self.accepts_tags(&postit.tags)
    }

    /// Characters without a dimension or scale only match when that
    /// category is unconstrained.
    #[must_use]
    pub fn matches_character(&self, character: &Character) -> bool {
        self.accepts(FilterCategory::Dimension, character.dimension.as_deref())
            && self.accepts(FilterCategory::Scale, character.section.as_deref())
            && self.accepts_tags(&character.tags)
    }

    fn accepts(&self, category: FilterCategory, value: Option<&str>) -> bool {
        let Some(set) = self.selected.get(&category) else {
            return true;
        };
        value.is_some_and(|v| set.contains(&normalize(category, v)))
    }

    fn accepts_tags(&self, tags: &[Tag]) -> bool {
        let Some(set) = self.selected.get(&FilterCategory::Tag) else {
            return true;
        };
        tags.iter().any(|t| set.contains(&t.id()))
    }
}

fn normalize(category: FilterCategory, value: &str) -> String {
    match category {
        FilterCategory::Tag => Tag::normalize_id(value),
        FilterCategory::Dimension | FilterCategory::Scale => value.trim().to_lowercase(),
    }
}
