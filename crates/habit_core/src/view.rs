use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnKey, ColumnRegistry};
use crate::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Label,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn describe(&self) -> &'static str {
        match (self.key, self.direction) {
            (SortKey::Label, SortDirection::Ascending) => "Name A → Z",
            (SortKey::Label, SortDirection::Descending) => "Name Z → A",
            (SortKey::Completion, SortDirection::Ascending) => "Completion ↑ (least)",
            (SortKey::Completion, SortDirection::Descending) => "Completion ↓ (most)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub search: String,
    pub filter: Option<ColumnKey>,
    pub sort: Option<SortSpec>,
}

impl ViewConfig {
    /// Drops a filter whose column no longer exists.
    pub fn retain_columns(&mut self, columns: &ColumnRegistry) {
        if let Some(key) = &self.filter {
            if !columns.contains(key) {
                self.filter = None;
            }
        }
    }

    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || self.filter.is_some()
    }
}

pub fn project<'a>(rows: &'a [Row], columns: &ColumnRegistry, config: &ViewConfig) -> Vec<&'a Row> {
    let needle = config.search.to_lowercase();
    let mut projected: Vec<&Row> = rows
        .iter()
        .filter(|row| needle.trim().is_empty() || row.label.to_lowercase().contains(&needle))
        .filter(|row| match &config.filter {
            Some(key) => row.value(key),
            None => true,
        })
        .collect();

    if let Some(sort) = config.sort {
        projected.sort_by(|a, b| {
            let ordering = match sort.key {
                SortKey::Label => compare_labels(&a.label, &b.label),
                SortKey::Completion => a.completed(columns).cmp(&b.completed(columns)),
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    projected
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
