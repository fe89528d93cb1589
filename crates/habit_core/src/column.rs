use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Stable identifier of a habit column. Never reused once a column is deleted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for a column created at runtime: creation time plus the board's sequence number.
    pub(crate) fn generate(sequence: u64) -> Self {
        Self(format!("col_{}_{}", Utc::now().timestamp_millis(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Icon {
    Dumbbell,
    Brain,
    Moon,
    Pen,
    Book,
    Heart,
    #[default]
    Activity,
    Zap,
}

impl Icon {
    pub const ALL: [Icon; 8] = [
        Icon::Dumbbell,
        Icon::Brain,
        Icon::Moon,
        Icon::Pen,
        Icon::Book,
        Icon::Heart,
        Icon::Activity,
        Icon::Zap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Icon::Dumbbell => "Dumbbell",
            Icon::Brain => "Brain",
            Icon::Moon => "Moon",
            Icon::Pen => "Pen",
            Icon::Book => "Book",
            Icon::Heart => "Heart",
            Icon::Activity => "Activity",
            Icon::Zap => "Zap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: ColumnKey,
    pub label: String,
    pub icon: Icon,
    pub visible: bool,
}

impl Column {
    pub fn new(key: impl Into<ColumnKey>, label: impl Into<String>, icon: Icon) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
}

impl ColumnRegistry {
    /// Builds a registry, keeping the first column for any repeated key.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut registry = Self::default();
        for column in columns {
            if !registry.contains(&column.key) {
                registry.columns.push(column);
            }
        }
        registry
    }

    pub fn weekly_defaults() -> Self {
        Self::from_columns([
            Column::new("workout", "Workout", Icon::Dumbbell),
            Column::new("meditate", "Meditate", Icon::Brain),
            Column::new("sleep", "Sleep 8h", Icon::Moon),
            Column::new("journal", "Journal", Icon::Pen),
            Column::new("study", "Study", Icon::Book),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.columns.iter().map(|column| &column.key)
    }

    pub fn get(&self, key: &ColumnKey) -> Option<&Column> {
        self.columns.iter().find(|column| &column.key == key)
    }

    pub fn contains(&self, key: &ColumnKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn get_mut(&mut self, key: &ColumnKey) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| &column.key == key)
    }

    pub(crate) fn push(&mut self, column: Column) {
        debug_assert!(!self.contains(&column.key));
        self.columns.push(column);
    }

    pub(crate) fn remove(&mut self, key: &ColumnKey) -> Option<Column> {
        let index = self.columns.iter().position(|column| &column.key == key)?;
        Some(self.columns.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_first_of_duplicate_keys() {
        let registry = ColumnRegistry::from_columns([
            Column::new("read", "Read", Icon::Book),
            Column::new("read", "Read again", Icon::Pen),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&"read".into()).unwrap().label, "Read");
    }

    #[test]
    fn visible_skips_hidden_columns() {
        let mut registry = ColumnRegistry::weekly_defaults();
        registry.get_mut(&"sleep".into()).unwrap().visible = false;
        let visible: Vec<&str> = registry.visible().map(|c| c.key.as_str()).collect();
        assert_eq!(visible, ["workout", "meditate", "journal", "study"]);
        assert_eq!(registry.visible_count(), 4);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn generated_keys_differ_by_sequence() {
        assert_ne!(ColumnKey::generate(1), ColumnKey::generate(2));
        assert!(ColumnKey::generate(7).as_str().starts_with("col_"));
    }
}
