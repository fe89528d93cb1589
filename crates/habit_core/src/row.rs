use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnKey, ColumnRegistry};

/// Identity of a row, assigned at creation and independent of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub label: String,
    pub values: BTreeMap<ColumnKey, bool>,
}

impl Row {
    pub(crate) fn blank(id: RowId, label: impl Into<String>, columns: &ColumnRegistry) -> Self {
        Self {
            id,
            label: label.into(),
            values: columns.keys().map(|key| (key.clone(), false)).collect(),
        }
    }

    pub fn value(&self, key: &ColumnKey) -> bool {
        self.values.get(key).copied().unwrap_or(false)
    }

    pub fn completed(&self, columns: &ColumnRegistry) -> usize {
        columns
            .visible()
            .filter(|column| self.value(&column.key))
            .count()
    }

    pub(crate) fn fill(&mut self, value: bool) {
        for cell in self.values.values_mut() {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, Icon};

    #[test]
    fn blank_row_has_every_column_unchecked() {
        let columns = ColumnRegistry::weekly_defaults();
        let row = Row::blank(RowId::new(1), "Monday", &columns);
        assert_eq!(row.values.len(), columns.len());
        assert!(row.values.values().all(|value| !value));
    }

    #[test]
    fn completed_counts_only_visible_columns() {
        let mut columns = ColumnRegistry::from_columns([
            Column::new("a", "A", Icon::Zap),
            Column::new("b", "B", Icon::Zap),
        ]);
        let mut row = Row::blank(RowId::new(1), "Monday", &columns);
        row.fill(true);
        assert_eq!(row.completed(&columns), 2);
        columns.get_mut(&"b".into()).unwrap().visible = false;
        assert_eq!(row.completed(&columns), 1);
    }

    #[test]
    fn missing_key_reads_as_unchecked() {
        let columns = ColumnRegistry::default();
        let row = Row::blank(RowId::new(3), "Sunday", &columns);
        assert!(!row.value(&"ghost".into()));
    }
}
