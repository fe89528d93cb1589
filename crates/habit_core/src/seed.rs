use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::HabitBoard;
use crate::column::{Column, ColumnKey, ColumnRegistry, Icon};
use crate::error::SeedError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeed {
    #[serde(default)]
    pub columns: Vec<ColumnSeed>,
    #[serde(default)]
    pub rows: Vec<RowSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSeed {
    #[serde(default)]
    pub key: Option<String>,
    pub label: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSeed {
    pub label: String,
    /// Column keys checked on this row. Unknown keys are ignored.
    #[serde(default)]
    pub checked: Vec<String>,
}

fn default_visible() -> bool {
    true
}

impl BoardSeed {
    pub fn parse(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("unable to read seed {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid seed {}", path.display()))
    }

    pub fn into_board(self) -> Result<HabitBoard, SeedError> {
        let mut board = HabitBoard::with_columns(ColumnRegistry::default());
        for (index, seed) in self.columns.into_iter().enumerate() {
            let label = seed.label.trim();
            if label.is_empty() {
                return Err(SeedError::EmptyColumnLabel { index });
            }
            let key = match seed.key {
                Some(raw) => ColumnKey::new(raw),
                None => board.fresh_column_key(),
            };
            let mut column = Column::new(key.clone(), label, seed.icon);
            column.visible = seed.visible;
            if !board.push_column(column) {
                return Err(SeedError::DuplicateColumn(key.to_string()));
            }
        }
        for (index, seed) in self.rows.into_iter().enumerate() {
            let label = seed.label.trim();
            if label.is_empty() {
                return Err(SeedError::EmptyRowLabel { index });
            }
            let id = board.push_row(label);
            for key in seed.checked {
                if !board.set_cell(id, &ColumnKey::new(key.as_str()), true) {
                    debug!(row = label, key = %key, "ignoring unknown column in seed");
                }
            }
        }
        Ok(board)
    }
}
