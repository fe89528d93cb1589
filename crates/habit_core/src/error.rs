use thiserror::Error;

use crate::column::ColumnKey;
use crate::row::RowId;

/// Why a board operation declined. A declined operation leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("no row with id {0}")]
    UnknownRow(RowId),
    #[error("no column with key `{0}`")]
    UnknownColumn(ColumnKey),
    #[error("row {0} is already at the edge of the board")]
    AtBoundary(RowId),
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("column key `{0}` appears more than once")]
    DuplicateColumn(String),
    #[error("column {index} has an empty label")]
    EmptyColumnLabel { index: usize },
    #[error("row {index} has an empty label")]
    EmptyRowLabel { index: usize },
}
