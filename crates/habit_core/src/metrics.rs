use serde::Serialize;

use crate::board::HabitBoard;
use crate::column::ColumnKey;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotal {
    pub key: ColumnKey,
    pub checked: usize,
    /// `checked / rows`, 0.0 on an empty board.
    pub fill: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardMetrics {
    pub columns: Vec<ColumnTotal>,
    pub checked: usize,
    pub possible: usize,
    pub percentage: u8,
}

impl BoardMetrics {
    pub fn compute(board: &HabitBoard) -> Self {
        let rows = board.row_count();
        let columns = board
            .columns()
            .visible()
            .map(|column| {
                let checked = column_total(board, &column.key);
                let fill = if rows == 0 {
                    0.0
                } else {
                    checked as f32 / rows as f32
                };
                ColumnTotal {
                    key: column.key.clone(),
                    checked,
                    fill,
                }
            })
            .collect();
        let checked = grand_total_checked(board);
        let possible = total_possible(board);
        Self {
            columns,
            checked,
            possible,
            percentage: completion_percentage(checked, possible),
        }
    }

    pub fn total_for(&self, key: &ColumnKey) -> Option<&ColumnTotal> {
        self.columns.iter().find(|total| &total.key == key)
    }
}

/// Rows with `key` checked, whether or not the column is visible.
pub fn column_total(board: &HabitBoard, key: &ColumnKey) -> usize {
    board.rows().iter().filter(|row| row.value(key)).count()
}

pub fn grand_total_checked(board: &HabitBoard) -> usize {
    board
        .rows()
        .iter()
        .map(|row| row.completed(board.columns()))
        .sum()
}

pub fn total_possible(board: &HabitBoard) -> usize {
    board.row_count() * board.columns().visible_count()
}

pub fn completion_percentage(checked: usize, possible: usize) -> u8 {
    if possible == 0 {
        return 0;
    }
    let ratio = checked.min(possible) as f64 / possible as f64;
    (ratio * 100.0).round() as u8
}
