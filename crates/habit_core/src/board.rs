use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnKey, ColumnRegistry, Icon};
use crate::error::BoardError;
use crate::row::{Row, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn label(self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

/// Column registry plus row store. Every row holds exactly one value per registered column key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitBoard {
    columns: ColumnRegistry,
    rows: Vec<Row>,
    next_row_id: u64,
    next_column_seq: u64,
}

impl Default for HabitBoard {
    fn default() -> Self {
        Self::with_columns(ColumnRegistry::default())
    }
}

impl HabitBoard {
    pub fn with_columns(columns: ColumnRegistry) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            next_row_id: 1,
            next_column_seq: 1,
        }
    }

    pub fn weekly_default() -> Self {
        let mut board = Self::with_columns(ColumnRegistry::weekly_defaults());
        let mut day = Weekday::Mon;
        for _ in 0..7 {
            board.push_row(weekday_name(day));
            day = day.succ();
        }
        board
    }

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn toggle_cell(&self, id: RowId, key: &ColumnKey) -> Result<Self, BoardError> {
        self.require_column(key)?;
        let mut next = self.clone();
        let row = next.row_mut(id)?;
        let cell = row.values.entry(key.clone()).or_insert(false);
        *cell = !*cell;
        Ok(next)
    }

    pub fn add_column(&self, label: &str, icon: Icon) -> Result<Self, BoardError> {
        let label = non_empty(label)?;
        let mut next = self.clone();
        let key = next.fresh_column_key();
        for row in &mut next.rows {
            row.values.insert(key.clone(), false);
        }
        next.columns.push(Column::new(key, label, icon));
        Ok(next)
    }

    /// Removes the column and purges its values from every row.
    pub fn delete_column(&self, key: &ColumnKey) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.columns
            .remove(key)
            .ok_or_else(|| BoardError::UnknownColumn(key.clone()))?;
        for row in &mut next.rows {
            row.values.remove(key);
        }
        Ok(next)
    }

    pub fn toggle_column_visibility(&self, key: &ColumnKey) -> Result<Self, BoardError> {
        let mut next = self.clone();
        let column = next
            .columns
            .get_mut(key)
            .ok_or_else(|| BoardError::UnknownColumn(key.clone()))?;
        column.visible = !column.visible;
        Ok(next)
    }

    pub fn rename_column(&self, key: &ColumnKey, label: &str) -> Result<Self, BoardError> {
        let label = non_empty(label)?;
        let mut next = self.clone();
        let column = next
            .columns
            .get_mut(key)
            .ok_or_else(|| BoardError::UnknownColumn(key.clone()))?;
        column.label = label.to_string();
        Ok(next)
    }

    pub fn add_row(&self, label: &str) -> Result<Self, BoardError> {
        let label = non_empty(label)?;
        let mut next = self.clone();
        next.push_row(label);
        Ok(next)
    }

    pub fn delete_row(&self, id: RowId) -> Result<Self, BoardError> {
        let index = self.row_index(id)?;
        let mut next = self.clone();
        next.rows.remove(index);
        Ok(next)
    }

    pub fn rename_row(&self, id: RowId, label: &str) -> Result<Self, BoardError> {
        let label = non_empty(label)?;
        let mut next = self.clone();
        next.row_mut(id)?.label = label.to_string();
        Ok(next)
    }

    /// Appends a copy with a fresh id. The new label is not guaranteed to be unique.
    pub fn duplicate_row(&self, id: RowId) -> Result<Self, BoardError> {
        let source = self.row(id).ok_or(BoardError::UnknownRow(id))?;
        let mut next = self.clone();
        let copy = Row {
            id: next.fresh_row_id(),
            label: format!("{} (copy)", source.label),
            values: source.values.clone(),
        };
        next.rows.push(copy);
        Ok(next)
    }

    pub fn clear_row(&self, id: RowId) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.row_mut(id)?.fill(false);
        Ok(next)
    }

    pub fn check_row(&self, id: RowId) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.row_mut(id)?.fill(true);
        Ok(next)
    }

    pub fn move_row(&self, id: RowId, direction: MoveDirection) -> Result<Self, BoardError> {
        let index = self.row_index(id)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|target| *target < self.rows.len()),
        }
        .ok_or(BoardError::AtBoundary(id))?;
        let mut next = self.clone();
        next.rows.swap(index, target);
        Ok(next)
    }

    pub fn reset_all(&self) -> Self {
        self.filled(false)
    }

    /// Unchecks everything when every visible cell is checked, otherwise checks everything.
    /// Hidden columns follow along.
    pub fn toggle_all(&self) -> Self {
        self.filled(!self.all_visible_checked())
    }

    pub fn all_visible_checked(&self) -> bool {
        self.rows.iter().all(|row| {
            self.columns
                .visible()
                .all(|column| row.value(&column.key))
        })
    }

    pub(crate) fn push_row(&mut self, label: impl Into<String>) -> RowId {
        let id = self.fresh_row_id();
        self.rows.push(Row::blank(id, label, &self.columns));
        id
    }

    /// Registers a column built outside the board (seed data). Returns false on a key clash.
    pub(crate) fn push_column(&mut self, column: Column) -> bool {
        if self.columns.contains(&column.key) {
            return false;
        }
        for row in &mut self.rows {
            row.values.insert(column.key.clone(), false);
        }
        self.columns.push(column);
        true
    }

    pub(crate) fn fresh_column_key(&mut self) -> ColumnKey {
        loop {
            let key = ColumnKey::generate(self.next_column_seq);
            self.next_column_seq += 1;
            if !self.columns.contains(&key) {
                return key;
            }
        }
    }

    pub(crate) fn set_cell(&mut self, id: RowId, key: &ColumnKey, value: bool) -> bool {
        if !self.columns.contains(key) {
            return false;
        }
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.values.insert(key.clone(), value);
                true
            }
            None => false,
        }
    }

    fn filled(&self, value: bool) -> Self {
        let mut next = self.clone();
        for row in &mut next.rows {
            row.fill(value);
        }
        next
    }

    fn fresh_row_id(&mut self) -> RowId {
        let id = RowId::new(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    fn row_index(&self, id: RowId) -> Result<usize, BoardError> {
        self.rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(BoardError::UnknownRow(id))
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut Row, BoardError> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(BoardError::UnknownRow(id))
    }

    fn require_column(&self, key: &ColumnKey) -> Result<(), BoardError> {
        if self.columns.contains(key) {
            Ok(())
        } else {
            Err(BoardError::UnknownColumn(key.clone()))
        }
    }
}

fn non_empty(label: &str) -> Result<&str, BoardError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        Err(BoardError::EmptyLabel)
    } else {
        Ok(trimmed)
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(board: &HabitBoard) -> Vec<&str> {
        board.rows().iter().map(|row| row.label.as_str()).collect()
    }

    fn row_id(board: &HabitBoard, label: &str) -> RowId {
        board
            .rows()
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.id)
            .unwrap()
    }

    fn values_match_registry(board: &HabitBoard) -> bool {
        let keys: Vec<&ColumnKey> = board.columns().keys().collect();
        board.rows().iter().all(|row| {
            row.values.len() == keys.len() && keys.iter().all(|key| row.values.contains_key(*key))
        })
    }

    #[test]
    fn weekly_default_has_seven_days_and_five_habits() {
        let board = HabitBoard::weekly_default();
        assert_eq!(
            labels(&board),
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert_eq!(board.columns().len(), 5);
        assert!(values_match_registry(&board));
    }

    #[test]
    fn toggle_cell_flips_one_value_and_leaves_original_untouched() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let key = ColumnKey::from("workout");
        let next = board.toggle_cell(monday, &key).unwrap();
        assert!(next.row(monday).unwrap().value(&key));
        assert!(!board.row(monday).unwrap().value(&key));
        let back = next.toggle_cell(monday, &key).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn toggle_cell_rejects_unknown_targets() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        assert_eq!(
            board.toggle_cell(monday, &"nope".into()),
            Err(BoardError::UnknownColumn("nope".into()))
        );
        let ghost = RowId::new(999);
        assert_eq!(
            board.toggle_cell(ghost, &"workout".into()),
            Err(BoardError::UnknownRow(ghost))
        );
    }

    #[test]
    fn adding_a_column_backfills_every_row() {
        let board = HabitBoard::weekly_default();
        let next = board.add_column("  Hydration ", Icon::Zap).unwrap();
        assert_eq!(next.row_count(), 7);
        let column = next.columns().iter().last().unwrap();
        assert_eq!(column.label, "Hydration");
        assert!(column.visible);
        assert!(next
            .rows()
            .iter()
            .all(|row| row.values.get(&column.key) == Some(&false)));
        assert!(values_match_registry(&next));
    }

    #[test]
    fn blank_labels_are_rejected() {
        let board = HabitBoard::weekly_default();
        assert_eq!(board.add_column("   ", Icon::Zap), Err(BoardError::EmptyLabel));
        assert_eq!(board.add_row(""), Err(BoardError::EmptyLabel));
        let monday = row_id(&board, "Monday");
        assert_eq!(board.rename_row(monday, " \t"), Err(BoardError::EmptyLabel));
    }

    #[test]
    fn new_column_keys_are_never_reused() {
        let board = HabitBoard::weekly_default();
        let first = board.add_column("Hydration", Icon::Zap).unwrap();
        let key = first.columns().iter().last().unwrap().key.clone();
        let removed = first.delete_column(&key).unwrap();
        let second = removed.add_column("Hydration", Icon::Zap).unwrap();
        let new_key = &second.columns().iter().last().unwrap().key;
        assert_ne!(new_key, &key);
    }

    #[test]
    fn deleting_a_column_purges_row_values() {
        let board = HabitBoard::weekly_default();
        let key = ColumnKey::from("sleep");
        let next = board.delete_column(&key).unwrap();
        assert!(!next.columns().contains(&key));
        assert!(next.rows().iter().all(|row| !row.values.contains_key(&key)));
        assert!(values_match_registry(&next));
        assert_eq!(
            next.delete_column(&key),
            Err(BoardError::UnknownColumn(key))
        );
    }

    #[test]
    fn hidden_columns_keep_their_values() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let key = ColumnKey::from("study");
        let next = board
            .toggle_cell(monday, &key)
            .unwrap()
            .toggle_column_visibility(&key)
            .unwrap();
        assert!(!next.columns().get(&key).unwrap().visible);
        assert!(next.row(monday).unwrap().value(&key));
    }

    #[test]
    fn duplicate_appends_copy_with_fresh_id() {
        let board = HabitBoard::weekly_default();
        let tuesday = row_id(&board, "Tuesday");
        let board = board.check_row(tuesday).unwrap();
        let next = board.duplicate_row(tuesday).unwrap();
        let copy = next.rows().last().unwrap();
        assert_eq!(copy.label, "Tuesday (copy)");
        assert_ne!(copy.id, tuesday);
        assert_eq!(copy.values, next.row(tuesday).unwrap().values);
        assert_eq!(next.row_count(), 8);
    }

    #[test]
    fn clear_and_check_row_touch_only_that_row() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let checked = board.check_row(monday).unwrap();
        assert!(checked.row(monday).unwrap().values.values().all(|v| *v));
        assert!(!checked.all_visible_checked());
        let cleared = checked.clear_row(monday).unwrap();
        assert_eq!(cleared, board);
    }

    #[test]
    fn move_row_swaps_neighbours_and_stops_at_edges() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let sunday = row_id(&board, "Sunday");
        assert_eq!(
            board.move_row(monday, MoveDirection::Up),
            Err(BoardError::AtBoundary(monday))
        );
        assert_eq!(
            board.move_row(sunday, MoveDirection::Down),
            Err(BoardError::AtBoundary(sunday))
        );
        let moved = board.move_row(monday, MoveDirection::Down).unwrap();
        assert_eq!(&labels(&moved)[..3], ["Tuesday", "Monday", "Wednesday"]);
    }

    #[test]
    fn delete_row_removes_exactly_one() {
        let board = HabitBoard::weekly_default();
        let wednesday = row_id(&board, "Wednesday");
        let next = board.delete_row(wednesday).unwrap();
        assert_eq!(next.row_count(), 6);
        assert!(next.row(wednesday).is_none());
        assert_eq!(
            next.delete_row(wednesday),
            Err(BoardError::UnknownRow(wednesday))
        );
    }

    #[test]
    fn rename_row_and_column() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let next = board
            .rename_row(monday, " Day 1 ")
            .unwrap()
            .rename_column(&"study".into(), "Deep work")
            .unwrap();
        assert_eq!(next.row(monday).unwrap().label, "Day 1");
        assert_eq!(next.columns().get(&"study".into()).unwrap().label, "Deep work");
    }

    #[test]
    fn toggle_all_is_an_involution_on_uniform_boards() {
        let board = HabitBoard::weekly_default();
        let all_on = board.toggle_all();
        assert!(all_on.all_visible_checked());
        assert_eq!(all_on.toggle_all(), board);
    }

    #[test]
    fn toggle_all_checks_everything_when_partially_checked() {
        let board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let partial = board.toggle_cell(monday, &"workout".into()).unwrap();
        assert!(partial.toggle_all().all_visible_checked());
    }

    #[test]
    fn toggle_all_ignores_hidden_columns_for_the_check_but_sets_them() {
        let board = HabitBoard::weekly_default();
        let hidden = ColumnKey::from("journal");
        let board = board.toggle_column_visibility(&hidden).unwrap();
        let mut checked_visible = board.clone();
        let ids: Vec<RowId> = board.rows().iter().map(|row| row.id).collect();
        for id in ids {
            for key in ["workout", "meditate", "sleep", "study"] {
                checked_visible = checked_visible.toggle_cell(id, &key.into()).unwrap();
            }
        }
        assert!(checked_visible.all_visible_checked());
        let off = checked_visible.toggle_all();
        assert!(off.rows().iter().all(|row| row.values.values().all(|v| !v)));
    }

    #[test]
    fn empty_board_counts_as_all_checked() {
        let board = HabitBoard::with_columns(ColumnRegistry::weekly_defaults());
        assert!(board.all_visible_checked());
        assert_eq!(board.toggle_all(), board);
    }

    #[test]
    fn toggle_all_with_every_column_hidden_clears_hidden_values() {
        let mut board = HabitBoard::weekly_default();
        let monday = row_id(&board, "Monday");
        let friday = row_id(&board, "Friday");
        board = board.toggle_cell(monday, &"workout".into()).unwrap();
        board = board.toggle_cell(friday, &"journal".into()).unwrap();
        for key in ["workout", "meditate", "sleep", "journal", "study"] {
            board = board.toggle_column_visibility(&key.into()).unwrap();
        }
        assert!(board.all_visible_checked());
        let off = board.toggle_all();
        assert!(off.rows().iter().all(|row| row.values.values().all(|v| !v)));
        assert!(values_match_registry(&off));
    }

    #[test]
    fn reset_all_clears_every_value() {
        let board = HabitBoard::weekly_default().toggle_all();
        let reset = board.reset_all();
        assert!(reset.rows().iter().all(|row| row.values.values().all(|v| !v)));
    }
}
