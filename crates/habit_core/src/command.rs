use crate::board::{HabitBoard, MoveDirection};
use crate::column::{ColumnKey, Icon};
use crate::error::BoardError;
use crate::row::RowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    ToggleCell { row: RowId, column: ColumnKey },
    AddColumn { label: String, icon: Icon },
    DeleteColumn(ColumnKey),
    ToggleColumnVisibility(ColumnKey),
    RenameColumn { column: ColumnKey, label: String },
    AddRow { label: String },
    DeleteRow(RowId),
    RenameRow { row: RowId, label: String },
    DuplicateRow(RowId),
    ClearRow(RowId),
    CheckRow(RowId),
    MoveRow { row: RowId, direction: MoveDirection },
    ResetAll,
    ToggleAll,
}

/// Outcome of an accepted command: the next board and the status line to flash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub board: HabitBoard,
    pub status: String,
}

impl BoardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BoardCommand::ToggleCell { .. } => "toggle_cell",
            BoardCommand::AddColumn { .. } => "add_column",
            BoardCommand::DeleteColumn(_) => "delete_column",
            BoardCommand::ToggleColumnVisibility(_) => "toggle_column_visibility",
            BoardCommand::RenameColumn { .. } => "rename_column",
            BoardCommand::AddRow { .. } => "add_row",
            BoardCommand::DeleteRow(_) => "delete_row",
            BoardCommand::RenameRow { .. } => "rename_row",
            BoardCommand::DuplicateRow(_) => "duplicate_row",
            BoardCommand::ClearRow(_) => "clear_row",
            BoardCommand::CheckRow(_) => "check_row",
            BoardCommand::MoveRow { .. } => "move_row",
            BoardCommand::ResetAll => "reset_all",
            BoardCommand::ToggleAll => "toggle_all",
        }
    }

    pub fn apply(&self, board: &HabitBoard) -> Result<Applied, BoardError> {
        let (next, status) = match self {
            BoardCommand::ToggleCell { row, column } => {
                let next = board.toggle_cell(*row, column)?;
                let status = match (next.row(*row), next.columns().get(column)) {
                    (Some(r), Some(c)) => format!(
                        "{} · {} {}",
                        r.label,
                        c.label,
                        if r.value(column) { "checked" } else { "unchecked" }
                    ),
                    _ => String::new(),
                };
                (next, status)
            }
            BoardCommand::AddColumn { label, icon } => {
                let next = board.add_column(label, *icon)?;
                let status = format!("\"{}\" column added", label.trim());
                (next, status)
            }
            BoardCommand::DeleteColumn(key) => {
                (board.delete_column(key)?, "Column removed".to_string())
            }
            BoardCommand::ToggleColumnVisibility(key) => {
                let next = board.toggle_column_visibility(key)?;
                let status = match next.columns().get(key) {
                    Some(column) if column.visible => format!("\"{}\" shown", column.label),
                    Some(column) => format!("\"{}\" hidden", column.label),
                    None => String::new(),
                };
                (next, status)
            }
            BoardCommand::RenameColumn { column, label } => {
                let next = board.rename_column(column, label)?;
                (next, format!("Column renamed to \"{}\"", label.trim()))
            }
            BoardCommand::AddRow { label } => {
                let next = board.add_row(label)?;
                (next, format!("\"{}\" added", label.trim()))
            }
            BoardCommand::DeleteRow(id) => {
                let label = row_label(board, *id)?;
                (board.delete_row(*id)?, format!("\"{label}\" deleted"))
            }
            BoardCommand::RenameRow { row, label } => {
                let next = board.rename_row(*row, label)?;
                (next, format!("Row renamed to \"{}\"", label.trim()))
            }
            BoardCommand::DuplicateRow(id) => {
                (board.duplicate_row(*id)?, "Row duplicated".to_string())
            }
            BoardCommand::ClearRow(id) => (board.clear_row(*id)?, "Row cleared".to_string()),
            BoardCommand::CheckRow(id) => {
                let label = row_label(board, *id)?;
                (board.check_row(*id)?, format!("All checked for {label}"))
            }
            BoardCommand::MoveRow { row, direction } => {
                let label = row_label(board, *row)?;
                let next = board.move_row(*row, *direction)?;
                (next, format!("Moved \"{label}\" {}", direction.label()))
            }
            BoardCommand::ResetAll => (board.reset_all(), "All habits reset".to_string()),
            BoardCommand::ToggleAll => {
                let status = if board.all_visible_checked() {
                    "All unchecked"
                } else {
                    "All habits checked"
                };
                (board.toggle_all(), status.to_string())
            }
        };
        Ok(Applied {
            board: next,
            status,
        })
    }
}

fn row_label(board: &HabitBoard, id: RowId) -> Result<String, BoardError> {
    board
        .row(id)
        .map(|row| row.label.clone())
        .ok_or(BoardError::UnknownRow(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_row(board: &HabitBoard) -> RowId {
        board.rows()[0].id
    }

    #[test]
    fn status_lines_describe_the_change() {
        let board = HabitBoard::weekly_default();
        let monday = first_row(&board);

        let applied = BoardCommand::ToggleCell {
            row: monday,
            column: "workout".into(),
        }
        .apply(&board)
        .unwrap();
        assert_eq!(applied.status, "Monday · Workout checked");

        let applied = BoardCommand::AddColumn {
            label: " Hydration ".into(),
            icon: Icon::Zap,
        }
        .apply(&board)
        .unwrap();
        assert_eq!(applied.status, "\"Hydration\" column added");

        let applied = BoardCommand::DeleteRow(monday).apply(&board).unwrap();
        assert_eq!(applied.status, "\"Monday\" deleted");

        let applied = BoardCommand::CheckRow(monday).apply(&board).unwrap();
        assert_eq!(applied.status, "All checked for Monday");

        let applied = BoardCommand::ToggleColumnVisibility("study".into())
            .apply(&board)
            .unwrap();
        assert_eq!(applied.status, "\"Study\" hidden");
    }

    #[test]
    fn toggle_all_status_follows_current_state() {
        let board = HabitBoard::weekly_default();
        let on = BoardCommand::ToggleAll.apply(&board).unwrap();
        assert_eq!(on.status, "All habits checked");
        let off = BoardCommand::ToggleAll.apply(&on.board).unwrap();
        assert_eq!(off.status, "All unchecked");
        assert_eq!(off.board, board);
    }

    #[test]
    fn rejected_commands_surface_the_reason() {
        let board = HabitBoard::weekly_default();
        let monday = first_row(&board);
        assert_eq!(
            BoardCommand::MoveRow {
                row: monday,
                direction: MoveDirection::Up,
            }
            .apply(&board),
            Err(BoardError::AtBoundary(monday))
        );
        assert_eq!(
            BoardCommand::AddRow { label: "  ".into() }.apply(&board),
            Err(BoardError::EmptyLabel)
        );
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(BoardCommand::ResetAll.name(), "reset_all");
        assert_eq!(
            BoardCommand::DuplicateRow(first_row(&HabitBoard::weekly_default())).name(),
            "duplicate_row"
        );
    }
}
