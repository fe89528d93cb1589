use tracing::{debug, info};

use crate::board::HabitBoard;
use crate::column::{Column, ColumnKey, ColumnRegistry};
use crate::command::BoardCommand;
use crate::error::{BoardError, SeedError};
use crate::metrics::BoardMetrics;
use crate::row::Row;
use crate::seed::BoardSeed;
use crate::view::{self, SortSpec, ViewConfig};

pub struct HabitService {
    board: HabitBoard,
    view: ViewConfig,
}

pub struct HabitServiceBuilder {
    seed: Option<BoardSeed>,
    columns: Option<Vec<Column>>,
    rows: Option<Vec<String>>,
}

impl Default for HabitServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            seed: None,
            columns: None,
            rows: None,
        }
    }

    pub fn with_seed(mut self, seed: BoardSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = Some(columns.into_iter().collect());
        self
    }

    pub fn with_rows<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.rows = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<HabitService, SeedError> {
        let board = match (self.seed, self.columns, self.rows) {
            (Some(seed), _, _) => seed.into_board()?,
            (None, None, None) => HabitBoard::weekly_default(),
            (None, columns, rows) => {
                let registry = match columns {
                    Some(columns) => ColumnRegistry::from_columns(columns),
                    None => HabitBoard::weekly_default().columns().clone(),
                };
                let mut board = HabitBoard::with_columns(registry);
                match rows {
                    Some(labels) => {
                        for label in labels {
                            if !label.trim().is_empty() {
                                board.push_row(label.trim());
                            }
                        }
                    }
                    None => {
                        for row in HabitBoard::weekly_default().rows() {
                            board.push_row(row.label.clone());
                        }
                    }
                }
                board
            }
        };
        info!(
            columns = board.columns().len(),
            rows = board.row_count(),
            "habit board ready"
        );
        Ok(HabitService {
            board,
            view: ViewConfig::default(),
        })
    }
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    pub fn board(&self) -> &HabitBoard {
        &self.board
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn dispatch(&mut self, command: BoardCommand) -> Result<String, BoardError> {
        match command.apply(&self.board) {
            Ok(applied) => {
                info!(command = command.name(), status = %applied.status, "board updated");
                self.board = applied.board;
                self.view.retain_columns(self.board.columns());
                Ok(applied.status)
            }
            Err(err) => {
                debug!(command = command.name(), %err, "command declined");
                Err(err)
            }
        }
    }

    pub fn projection(&self) -> Vec<&Row> {
        view::project(self.board.rows(), self.board.columns(), &self.view)
    }

    pub fn metrics(&self) -> BoardMetrics {
        BoardMetrics::compute(&self.board)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.search = text.into();
    }

    pub fn clear_search(&mut self) {
        self.view.search.clear();
    }

    pub fn set_filter(&mut self, key: ColumnKey) {
        if self.board.columns().contains(&key) {
            debug!(%key, "filter applied");
            self.view.filter = Some(key);
        }
    }

    pub fn clear_filter(&mut self) {
        self.view.filter = None;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        debug!(?sort, "sort applied");
        self.view.sort = Some(sort);
    }

    pub fn clear_sort(&mut self) {
        self.view.sort = None;
    }
}
