pub mod board;
pub mod column;
pub mod command;
pub mod error;
pub mod metrics;
pub mod overlay;
pub mod row;
pub mod seed;
pub mod service;
pub mod toast;
pub mod view;

pub use crate::board::{HabitBoard, MoveDirection};
pub use crate::column::{Column, ColumnKey, ColumnRegistry, Icon};
pub use crate::command::{Applied, BoardCommand};
pub use crate::error::{BoardError, SeedError};
pub use crate::row::{Row, RowId};
pub use crate::service::{HabitService, HabitServiceBuilder};
