//! List records, the columns of a board.

use super::ids::{BoardId, ListId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A list (column) grouping tasks on a board, ordered left to right by
/// `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    /// Order among the board's lists. Intended unique per board; contiguity
    /// is not required.
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Create a list with a generated id and the current time.
    pub fn new(board_id: BoardId, title: impl Into<String>, position: i64) -> Self {
        Self {
            id: ListId::new(),
            board_id,
            title: title.into(),
            position,
            created_at: Utc::now(),
        }
    }
}
