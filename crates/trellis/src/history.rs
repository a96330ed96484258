//! Linear undo/redo history for committed cell edits.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::trellis::Trellis;

/// One committed cell edit, as recorded for replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub old_value: String,
    pub new_value: String,
}

/// Two stacks of recorded edits with linear-history semantics.
///
/// Recording a new edit discards the redo stack, so history never
/// branches. Replays go through the session's own `update_cell`, which
/// can reject them if the schema has changed since the edit was made; a
/// rejected replay pushes the entry back where it came from, so a failed
/// undo or redo loses nothing.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    undo: Vec<CellEdit>,
    redo: Vec<CellEdit>,
}

impl HistoryLog {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed edit, clearing any redo history.
    pub fn record(&mut self, edit: CellEdit) {
        self.undo.push(edit);
        self.redo.clear();
    }

    /// Whether there is an edit to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is an undone edit to reapply.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of edits on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of edits on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Revert the most recent edit by replaying its old value.
    ///
    /// Returns the reverted edit, or `None` when there is nothing to undo.
    /// If the replay fails validation the entry goes back onto the undo
    /// stack unchanged and the error is returned.
    pub fn undo(&mut self, session: &mut Trellis) -> Result<Option<CellEdit>> {
        let Some(edit) = self.undo.pop() else {
            return Ok(None);
        };
        match session.update_cell(edit.row, edit.col, &edit.old_value) {
            Ok(_) => {
                self.redo.push(edit.clone());
                Ok(Some(edit))
            }
            Err(error) => {
                self.undo.push(edit);
                Err(error)
            }
        }
    }

    /// Reapply the most recently undone edit by replaying its new value.
    ///
    /// Mirrors [`undo`](Self::undo): a failed replay pushes the entry back
    /// onto the redo stack unchanged.
    pub fn redo(&mut self, session: &mut Trellis) -> Result<Option<CellEdit>> {
        let Some(edit) = self.redo.pop() else {
            return Ok(None);
        };
        match session.update_cell(edit.row, edit.col, &edit.new_value) {
            Ok(_) => {
                self.undo.push(edit.clone());
                Ok(Some(edit))
            }
            Err(error) => {
                self.redo.push(edit);
                Err(error)
            }
        }
    }
}
