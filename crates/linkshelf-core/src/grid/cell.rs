//! Per-cell edit state machine.
//!
//! ```text
//! Viewing --focus--> Editing --blur--> Committing --ok--> Viewing
//!                      ^                   |
//!                      |                  err
//!                      |                   v
//!                      +------focus----- Failed (buffer kept)
//! ```
//!
//! Every commit carries a ticket. A completion whose ticket does not match
//! the cell's current commit is ignored, so a slow response cannot overwrite
//! a newer edit.

use crate::domain::{FieldKind, LinkField, LinkPatch};

/// Where a cell is in its edit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Showing the stored value.
    Viewing,
    /// Buffering keystrokes.
    Editing,
    /// Buffer sent to the store; waiting for the result.
    Committing { ticket: u64 },
    /// Last commit failed. The buffer still holds the rejected value.
    Failed { message: String },
}

/// A value ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub ticket: u64,
    pub row_id: String,
    pub field: LinkField,
    pub patch: LinkPatch,
}

/// One editable cell of the grid.
#[derive(Debug, Clone)]
pub struct EditableCell {
    row_id: String,
    field: LinkField,
    buffer: String,
    state: CellState,
    last_ticket: u64,
}

impl EditableCell {
    /// A cell showing `value`.
    pub fn new(row_id: impl Into<String>, field: LinkField, value: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            field,
            buffer: value.into(),
            state: CellState::Viewing,
            last_ticket: 0,
        }
    }

    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    pub const fn field(&self) -> LinkField {
        self.field
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub const fn state(&self) -> &CellState {
        &self.state
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self.state, CellState::Editing)
    }

    /// Enter editing. Returns false if already editing.
    ///
    /// Allowed while a commit is outstanding; that commit's completion will
    /// then be ignored.
    pub fn focus(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.state = CellState::Editing;
        true
    }

    /// Replace the buffer. Ignored unless editing.
    pub fn input(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.buffer = text.into();
        true
    }

    /// Leave editing and produce the write for the current buffer.
    ///
    /// There is no dirty check: an unchanged buffer is written too.
    pub fn blur(&mut self) -> Option<CommitRequest> {
        if !self.is_editing() {
            return None;
        }
        Some(self.start_commit())
    }

    /// Set a flag cell and commit at once. Only valid for flag fields and
    /// not while editing.
    pub fn toggle(&mut self, value: bool) -> Option<CommitRequest> {
        if self.field.kind() != FieldKind::Flag || self.is_editing() {
            return None;
        }
        self.buffer = value.to_string();
        Some(self.start_commit())
    }

    /// Record the store's answer for `ticket`. Returns whether it applied.
    pub fn complete(&mut self, ticket: u64, result: Result<(), String>) -> bool {
        if self.state != (CellState::Committing { ticket }) {
            return false;
        }
        self.state = match result {
            Ok(()) => CellState::Viewing,
            Err(message) => CellState::Failed { message },
        };
        true
    }

    /// Take a refreshed stored value. Only a viewing cell follows the store;
    /// any other state keeps its buffer.
    pub fn sync(&mut self, value: impl Into<String>) {
        if self.state == CellState::Viewing {
            self.buffer = value.into();
        }
    }

    fn start_commit(&mut self) -> CommitRequest {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.state = CellState::Committing { ticket };
        CommitRequest {
            ticket,
            row_id: self.row_id.clone(),
            field: self.field,
            patch: LinkPatch::text(self.field, self.buffer.clone()),
        }
    }
}
