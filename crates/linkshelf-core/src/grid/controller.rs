//! Editable grid controller.
//!
//! Maps cached rows to sortable, filterable columns and routes cell commits,
//! popular toggles and row deletes through the mutation coordinator. Each
//! outcome is reported as a toast.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::cell::{CellState, CommitRequest, EditableCell};
use super::columns::TableState;
use crate::domain::{FieldKind, LinkField, LinkRecord};
use crate::ports::{Notifier, StoreError, Toast};
use crate::services::{LinkMutations, QuerySnapshot};

const UPDATE_FALLBACK: &str = "Error updating row";
const DELETE_FALLBACK: &str = "Error deleting row";

/// Errors from grid operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Unknown row: {id}")]
    UnknownRow { id: String },

    #[error("Column '{field}' is not edited inline")]
    NotEditable { field: LinkField },

    #[error("Cell {row_id}/{field} is not being edited")]
    NotEditing { row_id: String, field: LinkField },

    #[error(transparent)]
    Store(#[from] StoreError),
}

type CellKey = (String, LinkField);

/// The table view's controller.
pub struct EditableGrid {
    mutations: Arc<LinkMutations>,
    notifier: Arc<dyn Notifier>,
    table: TableState,
    cells: HashMap<CellKey, EditableCell>,
}

impl EditableGrid {
    pub fn new(mutations: Arc<LinkMutations>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            mutations,
            notifier,
            table: TableState::new(),
            cells: HashMap::new(),
        }
    }

    /// Make sure the rows are loaded, then bring viewing cells up to date.
    pub async fn load(&mut self) -> QuerySnapshot {
        let snapshot = self.mutations.cache().ensure_loaded().await;
        self.sync_cells(&snapshot);
        snapshot
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        self.mutations.cache().current_snapshot()
    }

    pub const fn table(&self) -> &TableState {
        &self.table
    }

    pub const fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Rows after column filters and sorting.
    pub fn visible_rows(&self) -> Vec<LinkRecord> {
        let snapshot = self.snapshot();
        self.table
            .row_model(snapshot.records())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn cell(&self, row_id: &str, field: LinkField) -> Option<&EditableCell> {
        self.cells.get(&(row_id.to_string(), field))
    }

    /// What a cell displays: its buffer while edited or failed, otherwise the
    /// stored value.
    pub fn cell_text(&self, row_id: &str, field: LinkField) -> Option<String> {
        if let Some(cell) = self.cell(row_id, field) {
            if *cell.state() != CellState::Viewing {
                return Some(cell.buffer().to_string());
            }
        }
        self.snapshot()
            .get(row_id)
            .map(|record| record.field_text(field))
    }

    /// Start editing a text or list cell.
    pub fn focus(&mut self, row_id: &str, field: LinkField) -> Result<(), GridError> {
        if field.kind() == FieldKind::Flag {
            return Err(GridError::NotEditable { field });
        }
        let value = self.stored_text(row_id, field)?;
        let cell = self
            .cells
            .entry((row_id.to_string(), field))
            .or_insert_with(|| EditableCell::new(row_id, field, value.clone()));
        cell.sync(value);
        cell.focus();
        Ok(())
    }

    /// Replace the buffer of a cell being edited.
    pub fn input(
        &mut self,
        row_id: &str,
        field: LinkField,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        let cell = self.editing_cell(row_id, field)?;
        cell.input(text);
        Ok(())
    }

    /// Leave a cell: move it to committing and return the write to perform.
    pub fn begin_commit(
        &mut self,
        row_id: &str,
        field: LinkField,
    ) -> Result<CommitRequest, GridError> {
        let cell = self.editing_cell(row_id, field)?;
        cell.blur().ok_or_else(|| GridError::NotEditing {
            row_id: row_id.to_string(),
            field,
        })
    }

    /// Perform a commit and settle its cell.
    pub async fn complete_commit(
        &mut self,
        request: CommitRequest,
    ) -> Result<LinkRecord, GridError> {
        debug!(row = %request.row_id, field = %request.field, ticket = request.ticket, "Committing cell");
        let result = self
            .mutations
            .update(&request.row_id, &request.patch)
            .await;
        self.settle_commit(&request, result)
    }

    /// Blur a cell: commit its buffer and wait for the result.
    pub async fn blur(&mut self, row_id: &str, field: LinkField) -> Result<LinkRecord, GridError> {
        let request = self.begin_commit(row_id, field)?;
        self.complete_commit(request).await
    }

    /// Flip a row's popular flag. Commits immediately.
    pub async fn toggle_popular(&mut self, row_id: &str) -> Result<LinkRecord, GridError> {
        let field = LinkField::IsPopular;
        let current = self.record(row_id)?.is_popular;
        let cell = self
            .cells
            .entry((row_id.to_string(), field))
            .or_insert_with(|| EditableCell::new(row_id, field, current.to_string()));
        let request = cell
            .toggle(!current)
            .ok_or(GridError::NotEditable { field })?;
        self.complete_commit(request).await
    }

    /// Delete a row. No confirmation.
    pub async fn delete_row(&mut self, row_id: &str) -> Result<(), GridError> {
        match self.mutations.remove(row_id).await {
            Ok(()) => {
                self.cells.retain(|(id, _), _| id != row_id);
                self.notifier
                    .notify(Toast::info("Deleted", "Row deleted successfully"));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Toast::failure("Delete failed", e.message_or(DELETE_FALLBACK)));
                Err(e.into())
            }
        }
    }

    /// The row's URL, for the clipboard.
    pub fn copy_url(&self, row_id: &str) -> Result<String, GridError> {
        Ok(self.record(row_id)?.url)
    }

    fn settle_commit(
        &mut self,
        request: &CommitRequest,
        result: Result<LinkRecord, StoreError>,
    ) -> Result<LinkRecord, GridError> {
        let outcome = match &result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.message_or(UPDATE_FALLBACK)),
        };
        if let Some(cell) = self
            .cells
            .get_mut(&(request.row_id.clone(), request.field))
        {
            if !cell.complete(request.ticket, outcome) {
                debug!(row = %request.row_id, field = %request.field, "Ignoring superseded commit result");
            }
        }

        match result {
            Ok(record) => {
                self.notifier
                    .notify(Toast::info("Updated", "Row updated successfully"));
                Ok(record)
            }
            Err(e) => {
                self.notifier
                    .notify(Toast::failure("Update failed", e.message_or(UPDATE_FALLBACK)));
                Err(e.into())
            }
        }
    }

    fn record(&self, row_id: &str) -> Result<LinkRecord, GridError> {
        self.snapshot()
            .get(row_id)
            .cloned()
            .ok_or_else(|| GridError::UnknownRow {
                id: row_id.to_string(),
            })
    }

    fn stored_text(&self, row_id: &str, field: LinkField) -> Result<String, GridError> {
        self.record(row_id).map(|record| record.field_text(field))
    }

    fn editing_cell(
        &mut self,
        row_id: &str,
        field: LinkField,
    ) -> Result<&mut EditableCell, GridError> {
        self.cells
            .get_mut(&(row_id.to_string(), field))
            .filter(|cell| cell.is_editing())
            .ok_or_else(|| GridError::NotEditing {
                row_id: row_id.to_string(),
                field,
            })
    }

    fn sync_cells(&mut self, snapshot: &QuerySnapshot) {
        for ((row_id, field), cell) in &mut self.cells {
            if let Some(record) = snapshot.get(row_id) {
                cell.sync(record.field_text(*field));
            }
        }
    }
}
