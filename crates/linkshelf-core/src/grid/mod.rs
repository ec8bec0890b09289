//! Editable grid: per-cell edit state, client-side sort and filter, and the
//! controller tying them to the mutation coordinator.

mod cell;
mod columns;
mod controller;

pub use cell::{CellState, CommitRequest, EditableCell};
pub use columns::{ColumnSort, SortDirection, TableState};
pub use controller::{EditableGrid, GridError};
