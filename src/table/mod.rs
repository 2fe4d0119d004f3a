//! Generic paginated, searchable data tables.
//!
//! [`controller::DataTable`] owns the query state of one listing and talks to
//! an injected table client, [`view`] turns that state into a serializable view
//! model, and [`delete::DeleteDialog`] gates destructive actions behind an
//! explicit confirmation.

pub mod controller;
pub mod delete;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{DataTable, FetchTicket, QueryState, TableError};
pub use delete::{ConfirmError, DeleteDialog, DialogError};
pub use view::{Cell, Column, PageControls, TableAction, TableStatus, TableView};
