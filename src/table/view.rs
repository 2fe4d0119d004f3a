//! Render model for a data table.
//!
//! Nothing in here talks to the database: a [`TableView`] is derived from
//! controller state and a column list, then handed to the templates or
//! serialized as JSON.

use serde::Serialize;

use crate::domain::row::Row;
use crate::pagination::{clamp_page, display_range, get_pages, total_pages};
use crate::repository::TableReader;
use crate::table::controller::{DataTable, TableError};

/// How a column obtains its content from a row.
pub enum Cell<T> {
    /// Plain text of a named field, escaped on output.
    Field(&'static str),
    /// Trusted markup produced from the whole row.
    Render(fn(&T) -> String),
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cell<T> {}

pub struct Column<T> {
    pub header: &'static str,
    pub cell: Cell<T>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T: Row> Column<T> {
    pub const fn field(header: &'static str, key: &'static str) -> Self {
        Self {
            header,
            cell: Cell::Field(key),
        }
    }

    pub const fn render(header: &'static str, render: fn(&T) -> String) -> Self {
        Self {
            header,
            cell: Cell::Render(render),
        }
    }

    fn cell_for(&self, row: &T) -> ViewCell {
        match self.cell {
            Cell::Field(key) => ViewCell {
                value: row.field(key).unwrap_or_default(),
                markup: false,
            },
            Cell::Render(render) => ViewCell {
                value: render(row),
                markup: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Loading,
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCell {
    pub value: String,
    /// Set when `value` is markup that must not be escaped again.
    pub markup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    pub id: i32,
    pub cells: Vec<ViewCell>,
    pub actions: Vec<TableAction>,
}

/// A link button, either above the table or next to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableAction {
    pub label: String,
    pub href: String,
    /// Bootstrap colour of the button.
    pub variant: &'static str,
}

impl TableAction {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            variant: "primary",
        }
    }

    pub fn variant(mut self, variant: &'static str) -> Self {
        self.variant = variant;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    /// Requested page clamped into `[1, total_pages]`.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub count: usize,
    pub first: usize,
    pub last: usize,
    pub label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: usize,
    pub next_page: usize,
    /// Numbered links, `None` marks an ellipsis.
    pub pages: Vec<Option<usize>>,
}

impl PageControls {
    pub fn new(page: usize, page_size: usize, count: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(count, page_size);
        let current = clamp_page(page, total_pages);
        let (first, last) = display_range(page, page_size, count);

        Self {
            page: current,
            page_size,
            total_pages,
            count,
            first,
            last,
            label: format!("{first} to {last} of {count} results"),
            has_previous: current > 1,
            has_next: current < total_pages,
            previous_page: current.saturating_sub(1).max(1),
            next_page: (current + 1).min(total_pages),
            pages: get_pages(total_pages, current, 2, 2, 4, 2),
        }
    }
}

/// Everything a template needs to draw a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<ViewRow>,
    pub status: TableStatus,
    pub search_term: String,
    pub error: Option<String>,
    pub action: Option<TableAction>,
    /// Set when rows carry their own action links.
    pub row_actions: bool,
    pub pagination: PageControls,
}

/// Controller state consumed by [`TableView::build`].
pub struct ViewInput<'r, T> {
    pub rows: &'r [T],
    pub loading: bool,
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub search_term: &'r str,
    pub error: Option<&'r TableError>,
}

impl TableView {
    pub fn build<T: Row>(
        columns: &[Column<T>],
        input: ViewInput<'_, T>,
        action: Option<TableAction>,
    ) -> Self {
        let status = if input.loading {
            TableStatus::Loading
        } else if input.rows.is_empty() {
            TableStatus::Empty
        } else {
            TableStatus::Ready
        };

        let rows = match status {
            TableStatus::Ready => input
                .rows
                .iter()
                .map(|row| ViewRow {
                    id: row.id().into(),
                    cells: columns.iter().map(|column| column.cell_for(row)).collect(),
                    actions: Vec::new(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            headers: columns.iter().map(|column| column.header).collect(),
            rows,
            status,
            search_term: input.search_term.to_string(),
            error: input.error.map(ToString::to_string),
            action,
            row_actions: false,
            pagination: PageControls::new(input.page, input.page_size, input.count),
        }
    }

    /// Attaches the links produced by `actions` to every row.
    pub fn with_row_actions<F>(mut self, actions: F) -> Self
    where
        F: Fn(i32) -> Vec<TableAction>,
    {
        for row in &mut self.rows {
            row.actions = actions(row.id);
        }
        self.row_actions = true;
        self
    }
}

impl<T, C> DataTable<'_, T, C>
where
    T: Row,
    C: TableReader<T> + ?Sized,
{
    /// Snapshot of the controller rendered through `columns`.
    pub fn view(&self, columns: &[Column<T>], action: Option<TableAction>) -> TableView {
        TableView::build(
            columns,
            ViewInput {
                rows: self.rows(),
                loading: self.loading(),
                count: self.total_count(),
                page: self.page(),
                page_size: self.state().page_size,
                search_term: self.search_term(),
                error: self.error(),
            },
            action,
        )
    }
}

/// Escapes row text embedded into [`Cell::Render`] markup.
pub fn escape_html(text: &str) -> String {
    ammonia::clean_text(text)
}
