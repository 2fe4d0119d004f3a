//! Data handed to catalog templates and the JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::event::Event;
use crate::domain::product::Product;
use crate::domain::row::Row;
use crate::repository::TableReader;
use crate::resources::FormField;
use crate::table::controller::DataTable;
use crate::table::view::TableView;

/// Query string accepted by listing pages and the API.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TableQueryParams {
    pub page: Option<usize>,
    pub q: Option<String>,
    /// Row staged in the delete confirmation modal.
    pub delete: Option<i32>,
}

impl TableQueryParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn search(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or("")
    }

    /// `?page=..&q=..` preserving the listing state, without the delete target.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("?page={}", self.page());
        if !self.search().is_empty() {
            query.push_str("&q=");
            query.push_str(&urlencoding::encode(self.search()));
        }
        query
    }
}

/// A rendered listing.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub title: &'static str,
    pub singular: &'static str,
    pub slug: &'static str,
    /// Path the search form and page links target.
    pub base_path: String,
    pub table: TableView,
}

#[derive(Debug, Serialize)]
pub struct DeleteTarget {
    pub id: i32,
    pub label: String,
    /// Form action performing the delete.
    pub action: String,
    pub cancel_href: String,
}

#[derive(Debug, Serialize)]
pub struct AdminListingPage {
    pub listing: ListingPage,
    pub delete_target: Option<DeleteTarget>,
}

/// Create or edit form.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub title: String,
    pub slug: &'static str,
    pub action: String,
    pub cancel_href: String,
    pub fields: Vec<FormField>,
}

/// JSON page of rows.
#[derive(Debug, Serialize)]
pub struct ApiPage<T> {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub rows: Vec<T>,
    pub error: Option<String>,
}

impl<T: Row> ApiPage<T> {
    pub fn from_table<C>(table: &DataTable<'_, T, C>) -> Self
    where
        C: TableReader<T> + ?Sized,
    {
        Self {
            total: table.total_count(),
            page: table.page(),
            page_size: table.state().page_size,
            total_pages: table.total_pages(),
            rows: table.rows().to_vec(),
            error: table.error().map(ToString::to_string),
        }
    }
}

/// Outcome of a confirmed delete: what was removed and the refreshed page.
#[derive(Debug, Serialize)]
pub struct DeletedRow<T> {
    pub label: String,
    pub page: ApiPage<T>,
}

/// Landing page content.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub products: Vec<Product>,
    pub events: Vec<Event>,
}
