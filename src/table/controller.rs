//! Stateful controller behind every listing page.

use std::marker::PhantomData;

use serde::Serialize;
use thiserror::Error;

use crate::domain::row::Row;
use crate::repository::errors::RepositoryResult;
use crate::repository::{TableQuery, TableReader};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_COLUMN: &str = "name";

/// Parameters of the current listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub page: usize,
    pub page_size: usize,
    pub search_term: String,
    /// Bumped by [`DataTable::refresh`] to refetch with unchanged parameters.
    pub refresh_token: u64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            refresh_token: 0,
        }
    }
}

/// A failed fetch, captured instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query on `{table}` failed: {message}")]
pub struct TableError {
    pub table: &'static str,
    pub message: String,
}

/// An issued fetch. Only the most recently issued ticket may update the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: TableQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }
}

/// Page, search, loading and error state of one table listing.
///
/// Every state change issues exactly one fetch against the injected client.
/// Fetches carry a sequence number and results of superseded fetches are
/// dropped, so the rows always belong to the latest requested state.
pub struct DataTable<'a, T, C>
where
    T: Row,
    C: TableReader<T> + ?Sized,
{
    client: &'a C,
    search_column: String,
    state: QueryState,
    rows: Vec<T>,
    total_count: Option<usize>,
    loading: bool,
    error: Option<TableError>,
    latest_seq: u64,
    _row: PhantomData<T>,
}

impl<'a, T, C> DataTable<'a, T, C>
where
    T: Row,
    C: TableReader<T> + ?Sized,
{
    /// Creates an unmounted controller with default state.
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            search_column: DEFAULT_SEARCH_COLUMN.to_string(),
            state: QueryState::default(),
            rows: Vec::new(),
            total_count: None,
            loading: false,
            error: None,
            latest_seq: 0,
            _row: PhantomData,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.state.page_size = page_size.max(1);
        self
    }

    pub fn search_column(mut self, column: impl Into<String>) -> Self {
        self.search_column = column.into();
        self
    }

    /// Initial page, applied before [`Self::mount`].
    pub fn starting_page(mut self, page: usize) -> Self {
        self.state.page = page;
        self
    }

    /// Initial search term, applied before [`Self::mount`].
    pub fn starting_search(mut self, term: impl Into<String>) -> Self {
        self.state.search_term = term.into();
        self
    }

    /// Performs the first fetch.
    pub fn mount(mut self) -> Self {
        self.fetch();
        self
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page = page;
        self.fetch();
    }

    /// Replaces the search term. The current page is kept, so a narrower
    /// search on a late page may come back empty.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.fetch();
    }

    pub fn refresh(&mut self) {
        self.state.refresh_token += 1;
        self.fetch();
    }

    /// Query the current state maps to.
    pub fn current_query(&self) -> TableQuery {
        let query = TableQuery::new().paginate(self.state.page, self.state.page_size);
        let term = self.state.search_term.trim();
        if term.is_empty() {
            query
        } else {
            query.search(self.search_column.clone(), term)
        }
    }

    /// Issues a fetch for the current state and marks the table as loading.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest_seq,
            query: self.current_query(),
        }
    }

    /// Applies the outcome of a fetch. Returns `false` when the ticket was
    /// superseded and the result was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: RepositoryResult<(usize, Vec<T>)>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "Dropping stale result for `{}` (fetch #{}, latest #{})",
                T::TABLE,
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok((total, rows)) => {
                self.rows = rows;
                self.total_count = Some(total);
                self.error = None;
            }
            Err(err) => {
                log::error!("Failed to fetch rows from `{}`: {err}", T::TABLE);
                self.error = Some(TableError {
                    table: T::TABLE,
                    message: err.to_string(),
                });
            }
        }
        true
    }

    fn fetch(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.client.select_rows(ticket.query());
        self.complete_fetch(ticket, result);
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Total matching rows, `0` until the first fetch succeeds.
    pub fn total_count(&self) -> usize {
        self.total_count.unwrap_or(0)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&TableError> {
        self.error.as_ref()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    pub fn total_pages(&self) -> usize {
        crate::pagination::total_pages(self.total_count(), self.state.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SearchFilter;
    use crate::table::testing::{Item, MemoryTable};

    fn table_with(count: usize) -> MemoryTable<Item> {
        MemoryTable::new((1..=count as i32).map(Item::numbered).collect())
    }

    #[test]
    fn mount_fetches_first_page_newest_first() {
        let client = table_with(12);
        let table = DataTable::<Item, _>::new(&client).mount();

        assert_eq!(client.queries().len(), 1);
        assert_eq!(
            client.queries()[0],
            TableQuery::new().paginate(1, DEFAULT_PAGE_SIZE)
        );
        assert_eq!(table.total_count(), 12);
        assert_eq!(table.rows().len(), 10);
        assert_eq!(table.rows()[0].id, 12);
        assert!(!table.loading());
        assert!(table.error().is_none());
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();

        table.set_page(2);

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.total_count(), 12);
        assert_eq!(table.total_pages(), 2);
        assert_eq!(client.queries().len(), 2);
    }

    #[test]
    fn non_final_pages_are_full() {
        let client = table_with(35);
        let mut table = DataTable::<Item, _>::new(&client).page_size(10).mount();
        for page in 1..=3 {
            table.set_page(page);
            assert!(page * 10 <= table.total_count());
            assert_eq!(table.rows().len(), 10);
        }
        table.set_page(4);
        assert_eq!(table.rows().len(), 5);
    }

    #[test]
    fn search_filters_named_column_and_keeps_page() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).starting_page(3).mount();

        table.set_search("Item 1");

        let last = client.queries().last().cloned().unwrap();
        assert_eq!(
            last.search,
            Some(SearchFilter {
                column: "name".to_string(),
                term: "Item 1".to_string(),
            })
        );
        assert_eq!(table.page(), 3);
        assert!(table.rows().is_empty());
        assert_eq!(table.total_count(), 4);
    }

    #[test]
    fn no_match_search_yields_empty_page() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();

        table.set_search("xyz-no-match");

        assert!(table.rows().is_empty());
        assert_eq!(table.total_count(), 0);
        assert!(!table.loading());
        assert!(table.error().is_none());
    }

    #[test]
    fn blank_search_term_is_not_sent() {
        let client = table_with(3);
        let table = DataTable::<Item, _>::new(&client)
            .search_column("title")
            .starting_search("   ")
            .mount();

        assert_eq!(table.current_query().search, None);
        assert_eq!(client.queries()[0].search, None);
    }

    #[test]
    fn refresh_twice_issues_equivalent_queries() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();

        table.refresh();
        let first: Vec<i32> = table.rows().iter().map(|item| item.id).collect();
        table.refresh();
        let second: Vec<i32> = table.rows().iter().map(|item| item.id).collect();

        let queries = client.queries();
        assert_eq!(queries[1], queries[2]);
        assert_eq!(first, second);
        assert_eq!(table.state().refresh_token, 2);
    }

    #[test]
    fn failure_keeps_previous_rows_and_records_error() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();
        let before = table.rows().to_vec();

        client.fail_next("disk I/O error");
        table.set_page(2);

        assert_eq!(table.rows(), before.as_slice());
        assert!(!table.loading());
        let error = table.error().expect("error recorded");
        assert_eq!(error.table, "items");
        assert!(error.message.contains("disk I/O error"));

        table.refresh();
        assert!(table.error().is_none());
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn stale_results_are_dropped() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();

        table.state.page = 1;
        let slow = table.begin_fetch();
        table.state.page = 2;
        let fast = table.begin_fetch();
        assert!(table.loading());

        let fast_result = client.select_rows(fast.query());
        assert!(table.complete_fetch(fast, fast_result));
        assert_eq!(table.rows().len(), 2);

        let slow_result = client.select_rows(slow.query());
        assert!(!table.complete_fetch(slow, slow_result));
        assert_eq!(table.rows().len(), 2);
        assert!(!table.loading());
    }

    #[test]
    fn loading_stays_on_until_latest_fetch_completes() {
        let client = table_with(5);
        let mut table = DataTable::<Item, _>::new(&client);

        let first = table.begin_fetch();
        let second = table.begin_fetch();
        assert!(second.seq() > first.seq());

        table.complete_fetch(first, Ok((0, Vec::new())));
        assert!(table.loading());

        table.complete_fetch(second, Ok((5, Vec::new())));
        assert!(!table.loading());
        assert_eq!(table.total_count(), 5);
    }

    #[test]
    fn out_of_range_pages_are_tolerated() {
        let client = table_with(12);
        let mut table = DataTable::<Item, _>::new(&client).mount();

        table.set_page(0);
        assert_eq!(table.rows().len(), 10);

        table.set_page(99);
        assert!(table.rows().is_empty());
        assert_eq!(table.total_count(), 12);
    }

    #[test]
    fn maximum_page_does_not_overflow() {
        let client = table_with(12);
        let table = DataTable::<Item, _>::new(&client)
            .starting_page(usize::MAX)
            .mount();

        assert!(table.rows().is_empty());
        assert_eq!(table.total_count(), 12);
        assert!(table.error().is_none());
    }
}
