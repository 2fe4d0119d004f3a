//! In-memory table client used by controller, dialog and service tests.

use std::cell::{Cell, RefCell};

use crate::domain::row::Row;
use crate::domain::types::ProductId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{TableQuery, TableReader, TableWriter};

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: i32,
    pub name: String,
}

impl Item {
    pub fn numbered(id: i32) -> Self {
        Self {
            id,
            name: format!("Item {id}"),
        }
    }
}

impl Row for Item {
    const TABLE: &'static str = "items";

    type Id = ProductId;
    type New = String;
    type Update = String;

    fn id(&self) -> ProductId {
        ProductId::new(self.id).expect("fixture ids are positive")
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

/// Keeps rows in insertion order and serves them newest (highest id) first.
pub struct MemoryTable<T> {
    rows: RefCell<Vec<T>>,
    queries: RefCell<Vec<TableQuery>>,
    deleted: RefCell<Vec<i32>>,
    failure: RefCell<Option<String>>,
    fail_deletes: Cell<bool>,
}

impl<T: Row> MemoryTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: RefCell::new(rows),
            queries: RefCell::new(Vec::new()),
            deleted: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
            fail_deletes: Cell::new(false),
        }
    }

    /// Makes the next select fail with a database error.
    pub fn fail_next(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.set(fail);
    }

    pub fn queries(&self) -> Vec<TableQuery> {
        self.queries.borrow().clone()
    }

    pub fn deleted(&self) -> Vec<i32> {
        self.deleted.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }
}

impl<T: Row> TableReader<T> for MemoryTable<T> {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<T>)> {
        self.queries.borrow_mut().push(query.clone());
        if let Some(message) = self.failure.borrow_mut().take() {
            return Err(RepositoryError::DatabaseError(message));
        }

        let mut matching: Vec<T> = self
            .rows
            .borrow()
            .iter()
            .filter(|row| match &query.search {
                Some(search) => row
                    .field(&search.column)
                    .map(|value| {
                        value
                            .to_lowercase()
                            .contains(&search.term.to_lowercase())
                    })
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by_key(|row| std::cmp::Reverse::<i32>(row.id().into()));

        let total = matching.len();
        let page = match &query.pagination {
            Some(pagination) => matching
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect(),
            None => matching,
        };
        Ok((total, page))
    }

    fn get_row(&self, id: T::Id) -> RepositoryResult<Option<T>> {
        Ok(self.rows.borrow().iter().find(|row| row.id() == id).cloned())
    }
}

impl TableWriter<Item> for MemoryTable<Item> {
    fn insert_row(&self, new_row: &String) -> RepositoryResult<Item> {
        let mut rows = self.rows.borrow_mut();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let item = Item {
            id,
            name: new_row.clone(),
        };
        rows.push(item.clone());
        Ok(item)
    }

    fn update_row(&self, id: ProductId, updates: &String) -> RepositoryResult<Item> {
        let mut rows = self.rows.borrow_mut();
        let item = rows
            .iter_mut()
            .find(|row| row.id == id.get())
            .ok_or(RepositoryError::NotFound)?;
        item.name = updates.clone();
        Ok(item.clone())
    }

    fn delete_row(&self, id: ProductId) -> RepositoryResult<()> {
        if self.fail_deletes.get() {
            return Err(RepositoryError::DatabaseError("database is locked".into()));
        }
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| row.id != id.get());
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.deleted.borrow_mut().push(id.get());
        Ok(())
    }
}
