use std::fmt::{Debug, Formatter};

use subtle::ConstantTimeEq;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::row::Row;
use crate::domain::staff::{NewStaffUser, StaffUser};
use crate::domain::types::{StaffEmail, StaffUserId};
use crate::repository::errors::RepositoryResult;

pub mod article;
pub mod errors;
pub mod event;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod outlet;
pub mod product;
pub mod staff;
pub mod video;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Offset of the first row of the page. Page `0` reads as the first page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// `OFFSET`/`LIMIT` values for SQL, saturating at `i64::MAX`.
    pub fn sql_bounds(&self) -> (i64, i64) {
        let offset = i64::try_from(self.offset()).unwrap_or(i64::MAX);
        let limit = i64::try_from(self.per_page).unwrap_or(i64::MAX);
        (offset, limit)
    }
}

/// Case-insensitive substring filter on a named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub column: String,
    pub term: String,
}

impl SearchFilter {
    /// `LIKE` pattern with `\` as the escape character.
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.term.len() + 2);
        escaped.push('%');
        for ch in self.term.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        escaped
    }
}

/// Select request against a single table. Rows always come back newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub search: Option<SearchFilter>,
    pub pagination: Option<Pagination>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, column: impl Into<String>, term: impl Into<String>) -> Self {
        self.search = Some(SearchFilter {
            column: column.into(),
            term: term.into(),
        });
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read side of the table client.
pub trait TableReader<T: Row> {
    /// Returns the total number of matching rows and the requested page.
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<T>)>;
    fn get_row(&self, id: T::Id) -> RepositoryResult<Option<T>>;
}

/// Write side of the table client.
pub trait TableWriter<T: Row> {
    fn insert_row(&self, new_row: &T::New) -> RepositoryResult<T>;
    fn update_row(&self, id: T::Id, updates: &T::Update) -> RepositoryResult<T>;
    /// Fails with [`errors::RepositoryError::NotFound`] when nothing was deleted.
    fn delete_row(&self, id: T::Id) -> RepositoryResult<()>;
}

pub trait StaffReader {
    fn get_staff_by_email(&self, email: &StaffEmail) -> RepositoryResult<Option<StaffUser>>;
}

pub trait StaffWriter {
    fn create_staff(&self, new_user: &NewStaffUser) -> RepositoryResult<StaffUser>;
    fn record_sign_in(&self, id: StaffUserId) -> RepositoryResult<()>;
}

/// Privileged staff management. Every call must present the credential the
/// repository was configured with.
pub trait StaffAdmin {
    fn list_staff(&self, credential: &AdminCredential) -> RepositoryResult<Vec<StaffUser>>;
    fn delete_staff(&self, credential: &AdminCredential, id: StaffUserId) -> RepositoryResult<()>;
}

/// Server-side secret unlocking [`StaffAdmin`] operations.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential(String);

impl AdminCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Constant-time comparison. An empty secret never matches.
    pub fn matches(&self, other: &AdminCredential) -> bool {
        !self.0.is_empty() && bool::from(self.0.as_bytes().ct_eq(other.0.as_bytes()))
    }
}

impl Debug for AdminCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential(***)")
    }
}

/// Diesel-backed implementation of every table client trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    admin_credential: Option<AdminCredential>,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            admin_credential: None,
        }
    }

    pub fn with_admin_credential(mut self, credential: AdminCredential) -> Self {
        self.admin_credential = Some(credential);
        self
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
