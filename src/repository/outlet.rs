//! Repository implementation for retail outlets.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::outlet::{Outlet, NewOutlet, UpdateOutlet};
use crate::domain::types::OutletId;
use crate::models::outlet::{
    NewOutlet as DbNewOutlet, Outlet as DbOutlet, UpdateOutlet as DbUpdateOutlet,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TableQuery, TableReader, TableWriter};
use crate::schema::outlets;

fn filtered(query: &TableQuery) -> RepositoryResult<outlets::BoxedQuery<'static, Sqlite>> {
    let mut items = outlets::table.into_boxed::<Sqlite>();

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();
        items = match search.column.as_str() {
            "name" => items.filter(outlets::name.like(pattern).escape('\\')),
            "address" => items.filter(outlets::address.like(pattern).escape('\\')),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "column `{other}` is not searchable on outlets"
                )));
            }
        };
    }

    Ok(items)
}

impl TableReader<Outlet> for DieselRepository {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Outlet>)> {
        let mut conn = self.conn()?;

        let total = filtered(query)?.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(query)?
            .order(outlets::created_at.desc())
            .then_order_by(outlets::id.desc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.sql_bounds();
            items = items.offset(offset).limit(limit);
        }

        let outlets = items
            .load::<DbOutlet>(&mut conn)?
            .into_iter()
            .map(|db_outlet| Outlet::try_from(db_outlet).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, outlets))
    }

    fn get_row(&self, id: OutletId) -> RepositoryResult<Option<Outlet>> {
        let mut conn = self.conn()?;

        let db_outlet = outlets::table
            .find(id.get())
            .first::<DbOutlet>(&mut conn)
            .optional()?;

        match db_outlet {
            Some(db_outlet) => Ok(Some(
                Outlet::try_from(db_outlet).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TableWriter<Outlet> for DieselRepository {
    fn insert_row(&self, new_row: &NewOutlet) -> RepositoryResult<Outlet> {
        let mut conn = self.conn()?;

        let insertable = DbNewOutlet::from(new_row);
        let db_outlet = diesel::insert_into(outlets::table)
            .values(&insertable)
            .get_result::<DbOutlet>(&mut conn)?;

        Ok(Outlet::try_from(db_outlet)?)
    }

    fn update_row(&self, id: OutletId, updates: &UpdateOutlet) -> RepositoryResult<Outlet> {
        let mut conn = self.conn()?;

        let changes = DbUpdateOutlet::new(updates, Utc::now().naive_utc());
        let db_outlet = diesel::update(outlets::table.find(id.get()))
            .set(&changes)
            .get_result::<DbOutlet>(&mut conn)?;

        Ok(Outlet::try_from(db_outlet)?)
    }

    fn delete_row(&self, id: OutletId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(outlets::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
