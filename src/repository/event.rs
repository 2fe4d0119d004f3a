//! Repository implementation for scheduled events.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::EventId;
use crate::models::event::{
    NewEvent as DbNewEvent, Event as DbEvent, UpdateEvent as DbUpdateEvent,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TableQuery, TableReader, TableWriter};
use crate::schema::events;

fn filtered(query: &TableQuery) -> RepositoryResult<events::BoxedQuery<'static, Sqlite>> {
    let mut items = events::table.into_boxed::<Sqlite>();

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();
        items = match search.column.as_str() {
            "name" => items.filter(events::name.like(pattern).escape('\\')),
            "location" => items.filter(events::location.like(pattern).escape('\\')),
            "description" => items.filter(events::description.like(pattern).escape('\\')),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "column `{other}` is not searchable on events"
                )));
            }
        };
    }

    Ok(items)
}

impl TableReader<Event> for DieselRepository {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Event>)> {
        let mut conn = self.conn()?;

        let total = filtered(query)?.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(query)?
            .order(events::created_at.desc())
            .then_order_by(events::id.desc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.sql_bounds();
            items = items.offset(offset).limit(limit);
        }

        let events = items
            .load::<DbEvent>(&mut conn)?
            .into_iter()
            .map(|db_event| Event::try_from(db_event).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, events))
    }

    fn get_row(&self, id: EventId) -> RepositoryResult<Option<Event>> {
        let mut conn = self.conn()?;

        let db_event = events::table
            .find(id.get())
            .first::<DbEvent>(&mut conn)
            .optional()?;

        match db_event {
            Some(db_event) => Ok(Some(
                Event::try_from(db_event).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TableWriter<Event> for DieselRepository {
    fn insert_row(&self, new_row: &NewEvent) -> RepositoryResult<Event> {
        let mut conn = self.conn()?;

        let insertable = DbNewEvent::from(new_row);
        let db_event = diesel::insert_into(events::table)
            .values(&insertable)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(Event::try_from(db_event)?)
    }

    fn update_row(&self, id: EventId, updates: &UpdateEvent) -> RepositoryResult<Event> {
        let mut conn = self.conn()?;

        let changes = DbUpdateEvent::new(updates, Utc::now().naive_utc());
        let db_event = diesel::update(events::table.find(id.get()))
            .set(&changes)
            .get_result::<DbEvent>(&mut conn)?;

        Ok(Event::try_from(db_event)?)
    }

    fn delete_row(&self, id: EventId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(events::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
