use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::event::{Event as DomainEvent, NewEvent as DomainNewEvent};
use crate::domain::types::{EventId, EventName, ImageUrl, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
/// Diesel model for [`crate::domain::event::Event`].
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEvent<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Event> for DomainEvent {
    type Error = TypeConstraintError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::try_from(event.id)?,
            name: EventName::new(event.name)?,
            description: event.description,
            location: event.location,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            image_url: event.image_url.map(ImageUrl::new).transpose()?,
            created_at: event.created_at,
            updated_at: event.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEvent> for NewEvent<'a> {
    fn from(event: &'a DomainNewEvent) -> Self {
        Self {
            name: event.name.as_str(),
            description: event.description.as_deref(),
            location: event.location.as_deref(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            image_url: event.image_url.as_ref().map(ImageUrl::as_str),
        }
    }
}

impl<'a> UpdateEvent<'a> {
    pub fn new(event: &'a DomainNewEvent, updated_at: NaiveDateTime) -> Self {
        let new = NewEvent::from(event);
        Self {
            name: new.name,
            description: new.description,
            location: new.location,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            image_url: new.image_url,
            updated_at,
        }
    }
}
