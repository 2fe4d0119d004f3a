use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::row::Row;
use crate::domain::types::{EventId, EventName, ImageUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: EventName,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewEvent {
    pub name: EventName,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub image_url: Option<ImageUrl>,
}

pub type UpdateEvent = NewEvent;

impl Row for Event {
    const TABLE: &'static str = "events";

    type Id = EventId;
    type New = NewEvent;
    type Update = UpdateEvent;

    fn id(&self) -> EventId {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => self.id.to_string(),
            "name" => self.name.to_string(),
            "description" => self.description.clone().unwrap_or_default(),
            "location" => self.location.clone().unwrap_or_default(),
            "starts_at" => self.starts_at.format("%Y-%m-%d %H:%M").to_string(),
            "ends_at" => self
                .ends_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            "image_url" => self
                .image_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            "created_at" => self.created_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => return None,
        };
        Some(value)
    }
}
