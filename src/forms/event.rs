use serde::Deserialize;
use validator::Validate;

use crate::domain::event::NewEvent;
use crate::domain::types::{EventName, non_blank};
use crate::forms::{FormError, optional_image, parse_datetime};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an event.
pub struct EventForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<EventForm> for NewEvent {
    type Error = FormError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let starts_at = parse_datetime(&form.starts_at)?;
        let ends_at = non_blank(form.ends_at)
            .map(|value| parse_datetime(&value))
            .transpose()?;
        if ends_at.is_some_and(|ends_at| ends_at < starts_at) {
            return Err(FormError::InvalidDate);
        }

        Ok(NewEvent {
            name: EventName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            location: non_blank(form.location),
            starts_at,
            ends_at,
            image_url: optional_image(form.image_url)?,
        })
    }
}
