use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::forms::FormError;
use crate::forms::event::EventForm;
use crate::resources::{FieldKind, FormField, Resource, thumbnail};
use crate::table::view::Column;

fn image(event: &Event) -> String {
    thumbnail(
        event.image_url.as_ref().map(|url| url.as_str()),
        &event.name,
    )
}

impl Resource for Event {
    const TITLE: &'static str = "Events";
    const SINGULAR: &'static str = "event";
    const SEARCH_COLUMN: &'static str = "name";

    type Form = EventForm;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", image),
            Column::field("Name", "name"),
            Column::field("Location", "location"),
            Column::field("Starts", "starts_at"),
            Column::field("Ends", "ends_at"),
        ]
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text, true),
            FormField::new("location", "Location", FieldKind::Text, false),
            FormField::new("starts_at", "Starts at", FieldKind::DateTime, true),
            FormField::new("ends_at", "Ends at", FieldKind::DateTime, false),
            FormField::new("description", "Description", FieldKind::Textarea, false),
            FormField::new("image_url", "Image URL", FieldKind::Url, false),
        ]
    }

    fn new_from_form(form: EventForm) -> Result<NewEvent, FormError> {
        NewEvent::try_from(form)
    }

    fn update_from_form(form: EventForm) -> Result<UpdateEvent, FormError> {
        NewEvent::try_from(form)
    }

    fn label(&self) -> String {
        format!("{} on {}", self.name, self.starts_at.format("%Y-%m-%d"))
    }
}
