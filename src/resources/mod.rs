//! Per-entity descriptions driving the generic listing, form and API routes.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::row::Row;
use crate::forms::FormError;
use crate::table::view::{Column, TableAction, escape_html};

pub mod article;
pub mod event;
pub mod outlet;
pub mod product;
pub mod video;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "tel")]
    Tel,
    #[serde(rename = "datetime-local")]
    DateTime,
}

/// One input of an entity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FormField {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        required: bool,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            required,
            value: String::new(),
        }
    }

    /// Prefills the input from `row`.
    fn filled<T: Row>(mut self, row: Option<&T>) -> Self {
        if let Some(value) = row.and_then(|row| row.field(self.name)) {
            self.value = match self.kind {
                FieldKind::DateTime => value.replacen(' ', "T", 1),
                _ => value,
            };
        }
        self
    }

    /// Restores the value the user submitted.
    fn resubmitted(mut self, values: &HashMap<String, String>) -> Self {
        if let Some(value) = values.get(self.name) {
            self.value = value.clone();
        }
        self
    }
}

/// An entity exposed through the showcase and the back office.
pub trait Resource: Row + Serialize + 'static {
    /// Plural heading, e.g. "Products".
    const TITLE: &'static str;
    /// Singular noun used in buttons and messages.
    const SINGULAR: &'static str;
    const SEARCH_COLUMN: &'static str;

    type Form: DeserializeOwned + 'static;

    /// Columns of the back-office table.
    fn columns() -> Vec<Column<Self>>;

    /// Columns of the public listing.
    fn public_columns() -> Vec<Column<Self>> {
        Self::columns()
    }

    /// Empty form inputs in display order.
    fn fields() -> Vec<FormField>;

    fn new_from_form(form: Self::Form) -> Result<Self::New, FormError>;

    fn update_from_form(form: Self::Form) -> Result<Self::Update, FormError>;

    /// Short description shown in the delete confirmation.
    fn label(&self) -> String;

    fn admin_path() -> String {
        format!("/admin/{}", Self::TABLE)
    }

    fn form_fields(row: Option<&Self>) -> Vec<FormField> {
        Self::fields()
            .into_iter()
            .map(|field| field.filled(row))
            .collect()
    }

    /// Form inputs holding previously submitted values.
    fn resubmitted_fields(values: &HashMap<String, String>) -> Vec<FormField> {
        Self::fields()
            .into_iter()
            .map(|field| field.resubmitted(values))
            .collect()
    }

    /// Edit and delete links of row `id`. `query` is the listing's
    /// `?page=..&q=..` string, kept so the delete modal opens over the same
    /// page and search.
    fn row_actions(id: i32, query: &str) -> Vec<TableAction> {
        let base = Self::admin_path();
        vec![
            TableAction::new("Edit", format!("{base}/{id}/edit")),
            TableAction::new("Delete", format!("{base}{query}&delete={id}")).variant("danger"),
        ]
    }
}

/// Thumbnail markup for an optional image url.
pub(crate) fn thumbnail(url: Option<&str>, alt: &str) -> String {
    match url {
        Some(url) => format!(
            "<img class=\"img-thumbnail\" style=\"max-height: 48px\" src=\"{}\" alt=\"{}\">",
            escape_html(url),
            escape_html(alt)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::event::Event;
    use crate::domain::types::{EventId, EventName};

    fn event() -> Event {
        let at = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Event {
            id: EventId::new(4).unwrap(),
            name: EventName::new("Summer fair").unwrap(),
            description: None,
            location: Some("Main square".to_string()),
            starts_at: at,
            ends_at: None,
            image_url: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn edit_form_is_prefilled() {
        let event = event();
        let fields = Event::form_fields(Some(&event));

        let value = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| field.value.clone())
                .unwrap()
        };
        assert_eq!(value("name"), "Summer fair");
        assert_eq!(value("starts_at"), "2025-07-01T10:30");
        assert_eq!(value("ends_at"), "");
    }

    #[test]
    fn new_form_is_empty() {
        assert!(
            Event::form_fields(None)
                .iter()
                .all(|field| field.value.is_empty())
        );
    }

    #[test]
    fn resubmitted_values_are_kept() {
        let values = HashMap::from([
            ("name".to_string(), "Fair".to_string()),
            ("starts_at".to_string(), "tomorrow".to_string()),
        ]);
        let fields = Event::resubmitted_fields(&values);
        assert_eq!(fields[0].value, "Fair");
        assert!(fields.iter().any(|f| f.name == "starts_at" && f.value == "tomorrow"));
    }

    #[test]
    fn action_links_point_at_admin_routes() {
        let actions = Event::row_actions(4, "?page=3&q=coin");
        assert_eq!(actions[0].href, "/admin/events/4/edit");
        assert_eq!(actions[1].href, "/admin/events?page=3&q=coin&delete=4");
        assert_eq!(actions[1].variant, "danger");
    }
}
