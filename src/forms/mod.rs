//! Form definitions backing the admin routes.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{ImageUrl, non_blank};

pub mod article;
pub mod auth;
pub mod event;
pub mod outlet;
pub mod product;
pub mod video;

/// Format produced by `<input type="datetime-local">`.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid address")]
    InvalidAddress,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid date")]
    InvalidDate,

    #[error("body cannot be empty")]
    InvalidBody,

    #[error("malformed form data: {0}")]
    Malformed(String),
}

/// Decodes submitted form values into a typed form.
pub fn from_values<F: DeserializeOwned>(values: &HashMap<String, String>) -> Result<F, FormError> {
    serde_json::to_value(values)
        .and_then(serde_json::from_value)
        .map_err(|err| FormError::Malformed(err.to_string()))
}

/// Parses an optional image url, treating blank input as absent.
pub(crate) fn optional_image(value: Option<String>) -> Result<Option<ImageUrl>, FormError> {
    non_blank(value)
        .map(|url| ImageUrl::new(url).map_err(|_| FormError::InvalidUrl))
        .transpose()
}

pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, FormError> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT_FORMAT)
        .map_err(|_| FormError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_decode_into_typed_form() {
        let values = HashMap::from([
            ("email".to_string(), "a@example.com".to_string()),
            ("password".to_string(), "secret".to_string()),
        ]);
        let form: auth::SignInForm = from_values(&values).unwrap();
        assert_eq!(form.email, "a@example.com");

        let missing = HashMap::from([("email".to_string(), "a@example.com".to_string())]);
        assert!(matches!(
            from_values::<auth::SignInForm>(&missing),
            Err(FormError::Malformed(_))
        ));
    }

    #[test]
    fn blank_image_is_absent() {
        assert!(optional_image(Some("  ".to_string())).unwrap().is_none());
        assert!(optional_image(None).unwrap().is_none());
        assert!(matches!(
            optional_image(Some("not a url".to_string())),
            Err(FormError::InvalidUrl)
        ));
    }

    #[test]
    fn datetime_input_is_parsed() {
        let at = parse_datetime("2025-07-01T18:30").unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), "2025-07-01 18:30");
        assert!(matches!(
            parse_datetime("01.07.2025"),
            Err(FormError::InvalidDate)
        ));
    }
}
