//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;

pub mod admin;
pub mod api;
pub mod auth;
pub mod main;
pub mod users;

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        Level::Debug => "info",
    }
}

/// Context shared by every page: pending alerts, the signed-in user and the
/// active navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context
}

/// Appends an alert that was produced while handling this request.
pub(crate) fn push_alert(context: &mut Context, message: &str, level: &Level) {
    let mut alerts = context
        .get("alerts")
        .and_then(|value| serde_json::from_value::<Vec<(String, String)>>(value.clone()).ok())
        .unwrap_or_default();
    alerts.push((message.to_string(), alert_level_to_str(level).to_string()));
    context.insert("alerts", &alerts);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn redirect_sets_location() {
        let response = redirect("/admin/products");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/products"
        );
    }

    #[test]
    fn levels_map_to_bootstrap_classes() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
    }

    #[test]
    fn missing_template_is_a_server_error() {
        let tera = Tera::default();
        let response = render_template(&tera, "missing.html", &Context::new());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
