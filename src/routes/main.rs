//! Public showcase pages.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::catalog::TableQueryParams;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, TableReader};
use crate::resources::Resource;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, catalog};

/// Number of products and events teased on the landing page.
const HOME_ITEMS: usize = 4;

#[get("/")]
pub async fn show_index(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog::load_home(repo.get_ref(), HOME_ITEMS) {
        Ok(home) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "index");
            context.insert("products", &home.products);
            context.insert("events", &home.events);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load landing page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Public listing of a resource at `/{table}`.
pub async fn show_listing<T>(
    user: Option<AuthenticatedUser>,
    params: web::Query<TableQueryParams>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableReader<T>,
{
    match catalog::load_listing::<T, _>(repo.get_ref(), &params, server_config.page_size) {
        Ok(listing) => {
            let mut context = base_context(&flash_messages, user.as_ref(), T::TABLE);
            context.insert("listing", &listing);
            render_template(&tera, "main/listing.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list {}: {err}", T::TABLE);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Sends the visitor to the messaging app with a prefilled question.
#[get("/products/{id}/inquire")]
pub async fn inquire_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match catalog::inquiry_link(
        repo.get_ref(),
        id.into_inner(),
        &server_config.messaging_scheme,
        &server_config.messaging_number,
    ) {
        Ok(link) => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, link))
            .finish(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to build inquiry link: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
