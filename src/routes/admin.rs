//! Back-office CRUD screens, generic over [`Resource`].

use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, Scope, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::catalog::{FormPage, TableQueryParams};
use crate::forms::from_values;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, TableReader, TableWriter};
use crate::resources::Resource;
use crate::routes::{base_context, push_alert, redirect, render_template};
use crate::services::{ServiceError, catalog};

/// Routes of one resource under `/admin/{table}`.
pub fn resource_scope<T>() -> Scope
where
    T: Resource,
    DieselRepository: TableReader<T> + TableWriter<T>,
{
    web::scope(&format!("/{}", T::TABLE))
        .route("", web::get().to(admin_index::<T>))
        .route("/new", web::get().to(new_form::<T>))
        .route("/create", web::post().to(create::<T>))
        .route("/{id}/edit", web::get().to(edit_form::<T>))
        .route("/{id}/update", web::post().to(update::<T>))
        .route("/{id}/delete", web::post().to(delete::<T>))
}

pub async fn admin_home() -> impl Responder {
    redirect("/admin/products")
}

fn unauthorized() -> HttpResponse {
    FlashMessage::error("Insufficient permissions.").send();
    redirect("/")
}

pub async fn admin_index<T>(
    user: AuthenticatedUser,
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
    match catalog::load_admin_listing::<T, _>(
        repo.get_ref(),
        &user,
        &params,
        server_config.page_size,
    ) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user), T::TABLE);
            context.insert("listing", &page.listing);
            context.insert("delete_target", &page.delete_target);
            render_template(&tera, "admin/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error(format!("The {} no longer exists.", T::SINGULAR)).send();
            redirect(&T::admin_path())
        }
        Err(err) => {
            log::error!("Failed to list {}: {err}", T::TABLE);
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    form: &FormPage,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, Some(user), form.slug);
    if let Some(error) = error {
        push_alert(&mut context, error, &Level::Error);
    }
    context.insert("form", form);
    render_template(tera, "admin/form.html", &context)
}

async fn show_form<T>(
    user: AuthenticatedUser,
    id: Option<i32>,
    repo: &DieselRepository,
    flash_messages: IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse
where
    T: Resource,
    DieselRepository: TableReader<T>,
{
    match catalog::load_form::<T, _>(repo, &user, id) {
        Ok(form) => render_form(tera, &flash_messages, &user, &form, None),
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error(format!("The {} no longer exists.", T::SINGULAR)).send();
            redirect(&T::admin_path())
        }
        Err(err) => {
            log::error!("Failed to load {} form: {err}", T::SINGULAR);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn new_form<T>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableReader<T>,
{
    show_form::<T>(user, None, repo.get_ref(), flash_messages, tera.get_ref()).await
}

pub async fn edit_form<T>(
    user: AuthenticatedUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableReader<T>,
{
    show_form::<T>(
        user,
        Some(id.into_inner()),
        repo.get_ref(),
        flash_messages,
        tera.get_ref(),
    )
    .await
}

/// Re-renders the submitted form with its values and the error.
fn resubmit<T: Resource>(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    action: String,
    title: String,
    values: &HashMap<String, String>,
    error: &str,
) -> HttpResponse {
    let form = FormPage {
        title,
        slug: T::TABLE,
        action,
        cancel_href: T::admin_path(),
        fields: T::resubmitted_fields(values),
    };
    render_form(tera, flash_messages, user, &form, Some(error))
}

pub async fn create<T>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(values): web::Form<HashMap<String, String>>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableWriter<T>,
{
    let result = from_values::<T::Form>(&values)
        .map_err(ServiceError::from)
        .and_then(|form| catalog::create_row::<T, _>(repo.get_ref(), &user, form));

    match result {
        Ok(_) => {
            FlashMessage::success(format!("The {} was created.", T::SINGULAR)).send();
            redirect(&T::admin_path())
        }
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(err @ (ServiceError::Form(_) | ServiceError::Repository(_))) => resubmit::<T>(
            &tera,
            &flash_messages,
            &user,
            format!("{}/create", T::admin_path()),
            format!("New {}", T::SINGULAR),
            &values,
            &format!("Could not save the {}: {err}", T::SINGULAR),
        ),
        Err(err) => {
            log::error!("Failed to create {}: {err}", T::SINGULAR);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn update<T>(
    user: AuthenticatedUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(values): web::Form<HashMap<String, String>>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableWriter<T>,
{
    let id = id.into_inner();
    let result = from_values::<T::Form>(&values)
        .map_err(ServiceError::from)
        .and_then(|form| catalog::update_row::<T, _>(repo.get_ref(), &user, id, form));

    match result {
        Ok(_) => {
            FlashMessage::success(format!("The {} was updated.", T::SINGULAR)).send();
            redirect(&T::admin_path())
        }
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error(format!("The {} no longer exists.", T::SINGULAR)).send();
            redirect(&T::admin_path())
        }
        Err(err @ (ServiceError::Form(_) | ServiceError::Repository(_))) => resubmit::<T>(
            &tera,
            &flash_messages,
            &user,
            format!("{}/{id}/update", T::admin_path()),
            format!("Edit {}", T::SINGULAR),
            &values,
            &format!("Could not save the {}: {err}", T::SINGULAR),
        ),
        Err(err) => {
            log::error!("Failed to update {}: {err}", T::SINGULAR);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Confirmation POST of the delete modal.
pub async fn delete<T>(
    user: AuthenticatedUser,
    id: web::Path<i32>,
    params: web::Query<TableQueryParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableReader<T> + TableWriter<T>,
{
    let id = id.into_inner();
    let result = catalog::delete_row::<T, _>(
        repo.get_ref(),
        &user,
        id,
        &params,
        server_config.page_size,
    )
    .await;

    match result {
        Ok(deleted) => {
            FlashMessage::success(format!("Deleted {} \"{}\".", T::SINGULAR, deleted.label))
                .send();
            let back = TableQueryParams {
                page: Some(params.page().min(deleted.page.total_pages)),
                q: params.q.clone(),
                delete: None,
            };
            redirect(&format!("{}{}", T::admin_path(), back.to_query_string()))
        }
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error(format!("The {} no longer exists.", T::SINGULAR)).send();
            redirect(&format!("{}{}", T::admin_path(), params.to_query_string()))
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to delete the {}: {err}", T::SINGULAR)).send();
            redirect(&format!(
                "{}{}&delete={id}",
                T::admin_path(),
                params.to_query_string()
            ))
        }
    }
}
