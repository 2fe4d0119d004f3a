//! JSON endpoints under `/api/v1`.

use actix_web::{HttpResponse, Responder, Scope, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::dto::catalog::TableQueryParams;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, TableReader, TableWriter};
use crate::resources::Resource;
use crate::services::{ServiceError, catalog};

/// `GET /{table}` and `POST /{table}/{id}/delete`.
pub fn resource_scope<T>() -> Scope
where
    T: Resource,
    DieselRepository: TableReader<T> + TableWriter<T>,
{
    web::scope(&format!("/{}", T::TABLE))
        .route("", web::get().to(api_list::<T>))
        .route("/{id}/delete", web::post().to(api_delete::<T>))
}

pub async fn api_list<T>(
    params: web::Query<TableQueryParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder
where
    T: Resource,
    DieselRepository: TableReader<T>,
{
    match catalog::api_listing::<T, _>(repo.get_ref(), &params, server_config.page_size) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => {
            log::error!("Failed to list {}: {err}", T::TABLE);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Deletes a row and answers with the refreshed page.
pub async fn api_delete<T>(
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
    let result = catalog::delete_row::<T, _>(
        repo.get_ref(),
        &user,
        id.into_inner(),
        &params,
        server_config.page_size,
    )
    .await;

    match result {
        Ok(deleted) => HttpResponse::Ok().json(deleted),
        Err(ServiceError::Unauthorized) => {
            HttpResponse::Forbidden().json(json!({ "error": "insufficient permissions" }))
        }
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": "not found" }))
        }
        Err(err) => {
            log::error!("Failed to delete from {}: {err}", T::TABLE);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
