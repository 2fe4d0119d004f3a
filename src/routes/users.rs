use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{AdminCredential, DieselRepository};
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, admin_users};

#[get("/users")]
pub async fn show_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let credential = AdminCredential::new(server_config.admin_service_key.as_str());

    match admin_users::list_users(repo.get_ref(), &user, &credential) {
        Ok(page) => {
            let mut context = base_context(&flash_messages, Some(&user), "users");
            context.insert("users", &page.users);
            render_template(&tera, "admin/users.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/admin")
        }
        Err(err) => {
            log::error!("Failed to list staff users: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/users/{id}/delete")]
pub async fn delete_user(
    user: AuthenticatedUser,
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let credential = AdminCredential::new(server_config.admin_service_key.as_str());

    match admin_users::delete_user(repo.get_ref(), &user, &credential, id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("User deleted.").send();
            redirect("/admin/users")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/admin")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect("/admin/users")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/users")
        }
        Err(err) => {
            log::error!("Failed to delete staff user: {err}");
            FlashMessage::error("Failed to delete the user.").send();
            redirect("/admin/users")
        }
    }
}
