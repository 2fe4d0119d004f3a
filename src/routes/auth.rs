use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::auth::SignInForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, push_alert, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

fn signin_page(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    email: &str,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, None, "signin");
    if let Some(error) = error {
        push_alert(&mut context, error, &Level::Error);
    }
    context.insert("email", email);
    render_template(tera, "auth/signin.html", &context)
}

#[get("/signin")]
pub async fn show_signin(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/admin");
    }
    signin_page(&tera, &flash_messages, "", None)
}

#[post("/signin")]
pub async fn signin(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let email = form.email.clone();

    let user = match auth_service::sign_in(repo.get_ref(), form) {
        Ok(user) => user,
        Err(ServiceError::InvalidCredentials) => {
            return signin_page(
                &tera,
                &flash_messages,
                &email,
                Some("Invalid email or password."),
            );
        }
        Err(ServiceError::Unauthorized) => {
            return signin_page(
                &tera,
                &flash_messages,
                &email,
                Some("This account has no access to the back office."),
            );
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let token = match user.to_jwt(&server_config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Failed to issue session token: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&request.extensions(), token) {
        log::error!("Failed to store identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    FlashMessage::success(format!("Welcome, {}.", user.name)).send();
    redirect("/admin")
}

#[post("/signout")]
pub async fn signout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}
