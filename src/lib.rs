#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::domain::{
    article::Article, event::Event, outlet::Outlet, product::Product, video::Video,
};
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{AdminCredential, DieselRepository};
#[cfg(feature = "server")]
use crate::routes::admin::{admin_home, resource_scope as admin_scope};
#[cfg(feature = "server")]
use crate::routes::api::resource_scope as api_scope;
#[cfg(feature = "server")]
use crate::routes::auth::{show_signin, signin, signout};
#[cfg(feature = "server")]
use crate::routes::main::{inquire_product, show_index, show_listing};
#[cfg(feature = "server")]
use crate::routes::users::{delete_user, show_users};

pub mod db;
pub mod domain;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod table;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod resources;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Role required to use the back office.
pub const SERVICE_ACCESS_ROLE: &str = "showcase";
/// Role required to manage staff accounts.
pub const SERVICE_ADMIN_ROLE: &str = "showcase_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool).with_admin_credential(AdminCredential::new(
        server_config.admin_service_key.as_str(),
    ));

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting showcase on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("/api/v1")
                    .service(api_scope::<Product>())
                    .service(api_scope::<Outlet>())
                    .service(api_scope::<Event>())
                    .service(api_scope::<Article>())
                    .service(api_scope::<Video>()),
            )
            .service(
                web::scope("/auth")
                    .service(show_signin)
                    .service(signin)
                    .service(signout),
            )
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .route("", web::get().to(admin_home))
                    .service(show_users)
                    .service(delete_user)
                    .service(admin_scope::<Product>())
                    .service(admin_scope::<Outlet>())
                    .service(admin_scope::<Event>())
                    .service(admin_scope::<Article>())
                    .service(admin_scope::<Video>()),
            )
            .service(show_index)
            .service(inquire_product)
            .route("/products", web::get().to(show_listing::<Product>))
            .route("/outlets", web::get().to(show_listing::<Outlet>))
            .route("/events", web::get().to(show_listing::<Event>))
            .route("/articles", web::get().to(show_listing::<Article>))
            .route("/videos", web::get().to(show_listing::<Video>))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
