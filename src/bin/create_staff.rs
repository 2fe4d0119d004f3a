//! Creates a staff account from the command line.
//!
//! Usage: `create_staff <email> <name> [--admin]`. The password is read from
//! the `STAFF_PASSWORD` environment variable so it never lands in shell history.

use std::env;

use config::Config;
use dotenvy::dotenv;

use pushkind_showcase::db::establish_connection_pool;
use pushkind_showcase::models::config::ServerConfig;
use pushkind_showcase::repository::DieselRepository;
use pushkind_showcase::services::auth::create_staff;
use pushkind_showcase::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let (email, name) = match (args.first(), args.get(1)) {
        (Some(email), Some(name)) => (email.clone(), name.clone()),
        _ => {
            log::error!("Usage: create_staff <email> <name> [--admin]");
            std::process::exit(2);
        }
    };
    let is_admin = args.iter().skip(2).any(|arg| arg == "--admin");

    let password = match env::var("STAFF_PASSWORD") {
        Ok(password) => password,
        Err(_) => {
            log::error!("STAFF_PASSWORD is not set");
            std::process::exit(2);
        }
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let server_config = match settings.and_then(|s| s.try_deserialize::<ServerConfig>()) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let mut roles = vec![SERVICE_ACCESS_ROLE.to_string()];
    if is_admin {
        roles.push(SERVICE_ADMIN_ROLE.to_string());
    }

    match create_staff(&repo, &email, &name, &password, roles) {
        Ok(user) => log::info!("Created staff user {} with id {}", user.email, user.id),
        Err(err) => {
            log::error!("Failed to create staff user: {err}");
            std::process::exit(1);
        }
    }
}
