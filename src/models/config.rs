//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::table::controller::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_messaging_scheme() -> String {
    "whatsapp".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    /// Key unlocking the staff administration boundary. Never sent to browsers.
    pub admin_service_key: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_messaging_scheme")]
    pub messaging_scheme: String,
    pub messaging_number: String,
}
