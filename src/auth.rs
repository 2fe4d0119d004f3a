//! Signed-in staff identity carried in the session cookie.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::staff::StaffUser;
use crate::domain::types::StaffUserId;
use crate::models::config::ServerConfig;

/// Lifetime of an issued session token.
pub const SESSION_DAYS: i64 = 7;

/// JWT claims of a signed-in staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Staff user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_staff(user: &StaffUser) -> Self {
        let expires = Utc::now() + Duration::days(SESSION_DAYS);
        Self {
            sub: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.to_string(),
            roles: user.roles.clone(),
            exp: expires.timestamp().max(0) as usize,
        }
    }

    pub fn staff_id(&self) -> Option<StaffUserId> {
        self.sub
            .parse::<i32>()
            .ok()
            .and_then(|id| StaffUserId::new(id).ok())
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(server_config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server config is not registered");
            return ready(Err(ErrorInternalServerError("server misconfigured")));
        };

        let token = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };

        match Self::from_jwt(&token, &server_config.secret) {
            Ok(user) => ready(Ok(user)),
            Err(err) => {
                log::warn!("Rejected session token: {err}");
                ready(Err(ErrorUnauthorized("invalid session")))
            }
        }
    }
}

/// Returns `true` when `role` is present in `roles`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}
