use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{StaffEmail, StaffName, StaffUserId};

/// Back-office account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffUser {
    pub id: StaffUserId,
    pub email: StaffEmail,
    pub name: StaffName,
    #[serde(skip)]
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: NaiveDateTime,
    pub last_sign_in_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewStaffUser {
    pub email: StaffEmail,
    pub name: StaffName,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Splits the comma separated roles column.
pub fn parse_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_roles(roles: &[String]) -> String {
    roles
        .iter()
        .map(|role| role.trim())
        .filter(|role| !role.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
