//! Data rendered on the staff administration page.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::staff::StaffUser;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub created_at: NaiveDateTime,
    pub last_sign_in_at: Option<NaiveDateTime>,
    /// Set for the account viewing the page, which cannot delete itself.
    pub is_current: bool,
}

impl StaffSummary {
    pub fn new(user: StaffUser, current_id: Option<i32>) -> Self {
        let id = user.id.get();
        Self {
            id,
            email: user.email.into_inner(),
            name: user.name.into_inner(),
            roles: user.roles,
            created_at: user.created_at,
            last_sign_in_at: user.last_sign_in_at,
            is_current: current_id == Some(id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersPage {
    pub users: Vec<StaffSummary>,
}
