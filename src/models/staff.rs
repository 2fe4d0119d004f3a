//! Diesel models representing back-office users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::staff::{NewStaffUser as DomainNewStaffUser, StaffUser as DomainStaffUser};
use crate::domain::staff::{join_roles, parse_roles};
use crate::domain::types::{StaffEmail, StaffName, StaffUserId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::staff_users)]
pub struct StaffUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub roles: String,
    pub created_at: NaiveDateTime,
    pub last_sign_in_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::staff_users)]
pub struct NewStaffUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub roles: String,
}

impl TryFrom<StaffUser> for DomainStaffUser {
    type Error = TypeConstraintError;

    fn try_from(user: StaffUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StaffUserId::try_from(user.id)?,
            email: StaffEmail::new(user.email)?,
            name: StaffName::new(user.name)?,
            password_hash: user.password_hash,
            roles: parse_roles(&user.roles),
            created_at: user.created_at,
            last_sign_in_at: user.last_sign_in_at,
        })
    }
}

impl<'a> From<&'a DomainNewStaffUser> for NewStaffUser<'a> {
    fn from(user: &'a DomainNewStaffUser) -> Self {
        Self {
            email: user.email.as_str(),
            name: user.name.as_str(),
            password_hash: user.password_hash.as_str(),
            roles: join_roles(&user.roles),
        }
    }
}
