//! Repository implementation for back-office users.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::staff::{NewStaffUser, StaffUser};
use crate::domain::types::{StaffEmail, StaffUserId};
use crate::models::staff::{NewStaffUser as DbNewStaffUser, StaffUser as DbStaffUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdminCredential, DieselRepository, StaffAdmin, StaffReader, StaffWriter};
use crate::schema::staff_users;

impl DieselRepository {
    fn authorize_admin(&self, credential: &AdminCredential) -> RepositoryResult<()> {
        match &self.admin_credential {
            Some(expected) if expected.matches(credential) => Ok(()),
            Some(_) => Err(RepositoryError::AccessDenied(
                "admin credential mismatch".to_string(),
            )),
            None => Err(RepositoryError::AccessDenied(
                "staff administration is not configured".to_string(),
            )),
        }
    }
}

impl StaffReader for DieselRepository {
    fn get_staff_by_email(&self, email: &StaffEmail) -> RepositoryResult<Option<StaffUser>> {
        let mut conn = self.conn()?;

        let db_user = staff_users::table
            .filter(staff_users::email.eq(email.as_str()))
            .first::<DbStaffUser>(&mut conn)
            .optional()?;

        match db_user {
            Some(db_user) => Ok(Some(
                StaffUser::try_from(db_user).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl StaffWriter for DieselRepository {
    fn create_staff(&self, new_user: &NewStaffUser) -> RepositoryResult<StaffUser> {
        let mut conn = self.conn()?;

        let insertable = DbNewStaffUser::from(new_user);
        let db_user = diesel::insert_into(staff_users::table)
            .values(&insertable)
            .get_result::<DbStaffUser>(&mut conn)?;

        Ok(StaffUser::try_from(db_user)?)
    }

    fn record_sign_in(&self, id: StaffUserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        diesel::update(staff_users::table.find(id.get()))
            .set(staff_users::last_sign_in_at.eq(Some(Utc::now().naive_utc())))
            .execute(&mut conn)?;
        Ok(())
    }
}

impl StaffAdmin for DieselRepository {
    fn list_staff(&self, credential: &AdminCredential) -> RepositoryResult<Vec<StaffUser>> {
        self.authorize_admin(credential)?;
        let mut conn = self.conn()?;

        staff_users::table
            .order(staff_users::created_at.desc())
            .then_order_by(staff_users::id.desc())
            .load::<DbStaffUser>(&mut conn)?
            .into_iter()
            .map(|db_user| StaffUser::try_from(db_user).map_err(RepositoryError::from))
            .collect()
    }

    fn delete_staff(&self, credential: &AdminCredential, id: StaffUserId) -> RepositoryResult<()> {
        self.authorize_admin(credential)?;
        let mut conn = self.conn()?;

        let affected = diesel::delete(staff_users::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
