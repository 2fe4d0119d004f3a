//! Staff account administration behind the privileged repository boundary.

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::types::StaffUserId;
use crate::dto::users::{StaffSummary, UsersPage};
use crate::repository::{AdminCredential, StaffAdmin};
use crate::services::{ServiceError, ServiceResult};

fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Lists every staff account, newest first.
pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    credential: &AdminCredential,
) -> ServiceResult<UsersPage>
where
    R: StaffAdmin + ?Sized,
{
    ensure_admin(user)?;

    let current = user.staff_id().map(StaffUserId::get);
    let users = repo
        .list_staff(credential)?
        .into_iter()
        .map(|staff| StaffSummary::new(staff, current))
        .collect();

    Ok(UsersPage { users })
}

/// Deletes staff account `id`. Administrators cannot delete themselves.
pub fn delete_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    credential: &AdminCredential,
    id: i32,
) -> ServiceResult<()>
where
    R: StaffAdmin + ?Sized,
{
    ensure_admin(user)?;

    let id = StaffUserId::new(id).map_err(|_| ServiceError::NotFound)?;
    if user.staff_id() == Some(id) {
        return Err(ServiceError::Form(
            "You cannot delete your own account.".to_string(),
        ));
    }

    repo.delete_staff(credential, id)?;
    log::info!("Staff user {id} deleted by {}", user.email);
    Ok(())
}
