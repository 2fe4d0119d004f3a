//! Staff sign-in and account bootstrap.

use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::password::{hash_password, verify_password};
use crate::domain::staff::{NewStaffUser, StaffUser};
use crate::domain::types::{StaffEmail, StaffName};
use crate::forms::auth::SignInForm;
use crate::repository::{StaffReader, StaffWriter};
use crate::services::{ServiceError, ServiceResult};

/// Checks the submitted credentials and returns the session claims.
pub fn sign_in<R>(repo: &R, form: SignInForm) -> ServiceResult<AuthenticatedUser>
where
    R: StaffReader + StaffWriter + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::InvalidCredentials);
    }
    let email = StaffEmail::new(form.email).map_err(|_| ServiceError::InvalidCredentials)?;

    let user = repo
        .get_staff_by_email(&email)?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(&form.password, &user.password_hash) {
        log::warn!("Failed sign-in attempt for {email}");
        return Err(ServiceError::InvalidCredentials);
    }

    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.record_sign_in(user.id)?;
    log::info!("Staff user {email} signed in");

    Ok(AuthenticatedUser::from_staff(&user))
}

/// Creates a staff account with a freshly hashed password.
pub fn create_staff<R>(
    repo: &R,
    email: &str,
    name: &str,
    password: &str,
    roles: Vec<String>,
) -> ServiceResult<StaffUser>
where
    R: StaffWriter + ?Sized,
{
    if password.len() < 8 {
        return Err(ServiceError::Form(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let new_user = NewStaffUser {
        email: StaffEmail::new(email)?,
        name: StaffName::new(name)?,
        password_hash: hash_password(password),
        roles,
    };

    Ok(repo.create_staff(&new_user)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::StaffUserId;
    use crate::repository::mock::MockRepository;

    fn stored_user(roles: &[&str]) -> StaffUser {
        StaffUser {
            id: StaffUserId::new(3).unwrap(),
            email: StaffEmail::new("editor@example.com").unwrap(),
            name: StaffName::new("Editor").unwrap(),
            password_hash: hash_password("correct horse"),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            created_at: Utc::now().naive_utc(),
            last_sign_in_at: None,
        }
    }

    fn form(password: &str) -> SignInForm {
        SignInForm {
            email: "Editor@Example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_credentials_sign_in_and_record_time() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_by_email()
            .withf(|email| email.as_str() == "editor@example.com")
            .returning(|_| Ok(Some(stored_user(&["showcase"]))));
        repo.expect_record_sign_in()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|_| Ok(()));

        let user = sign_in(&repo, form("correct horse")).unwrap();

        assert_eq!(user.sub, "3");
        assert_eq!(user.email, "editor@example.com");
    }

    #[test]
    fn wrong_password_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_by_email()
            .returning(|_| Ok(Some(stored_user(&["showcase"]))));
        repo.expect_record_sign_in().times(0);

        let result = sign_in(&repo, form("battery staple"));

        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[test]
    fn unknown_email_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_by_email().returning(|_| Ok(None));

        let result = sign_in(&repo, form("correct horse"));

        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[test]
    fn accounts_without_role_cannot_sign_in() {
        let mut repo = MockRepository::new();
        repo.expect_get_staff_by_email()
            .returning(|_| Ok(Some(stored_user(&[]))));
        repo.expect_record_sign_in().times(0);

        let result = sign_in(&repo, form("correct horse"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn short_passwords_are_refused() {
        let mut repo = MockRepository::new();
        repo.expect_create_staff().times(0);

        let result = create_staff(&repo, "a@example.com", "A", "short", vec![]);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
