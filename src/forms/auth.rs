use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
/// Credentials posted by the sign-in page.
pub struct SignInForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
