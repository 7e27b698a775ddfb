//! Signup and login forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{PersonName, UserEmail, Username};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data submitted from the signup page.
pub struct SignupForm {
    #[validate(length(min = 1, message = "First name cannot be empty."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name cannot be empty."))]
    pub last_name: String,
    #[validate(length(min = 3, max = 32, message = "Username must be 3 to 32 characters long."))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub password: String,
    pub password_confirm: String,
}

/// Validated signup data with the plain password still attached.
pub struct SignupPayload {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub username: Username,
    pub email: UserEmail,
    pub password: String,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;

        if form.password != form.password_confirm {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Self {
            first_name: PersonName::new(form.first_name)?,
            last_name: PersonName::new(form.last_name)?,
            username: Username::new(form.username)?,
            email: UserEmail::new(form.email)?,
            password: form.password,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Form data submitted from the login page.
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
