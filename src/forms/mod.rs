//! Form definitions backing the blog routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod posts;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    InvalidField(#[from] TypeConstraintError),
}

impl FormError {
    /// Text suitable for a flash message, one sentence per problem.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(errors) => {
                let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
                fields.sort_by(|a, b| a.0.cmp(&b.0));

                fields
                    .into_iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |error| match &error.message {
                            Some(message) => message.to_string(),
                            None => format!("Invalid value for {field}."),
                        })
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            FormError::PasswordMismatch => "Passwords do not match.".to_string(),
            FormError::InvalidField(err) => match err {
                TypeConstraintError::InvalidUsername => {
                    "Username may only contain letters, digits, '_', '.' and '-'.".to_string()
                }
                TypeConstraintError::InvalidEmail => {
                    "Please enter a valid email address.".to_string()
                }
                TypeConstraintError::EmptyString => "Please fill in every field.".to_string(),
                TypeConstraintError::TooLong(max) => {
                    format!("Text must be at most {max} characters.")
                }
                TypeConstraintError::NonPositiveId => "Invalid identifier.".to_string(),
            },
        }
    }
}
