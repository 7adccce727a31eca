//! Client-side validation for console forms.
//!
//! Validation failures stay local: a form that fails here is never
//! submitted, the screen shows the field messages instead.

use serde::Deserialize;
use validator::Validate;

/// Login form shared by both tenant surfaces.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsForm {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Password-change form used by the profile and user-edit screens.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChangeForm {
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirmation: String,
}
