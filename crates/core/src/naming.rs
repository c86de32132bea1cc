//! Validators for logins, person names, group titles and subject names.

use crate::error::CoreError;

pub const MIN_LOGIN_LENGTH: usize = 3;
pub const MAX_LOGIN_LENGTH: usize = 64;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate a login: 3..=64 characters of ASCII letters, digits, `.`, `_` or `-`.
pub fn validate_login(login: &str) -> Result<(), CoreError> {
    let len = login.chars().count();
    if !(MIN_LOGIN_LENGTH..=MAX_LOGIN_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Login must be between {MIN_LOGIN_LENGTH} and {MAX_LOGIN_LENGTH} characters"
        )));
    }
    if !login
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(CoreError::Validation(
            "Login may only contain ASCII letters, digits, '.', '_' and '-'".into(),
        ));
    }
    Ok(())
}

/// Validate a human-readable name (`field` is used in the error message).
pub fn validate_display_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a password meets the configured minimum length.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}
