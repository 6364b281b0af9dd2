//! Input validation utilities.
//!
//! This module provides the validators used by interactive prompts. A
//! failed validation is recoverable: the prompt shows the message and asks
//! again.

use crate::constants;
use crate::errors::ValidationError;

/// Validate an instance URL.
///
/// Every input that begins with `https://` is accepted. Anything else,
/// including plain `http://` URLs and input with leading whitespace, is
/// rejected.
///
/// # Errors
///
/// Returns [`ValidationError::InstanceUrl`] if the prefix is missing.
pub fn validate_instance_url(input: &str) -> Result<(), ValidationError> {
    if !input.starts_with(constants::validation::REQUIRED_URL_PREFIX) {
        return Err(ValidationError::InstanceUrl(
            constants::validation::REQUIRED_URL_PREFIX.to_string(),
        ));
    }

    Ok(())
}

/// Validate that a required field is not empty.
///
/// # Arguments
///
/// * `field` - Human readable field name used in the error message
/// * `input` - The value to validate
pub fn validate_not_empty(field: &str, input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }

    Ok(())
}

/// Validate a username.
pub fn validate_username(input: &str) -> Result<(), ValidationError> {
    validate_not_empty("Username", input)
}

/// Validate a password.
pub fn validate_password(input: &str) -> Result<(), ValidationError> {
    validate_not_empty("Password", input)
}
