//! Error formatting utilities.
//!
//! Helpers that turn `anyhow` error chains into the one-line messages shown
//! to the operator.

use anyhow::Error;

use crate::errors::ApiError;

/// Format an error and its source chain into a single line.
///
/// # Example
///
/// ```
/// use fedipost::error::format_error_chain;
///
/// let err = anyhow::anyhow!("connection refused")
///     .context("Failed to register application");
/// assert_eq!(
///     format_error_chain(&err),
///     "Failed to register application → connection refused"
/// );
/// ```
pub fn format_error_chain(error: &Error) -> String {
    error
        .chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Short hint for the operator based on the first `ApiError` in the chain.
pub fn hint_for(error: &Error) -> Option<&'static str> {
    let api_error = error.chain().find_map(|c| c.downcast_ref::<ApiError>())?;
    match api_error {
        ApiError::Transport(_) => Some("Check your network connection and the instance URL."),
        ApiError::Status {
            status_code: 401 | 403,
            ..
        } => Some("The instance rejected the credentials. Run `fedipost logout` to sign in again."),
        ApiError::Status {
            status_code: 400, ..
        } => Some("Check the username and password."),
        ApiError::InvalidUrl(_) => {
            Some("Run `fedipost logout` and enter a URL like https://example.social.")
        }
        _ => None,
    }
}
