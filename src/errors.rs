use thiserror::Error;

/// Errors that can occur when talking to an instance.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Instance API error (status {status_code}): {message}")]
    Status { status_code: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Missing field '{field}' in {endpoint} response")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
    #[error("Failed to decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
    #[error("Invalid instance URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur when working with the persisted config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Failed to write config file: {0}")]
    Write(String),
}

/// Errors that can occur during validation of interactive input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Must begin with {0}")]
    InstanceUrl(String),
    #[error("{0} cannot be empty")]
    EmptyField(String),
}

/// Errors raised by interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Cancelled by operator")]
    Cancelled,
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status {
                status_code: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::Terminal(err.to_string())
    }
}

/// Returns true if the error chain contains an operator cancellation.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<PromptError>(),
            Some(PromptError::Cancelled)
        )
    })
}
