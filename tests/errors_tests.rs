use anyhow::Context;
use fedipost::error::format_error_chain;
use fedipost::errors::{ApiError, ConfigError, PromptError, ValidationError, is_cancelled};

#[test]
fn test_error_enum_display_messages() {
    let api = ApiError::Status {
        status_code: 422,
        message: "Validation failed".to_string(),
    };
    assert_eq!(
        api.to_string(),
        "Instance API error (status 422): Validation failed"
    );

    let transport = ApiError::Transport("connection refused".to_string());
    assert_eq!(transport.to_string(), "Transport error: connection refused");

    let missing = ApiError::MissingField {
        endpoint: "token",
        field: "access_token",
    };
    assert_eq!(
        missing.to_string(),
        "Missing field 'access_token' in token response"
    );

    let write = ConfigError::Write("disk full".to_string());
    assert_eq!(write.to_string(), "Failed to write config file: disk full");

    let url = ValidationError::InstanceUrl("https://".to_string());
    assert_eq!(url.to_string(), "Must begin with https://");

    assert_eq!(PromptError::Cancelled.to_string(), "Cancelled by operator");
}

#[test]
fn test_is_cancelled_through_context() {
    let err: anyhow::Error = PromptError::Cancelled.into();
    assert!(is_cancelled(&err));

    let wrapped = Err::<(), _>(PromptError::Cancelled)
        .context("while asking for credentials")
        .unwrap_err();
    assert!(is_cancelled(&wrapped));

    let other: anyhow::Error = PromptError::Terminal("no tty".to_string()).into();
    assert!(!is_cancelled(&other));
}

#[test]
fn test_format_error_chain_includes_typed_cause() {
    let err = Err::<(), _>(ApiError::Transport("timed out".to_string()))
        .context("Failed to create status")
        .unwrap_err();

    assert_eq!(
        format_error_chain(&err),
        "Failed to create status → Transport error: timed out"
    );
}
