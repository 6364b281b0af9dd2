use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::constants;
use crate::errors::ApiError;

/// Access scope of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    /// Every visibility, in the order they are offered to the operator.
    pub const ALL: [Visibility; 4] = [
        Visibility::Public,
        Visibility::Unlisted,
        Visibility::Private,
        Visibility::Direct,
    ];

    /// Wire form sent in the `visibility` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client id/secret pair returned by application registration. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AppRegistration {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for AppRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRegistration")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Access token returned by the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
}

impl AccessToken {
    /// Value for the `Authorization` header, as stored in the config.
    pub fn authorization(&self) -> String {
        format!("{} {}", constants::oauth::BEARER_PREFIX, self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// A created status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct RawAppRegistration {
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

fn require(
    value: Option<String>,
    endpoint: &'static str,
    field: &'static str,
) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingField { endpoint, field }),
    }
}

/// Build the URL of `endpoint` under `base`, keeping any path the base already has.
pub fn join_endpoint(base: &Url, endpoint: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    let cleaned: Vec<&str> = joined.split('/').filter(|s| !s.is_empty()).collect();
    url.set_path(&format!("/{}", cleaned.join("/")));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Pull a readable message out of an error response body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<RawErrorBody>(body)
        && let Some(message) = parsed.error_description.or(parsed.error)
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed
        .chars()
        .take(constants::api::MAX_ERROR_BODY_CHARS)
        .collect()
}

/// HTTP client for a single instance.
#[derive(Debug, Clone)]
pub struct InstanceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl InstanceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(constants::api::REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;
        Self::with_client(http, base_url)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()).into());
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint_name: &'static str,
        path: &str,
        form: &[(&str, &str)],
        authorization: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = join_endpoint(&self.base_url, path);
        debug!(endpoint = endpoint_name, url = %url, "sending request");

        let mut request = self.http.post(url).form(form);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint = endpoint_name, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint_name,
            message: e.to_string(),
        })
    }

    /// Register this client as an OAuth application on the instance.
    pub async fn register_app(&self) -> Result<AppRegistration> {
        let raw: RawAppRegistration = self
            .post_form(
                "app registration",
                constants::api::APPS_PATH,
                &[
                    ("client_name", constants::oauth::CLIENT_NAME),
                    ("redirect_uris", constants::oauth::REDIRECT_URI),
                    ("scopes", constants::oauth::SCOPES),
                ],
                None,
            )
            .await
            .context("Failed to register application")?;

        Ok(AppRegistration {
            client_id: require(raw.client_id, "app registration", "client_id")?,
            client_secret: require(raw.client_secret, "app registration", "client_secret")?,
        })
    }

    /// Exchange a username and password for an access token (password grant).
    pub async fn exchange_token(
        &self,
        registration: &AppRegistration,
        username: &str,
        password: &str,
    ) -> Result<AccessToken> {
        let raw: RawToken = self
            .post_form(
                "token",
                constants::api::TOKEN_PATH,
                &[
                    ("client_id", registration.client_id.as_str()),
                    ("client_secret", registration.client_secret.as_str()),
                    ("username", username),
                    ("password", password),
                    ("grant_type", constants::oauth::GRANT_TYPE),
                    ("scope", constants::oauth::SCOPES),
                ],
                None,
            )
            .await
            .context("Failed to obtain access token")?;

        Ok(AccessToken {
            access_token: require(raw.access_token, "token", "access_token")?,
        })
    }

    /// Post a status. `authorization` is the stored `Authorization` header value.
    pub async fn create_status(
        &self,
        authorization: &str,
        status: &str,
        visibility: Visibility,
    ) -> Result<Status> {
        let raw: RawStatus = self
            .post_form(
                "status",
                constants::api::STATUSES_PATH,
                &[("status", status), ("visibility", visibility.as_str())],
                Some(authorization),
            )
            .await
            .context("Failed to create status")?;

        Ok(Status {
            url: require(raw.url, "status", "url")?,
        })
    }
}
