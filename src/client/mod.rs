//! HTTP client for the study-card server
//!
//! Module creation and the login/registration flows post JSON to the server
//! with the page's anti-forgery token attached. Every failure is turned into
//! a [`ClientError`] whose message is meant to be shown to the user as is.

pub mod auth;
pub mod module;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::ServerConfig;
use crate::{log_debug, log_warn};

pub use auth::{AuthForm, AuthMode, AuthOutcome, Credentials};
pub use module::{CardDraft, ModuleDraft, ModulePayload};

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Form input rejected before anything is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Module name is required")]
    MissingModuleName,
    #[error("At least one complete card is required")]
    NoCompleteCards,
    #[error("Please enter a username.")]
    MissingUsername,
    #[error("Please enter a password.")]
    MissingPassword,
    #[error("Please repeat your password.")]
    MissingConfirmation,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Failure of a form submission
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never got a usable answer
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid server URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Error payload returned by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A submission the server accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub status: u16,
    /// Final URL after any redirect the server sent
    pub location: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Client
// ═══════════════════════════════════════════════════════════════════════════════

/// JSON client bound to one server and session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a client with its own cookie store
    pub fn new(base_url: &str, csrf_token: Option<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|source| ClientError::Network {
                message: "Could not set up HTTP client".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            csrf_token: csrf_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, config.csrf_token.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    /// POST `body` as JSON and classify the answer.
    ///
    /// `network_message` is used when no answer arrives; `fallback` when the
    /// server rejects the request without an `error` field.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        network_message: &str,
        fallback: impl FnOnce(u16) -> String,
    ) -> Result<Submitted, ClientError> {
        let url = self.endpoint(path)?;

        let mut request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);

        match &self.csrf_token {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => log_warn!("CSRF token missing; sending {} without it", path),
        }

        let network = |source| ClientError::Network {
            message: network_message.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let location = response.url().to_string();
        let text = response.text().await.map_err(network)?;
        log_debug!("POST {} -> {}", url, status);

        if status.is_success() {
            return Ok(Submitted {
                status: status.as_u16(),
                location,
            });
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| fallback(status.as_u16()));

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url", None).expect_err("should reject");
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = ApiClient::new("http://localhost:5000/", None).expect("valid url");
        assert_eq!(
            client.endpoint("/api/login").expect("joins").as_str(),
            "http://localhost:5000/api/login"
        );
    }

    #[test]
    fn test_empty_token_is_treated_as_missing() {
        let client =
            ApiClient::new("http://localhost:5000", Some(String::new())).expect("valid url");
        assert!(client.csrf_token.is_none());
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let err = ClientError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match.");
    }
}
