//! Login and registration
//!
//! One form serves both modes. Switching modes keeps what was typed;
//! a successful registration switches back to login with the passwords
//! cleared.

use serde::Serialize;

use super::{ApiClient, ClientError, Submitted, ValidationError};
use crate::log_info;

const LOGIN_PATH: &str = "/api/login";
const REGISTER_PATH: &str = "/api/register";

/// Message shown after a successful registration
pub const REGISTERED_MESSAGE: &str = "Account created. Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Request body for both endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login/registration form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    /// Password confirmation, only checked when registering
    pub password2: String,
}

/// What a successful submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Logged in; the server's redirect target
    LoggedIn(Submitted),
    /// Account created; the form is back in login mode
    Registered,
}

impl AuthForm {
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            username: username.into(),
            password: password.into(),
            password2: String::new(),
        }
    }

    pub fn register(
        username: impl Into<String>,
        password: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Register,
            username: username.into(),
            password: password.into(),
            password2: password2.into(),
        }
    }

    /// Change mode, keeping the typed values
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    fn clear_passwords(&mut self) {
        self.password.clear();
        self.password2.clear();
    }

    /// Check the form for the current mode
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }

        if self.mode == AuthMode::Register {
            if self.password2.is_empty() {
                return Err(ValidationError::MissingConfirmation);
            }
            if self.password != self.password2 {
                return Err(ValidationError::PasswordMismatch);
            }
        }

        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<Submitted, ClientError> {
    client
        .post_json(LOGIN_PATH, credentials, "Try again later.", |_| {
            "Login failed.".to_string()
        })
        .await
}

pub async fn register(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<Submitted, ClientError> {
    client
        .post_json(
            REGISTER_PATH,
            credentials,
            "Could not create account. Try again later.",
            |status| format!("Registration failed (status {status})"),
        )
        .await
}

/// Validate and submit the form in its current mode.
///
/// A login attempt always clears the password afterwards.
pub async fn submit(client: &ApiClient, form: &mut AuthForm) -> Result<AuthOutcome, ClientError> {
    let credentials = form.validate()?;

    match form.mode {
        AuthMode::Register => {
            register(client, &credentials).await?;
            log_info!("Registered account {}", credentials.username);
            form.switch_mode(AuthMode::Login);
            form.clear_passwords();
            Ok(AuthOutcome::Registered)
        }
        AuthMode::Login => {
            let result = login(client, &credentials).await;
            form.password.clear();
            let submitted = result?;
            log_info!("Logged in as {}", credentials.username);
            form.password2.clear();
            Ok(AuthOutcome::LoggedIn(submitted))
        }
    }
}
