// src/auth/mod.rs
//! Sign-in collaborator.
//!
//! The catalog does not verify identities. [`SimulatedAuthenticator`] waits
//! a moment and accepts any non-empty credentials; a real identity provider
//! can be dropped in behind [`Authenticator`] without touching the views.

pub mod jwt;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError>;
}

pub struct SimulatedAuthenticator {
    delay: Duration,
    display_name: String,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration, display_name: impl Into<String>) -> Self {
        Self {
            delay,
            display_name: display_name.into(),
        }
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        tokio::time::sleep(self.delay).await;
        info!(email = %credentials.email, "Simulated sign-in accepted");

        Ok(Session {
            email: credentials.email.trim().to_string(),
            display_name: self.display_name.clone(),
        })
    }
}
