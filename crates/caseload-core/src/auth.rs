//! Identity and the identity provider contract.
//!
//! Authentication itself is delegated to an external provider; this layer
//! only needs to know which therapist is signed in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CaseloadError, Result};
use crate::validate::Validate;

/// The authenticated therapist's opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps a therapist id. Blank ids are not identities.
    pub fn new(therapist_id: impl Into<String>) -> Option<Self> {
        let id = therapist_id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn therapist_id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(CaseloadError::validation("email and password are required"));
        }
        Ok(())
    }
}

/// Account creation payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("school_id", &self.school_id)
            .finish_non_exhaustive()
    }
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CaseloadError::validation("first and last name are required"));
        }
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()
    }
}

/// What the provider hands back after a successful login or restore.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub therapist_id: String,
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    pub fn identity(&self) -> Option<Identity> {
        Identity::new(self.therapist_id.clone())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl Validate for AuthSession {
    fn validate(&self) -> Result<()> {
        if self.identity().is_none() || self.access_token.is_empty() {
            return Err(CaseloadError::validation(
                "auth session is missing a therapist id or token",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("therapist_id", &self.therapist_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// External identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession>;

    async fn logout(&self) -> Result<()>;

    /// Returns a previously persisted session, if one is still usable.
    async fn restore(&self) -> Result<Option<AuthSession>>;
}
