//! Auth context: who is signed in.
//!
//! The identity is published on a watch channel. Therapist-scoped reads look
//! at it when they are built; an absent identity disables them.

use std::sync::Arc;
use tokio::sync::watch;

use caseload_core::auth::{AuthSession, Credentials, Identity, IdentityProvider, SignupRequest};
use caseload_core::{CaseloadError, Result};

use crate::query::QueryClient;

#[derive(Clone)]
pub struct AuthContext {
    provider: Arc<dyn IdentityProvider>,
    client: QueryClient,
    identity: Arc<watch::Sender<Option<Identity>>>,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn IdentityProvider>, client: QueryClient) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            provider,
            client,
            identity: Arc::new(identity),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn therapist_id(&self) -> Option<String> {
        self.identity().map(|i| i.therapist_id().to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Identity required by a write. `Unauthenticated` when signed out.
    pub fn require(&self) -> Result<Identity> {
        self.identity().ok_or(CaseloadError::Unauthenticated)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// Picks up a session the provider persisted earlier.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        match self.provider.restore().await? {
            Some(session) => self.adopt(session).map(Some),
            None => {
                tracing::debug!("[Auth] No session to restore");
                Ok(None)
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Identity> {
        let session = self.provider.login(credentials).await?;
        self.adopt(session)
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<Identity> {
        let session = self.provider.signup(request).await?;
        self.adopt(session)
    }

    /// Signs out and drops every cached read.
    pub async fn logout(&self) -> Result<()> {
        self.provider.logout().await?;
        self.identity.send_replace(None);
        self.client.clear();
        tracing::info!("[Auth] Signed out");
        Ok(())
    }

    fn adopt(&self, session: AuthSession) -> Result<Identity> {
        let identity = session
            .identity()
            .ok_or_else(|| CaseloadError::validation("identity provider returned a blank id"))?;

        let previous = self.identity.send_replace(Some(identity.clone()));
        if previous.as_ref().is_some_and(|p| p != &identity) {
            // Another therapist's reads must not be served.
            self.client.clear();
        }
        tracing::info!("[Auth] Signed in as therapist {}", identity);
        Ok(identity)
    }
}
