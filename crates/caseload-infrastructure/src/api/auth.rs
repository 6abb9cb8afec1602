//! HTTP identity provider.
//!
//! Posts to `/auth/*`, hands the bearer token to the shared [`ApiClient`],
//! and keeps the session in the local store so it can be restored later.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use caseload_core::auth::{AuthSession, Credentials, IdentityProvider, SignupRequest};
use caseload_core::state::LocalStore;
use caseload_core::{Result, Validate};

use super::client::{ApiClient, decode};

/// Storage key of the persisted auth session.
pub const AUTH_SESSION_KEY: &str = "authSession";

pub struct HttpIdentityProvider {
    api: ApiClient,
    store: Arc<dyn LocalStore>,
}

impl HttpIdentityProvider {
    pub fn new(api: ApiClient, store: Arc<dyn LocalStore>) -> Self {
        Self { api, store }
    }

    async fn adopt(&self, session: AuthSession) -> Result<AuthSession> {
        self.api.set_token(Some(session.access_token.clone()));
        self.store
            .set(AUTH_SESSION_KEY, serde_json::to_string(&session)?)
            .await?;
        Ok(session)
    }

    async fn forget(&self) -> Result<()> {
        self.api.set_token(None);
        self.store.remove(AUTH_SESSION_KEY).await
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        credentials.validate()?;
        let session: AuthSession = self.api.post(&["auth", "login"], credentials).await?;
        self.adopt(session).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession> {
        request.validate()?;
        let session: AuthSession = self.api.post(&["auth", "signup"], request).await?;
        self.adopt(session).await
    }

    async fn logout(&self) -> Result<()> {
        if self.api.has_token()
            && let Err(e) = self.api.post_unit(&["auth", "logout"], &()).await
        {
            // The local session is dropped either way.
            tracing::warn!("Remote logout failed: {}", e);
        }
        self.forget().await
    }

    async fn restore(&self) -> Result<Option<AuthSession>> {
        let Some(raw) = self.store.get(AUTH_SESSION_KEY).await? else {
            return Ok(None);
        };

        let session = match decode::<AuthSession>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable stored auth session: {}", e);
                self.forget().await?;
                return Ok(None);
            }
        };

        if session.is_expired(Utc::now()) {
            tracing::info!("Stored auth session has expired");
            self.forget().await?;
            return Ok(None);
        }

        self.api.set_token(Some(session.access_token.clone()));
        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::InMemoryLocalStore;
    use caseload_core::config::ApiSettings;
    use chrono::Duration;

    fn provider() -> (HttpIdentityProvider, ApiClient, Arc<InMemoryLocalStore>) {
        let api = ApiClient::new(&ApiSettings::default()).unwrap();
        let store = Arc::new(InMemoryLocalStore::new());
        let provider = HttpIdentityProvider::new(api.clone(), store.clone());
        (provider, api, store)
    }

    fn stored(expires_in: Option<Duration>) -> String {
        serde_json::to_string(&AuthSession {
            therapist_id: "t-1".to_string(),
            access_token: "tok".to_string(),
            expires_at: expires_in.map(|d| Utc::now() + d),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_restore_without_stored_session() {
        let (provider, api, _) = provider();
        assert!(provider.restore().await.unwrap().is_none());
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_restore_sets_token() {
        let (provider, api, store) = provider();
        store
            .set(AUTH_SESSION_KEY, stored(Some(Duration::hours(1))))
            .await
            .unwrap();

        let session = provider.restore().await.unwrap().unwrap();
        assert_eq!(session.therapist_id, "t-1");
        assert!(api.has_token());
    }

    #[tokio::test]
    async fn test_restore_drops_expired_session() {
        let (provider, api, store) = provider();
        store
            .set(AUTH_SESSION_KEY, stored(Some(Duration::hours(-1))))
            .await
            .unwrap();

        assert!(provider.restore().await.unwrap().is_none());
        assert!(!api.has_token());
        assert!(store.get(AUTH_SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_drops_corrupt_session() {
        let (provider, _, store) = provider();
        store
            .set(AUTH_SESSION_KEY, "{\"therapist_id\":".to_string())
            .await
            .unwrap();

        assert!(provider.restore().await.unwrap().is_none());
        assert!(store.get(AUTH_SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_without_token_stays_local() {
        let (provider, _, store) = provider();
        store.set(AUTH_SESSION_KEY, stored(None)).await.unwrap();

        provider.logout().await.unwrap();
        assert!(store.get(AUTH_SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials_before_network() {
        let (provider, _, _) = provider();
        let err = provider
            .login(&Credentials {
                email: " ".to_string(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, caseload_core::CaseloadError::Validation(_)));
    }
}
