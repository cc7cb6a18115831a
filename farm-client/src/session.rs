use serde::Deserialize;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfile {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub available: bool,
}

/// Identity projection returned by the server, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    Account(AccountProfile),
    Expert(ExpertProfile),
}

impl UserProfile {
    pub fn id(&self) -> &str {
        match self {
            UserProfile::Account(account) => &account.id,
            UserProfile::Expert(expert) => &expert.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            UserProfile::Account(account) => &account.username,
            UserProfile::Expert(expert) => &expert.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStatus {
    Resolving,
    Anonymous,
    Authenticated,
}

/// Client-side view of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub authenticated: bool,
    pub resolving: bool,
}

impl SessionState {
    pub fn status(&self) -> IdentityStatus {
        if self.resolving {
            IdentityStatus::Resolving
        } else if self.authenticated {
            IdentityStatus::Authenticated
        } else {
            IdentityStatus::Anonymous
        }
    }

    fn sign_in(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.authenticated = true;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.authenticated = false;
    }
}

/// Result of a login, signup or logout, ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(error: &ClientError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct AccountSession {
    token: String,
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct ExpertSession {
    token: String,
    expert: UserProfile,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: UserProfile,
}

/// Resets `resolving` even when the resolution future is dropped.
struct Resolving<'a>(&'a mut SessionState);

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        self.0.resolving = false;
    }
}

/// Identity context shared by every protected call.
pub struct SessionContext {
    api: ApiClient,
    state: SessionState,
}

impl SessionContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: SessionState::default(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Resolve the persisted token into an identity via `GET /auth/me`.
    ///
    /// A rejected or unresolvable token is cleared and the context left
    /// anonymous. If the returned future is dropped before completion the
    /// result is discarded.
    pub async fn initialize(&mut self) -> Result<IdentityStatus, ClientError> {
        if self.api.store().load().await?.is_none() {
            self.state.sign_out();
            return Ok(self.state.status());
        }

        let api = &self.api;
        let guard = Resolving(&mut self.state);
        guard.0.resolving = true;

        match api.get::<MeResponse>("/auth/me").await {
            Ok(me) => {
                tracing::debug!(user_id = %me.user.id(), "session restored");
                guard.0.sign_in(me.user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore session");
                guard.0.sign_out();
                api.store().clear().await?;
            }
        }

        drop(guard);
        Ok(self.state.status())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AuthOutcome {
        let body = serde_json::json!({ "email": email, "password": password });
        let result = self
            .api
            .post::<_, AccountSession>("/auth/login", &body)
            .await
            .map(|session| (session.token, session.user));

        self.establish(result, "Login successful!").await
    }

    pub async fn login_expert(&mut self, phone: &str, password: &str) -> AuthOutcome {
        let body = serde_json::json!({ "phone": phone, "password": password });
        let result = self
            .api
            .post::<_, ExpertSession>("/expert/login", &body)
            .await
            .map(|session| (session.token, session.expert));

        self.establish(result, "Login successful!").await
    }

    pub async fn signup(&mut self, form: &SignupForm) -> AuthOutcome {
        let result = self
            .api
            .post::<_, AccountSession>("/auth/signup", form)
            .await
            .map(|session| (session.token, session.user));

        self.establish(result, "Signup successful! You are now logged in.")
            .await
    }

    /// Forget the session locally. No request is made.
    pub async fn logout(&mut self) -> AuthOutcome {
        self.state.sign_out();
        match self.api.store().clear().await {
            Ok(()) => AuthOutcome::ok("Logged out successfully."),
            Err(e) => AuthOutcome::failed(&e),
        }
    }

    /// Reset the context when the server rejected the session.
    pub(crate) fn observe<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if matches!(result, Err(ClientError::Unauthorized { .. })) {
            self.state.sign_out();
        }
        result
    }

    pub(crate) fn replace_user(&mut self, user: UserProfile) {
        if self.state.authenticated {
            self.state.user = Some(user);
        }
    }

    async fn establish(
        &mut self,
        result: Result<(String, UserProfile), ClientError>,
        success_message: &str,
    ) -> AuthOutcome {
        let saved = match result {
            Ok((token, user)) => self.api.store().save(&token).await.map(|()| user),
            Err(e) => Err(e),
        };

        match saved {
            Ok(user) => {
                tracing::info!(user_id = %user.id(), "signed in");
                self.state.sign_in(user);
                AuthOutcome::ok(success_message)
            }
            Err(e) => {
                self.state.sign_out();
                if let Err(clear) = self.api.store().clear().await {
                    tracing::error!(error = %clear, "failed to clear stale token");
                }
                AuthOutcome::failed(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::store::MemoryTokenStore;
    use crate::store::TokenStore;

    fn context(base_url: &str) -> (SessionContext, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let api = ApiClient::new(base_url, Arc::clone(&store) as Arc<dyn TokenStore>);
        (SessionContext::new(api), store)
    }

    #[test]
    fn test_profile_deserializes_by_role() {
        let account: UserProfile = serde_json::from_value(serde_json::json!({
            "role": "account",
            "id": "1",
            "username": "Amaka",
            "email": "amaka@example.com",
            "phone": "+2348000000001",
            "address": "Lagos"
        }))
        .unwrap();
        assert_eq!(account.display_name(), "Amaka");

        let expert: UserProfile = serde_json::from_value(serde_json::json!({
            "role": "expert",
            "id": "2",
            "name": "Bola",
            "phone": "+2348000000002",
            "expertise": ["Cassava"],
            "languages": ["Yoruba"],
            "available": true
        }))
        .unwrap();
        assert!(matches!(expert, UserProfile::Expert(ref e) if e.available));
    }

    #[test]
    fn test_status_reflects_flags() {
        let mut state = SessionState::default();
        assert_eq!(state.status(), IdentityStatus::Anonymous);

        state.resolving = true;
        assert_eq!(state.status(), IdentityStatus::Resolving);

        state.resolving = false;
        state.authenticated = true;
        assert_eq!(state.status(), IdentityStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_initialize_without_token_is_anonymous() {
        let (mut session, _store) = context("http://127.0.0.1:1");

        let status = session.initialize().await.unwrap();

        assert_eq!(status, IdentityStatus::Anonymous);
        assert!(!session.state().resolving);
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_initialize_with_unreachable_server_clears_token() {
        let (mut session, store) = context("http://127.0.0.1:1");
        store.save("abc.def.ghi").await.unwrap();

        let status = session.initialize().await.unwrap();

        assert_eq!(status, IdentityStatus::Anonymous);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dropped_initialize_discards_result() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let (mut session, store) = context(&address);
        store.save("abc.def.ghi").await.unwrap();

        let result =
            tokio::time::timeout(Duration::from_millis(200), session.initialize()).await;

        assert!(result.is_err());
        assert!(!session.state().resolving);
        assert!(!session.is_authenticated());
        drop(listener);
    }

    #[tokio::test]
    async fn test_logout_clears_token_without_network() {
        let (mut session, store) = context("http://127.0.0.1:1");
        store.save("abc.def.ghi").await.unwrap();

        let outcome = session.logout().await;

        assert_eq!(outcome, AuthOutcome::ok("Logged out successfully."));
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(session.state(), &SessionState::default());
    }

    #[tokio::test]
    async fn test_failed_login_clears_stale_token() {
        let (mut session, store) = context("http://127.0.0.1:1");
        store.save("stale.token.value").await.unwrap();

        let outcome = session.login("amaka@example.com", "secret1").await;

        assert!(!outcome.success);
        assert!(!session.is_authenticated());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn test_observe_resets_on_unauthorized_only() {
        let (mut session, _store) = context("http://127.0.0.1:1");
        session.state.sign_in(UserProfile::Account(AccountProfile {
            id: "1".into(),
            username: "Amaka".into(),
            email: "amaka@example.com".into(),
            phone: "+2348000000001".into(),
            address: "Lagos".into(),
        }));

        let api_error: Result<(), _> = Err(ClientError::Api {
            status: 404,
            message: "Not Found".into(),
        });
        assert!(session.observe(api_error).is_err());
        assert!(session.is_authenticated());

        let rejected: Result<(), _> = Err(ClientError::Unauthorized {
            status: 403,
            message: "Forbidden: Invalid or expired token.".into(),
        });
        assert!(session.observe(rejected).is_err());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
