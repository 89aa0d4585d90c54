use crate::api::auth::AuthApi;
use crate::client::ApiError;
use crate::types::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::types::user::User;

/// Application-wide authentication state.
///
/// `Uninitialized` is the pre-activation state ("still loading"); the first
/// [`AuthSession::init`] moves to `Anonymous` or `Authenticated` based only
/// on the persisted snapshot, without any network revalidation. A stale
/// snapshot therefore presents as authenticated until the next call 401s.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Anonymous,
    Authenticated(LoginResponse),
}

pub struct AuthSession {
    auth: AuthApi,
    state: SessionState,
}

impl AuthSession {
    pub fn new(auth: AuthApi) -> Self {
        Self {
            auth,
            state: SessionState::Uninitialized,
        }
    }

    /// First activation: adopt the persisted snapshot, if any.
    pub fn init(&mut self) {
        self.refresh();
    }

    /// Re-reads the persisted snapshot into state. No network call; used
    /// after storage was mutated externally.
    pub fn refresh(&mut self) {
        self.state = match self.auth.current_user() {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        };
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True until the first `init` has run.
    pub fn loading(&self) -> bool {
        matches!(self.state, SessionState::Uninitialized)
    }

    pub fn user(&self) -> Option<&LoginResponse> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Logs in, persists the snapshot and moves to `Authenticated`. On
    /// failure the state is unchanged and the error propagates.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let resp = self.auth.login(credentials).await?;
        self.auth.set_current_user(&resp);
        self.state = SessionState::Authenticated(resp.clone());
        Ok(resp)
    }

    /// Ends the session. The remote call is attempted first, but the local
    /// snapshot is cleared and the state moves to `Anonymous` regardless of
    /// its outcome; only then does a remote failure propagate.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = self.auth.logout().await;
        self.auth.clear_current_user();
        self.state = SessionState::Anonymous;
        result.map(|_| ())
    }

    /// Registration does not change session state; accounts await admin
    /// approval before they can log in.
    pub async fn register(&self, data: &RegisterRequest) -> Result<User, ApiError> {
        self.auth.register(data).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::client::session::{MemoryStorage, Session, Storage, USER_KEY};
    use crate::client::ClientBuilder;
    use crate::types::user::{UserRole, UserStatus};

    use super::*;

    fn mock_snapshot() -> LoginResponse {
        LoginResponse {
            token: String::from("tok-1"),
            user_id: 7,
            name: String::from("Wanjiru"),
            role: UserRole::Admin,
            status: UserStatus::Active,
        }
    }

    fn session_with_storage(storage: Arc<dyn Storage>) -> AuthSession {
        let client = ClientBuilder::new("http://localhost:8080/api")
            .with_session(Session::new(storage))
            .build()
            .unwrap();
        AuthSession::new(AuthApi::new(client))
    }

    #[test]
    fn test_init_without_snapshot_is_anonymous() {
        let mut session = session_with_storage(Arc::new(MemoryStorage::new()));
        assert!(session.loading());

        session.init();
        assert!(!session.loading());
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_init_with_snapshot_is_authenticated() {
        let storage = Arc::new(MemoryStorage::new());
        let snapshot = mock_snapshot();
        storage.set(USER_KEY, &serde_json::to_string(&snapshot).unwrap());

        let mut session = session_with_storage(storage);
        session.init();
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some(&snapshot));
    }

    #[test]
    fn test_refresh_follows_external_storage_change() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = session_with_storage(storage.clone());
        session.init();
        assert!(!session.is_authenticated());

        storage.set(USER_KEY, &serde_json::to_string(&mock_snapshot()).unwrap());
        session.refresh();
        assert!(session.is_authenticated());

        storage.remove(USER_KEY);
        session.refresh();
        assert!(!session.is_authenticated());
    }
}
