//! Session Store
//!
//! Holds the signed-in user and the opaque auth token, and persists only the
//! token to a [`TokenStorage`].
//!
//! Every action is a pending -> fulfilled | rejected transition:
//!
//! - `begin_*` marks the store busy (and hands back what the request needs),
//! - `finish_*` applies the API outcome.
//!
//! The browser front end runs the request itself between the two calls so it
//! never holds the store across an await. [`SessionStore::login`],
//! [`SessionStore::register`] and [`SessionStore::load_session`] compose the
//! pair for callers that can.

mod storage;

#[cfg(feature = "native")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, TokenStorage};

use crate::api::AuthApi;
use crate::error::{ApiResult, SessionError};
use crate::models::{AuthResponse, Credentials, Registration, Session, UserProfile};

/// Observable state of the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Never restored from storage; only the server can vouch for it
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Session store over a token storage backend
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    state: SessionState,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Create a store, picking up any previously persisted token
    pub fn new(storage: S) -> Self {
        let token = storage.read();
        Self {
            storage,
            state: SessionState {
                token,
                ..SessionState::default()
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current session, if both a user and a token are present
    pub fn session(&self) -> Option<Session> {
        let user = self.state.user.as_ref()?;
        let token = self.state.token.as_ref()?;
        Some(Session::new(user, token.clone()))
    }

    /// Whether a token is held, whether or not the user has been loaded yet
    pub fn has_token(&self) -> bool {
        self.state.token.is_some()
    }

    /// Pending transition for login and register
    pub fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    /// Apply the outcome of a login request
    pub fn finish_login(
        &mut self,
        outcome: ApiResult<AuthResponse>,
    ) -> Result<Session, SessionError> {
        match outcome {
            Ok(response) => self.authenticated(response),
            Err(e) if e.is_auth_failure() => {
                tracing::warn!(error = %e, "Login rejected");
                self.purge();
                self.reject(SessionError::InvalidCredentials)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.reject(SessionError::Api(e))
            }
        }
    }

    /// Apply the outcome of a register request
    pub fn finish_register(
        &mut self,
        outcome: ApiResult<AuthResponse>,
    ) -> Result<Session, SessionError> {
        match outcome {
            Ok(response) => self.authenticated(response),
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                self.reject(SessionError::Api(e))
            }
        }
    }

    /// Pending transition for a profile reload; yields the persisted token
    ///
    /// Without a token the reload is rejected immediately.
    pub fn begin_load(&mut self) -> Result<String, SessionError> {
        self.begin();
        match self.storage.read() {
            Some(token) => Ok(token),
            None => {
                self.purge();
                self.reject(SessionError::NoToken)
            }
        }
    }

    /// Apply the outcome of a profile reload for `token`
    ///
    /// Any failure purges the session and the persisted token.
    pub fn finish_load(
        &mut self,
        token: &str,
        outcome: ApiResult<UserProfile>,
    ) -> Result<Session, SessionError> {
        match outcome {
            Ok(user) => {
                tracing::info!(email = %user.email, role = %user.role, "Session restored");
                let session = Session::new(&user, token);
                self.state.user = Some(user);
                self.state.token = Some(token.to_string());
                self.state.loading = false;
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session reload failed, clearing token");
                self.purge();
                if e.is_auth_failure() {
                    self.reject(SessionError::InvalidToken)
                } else {
                    self.reject(SessionError::Api(e))
                }
            }
        }
    }

    /// Drop the user and the token, in memory and in storage
    pub fn logout(&mut self) {
        tracing::info!("Logged out");
        self.purge();
        self.state.error = None;
        self.state.loading = false;
    }

    pub async fn login<A: AuthApi + ?Sized>(
        &mut self,
        api: &A,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        self.begin();
        tracing::debug!(login = %credentials.login_id(), "Logging in");
        let outcome = api.login(credentials).await;
        self.finish_login(outcome)
    }

    pub async fn register<A: AuthApi + ?Sized>(
        &mut self,
        api: &A,
        registration: &Registration,
    ) -> Result<Session, SessionError> {
        self.begin();
        tracing::debug!(email = %registration.email, "Registering");
        let outcome = api.register(registration).await;
        self.finish_register(outcome)
    }

    /// Re-validate the persisted token and restore the user it belongs to
    pub async fn load_session<A: AuthApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<Session, SessionError> {
        let token = self.begin_load()?;
        let outcome = api.profile(&token).await;
        self.finish_load(&token, outcome)
    }

    fn authenticated(&mut self, response: AuthResponse) -> Result<Session, SessionError> {
        if let Err(e) = self.storage.write(&response.token) {
            return self.reject(SessionError::Storage(e));
        }
        tracing::info!(email = %response.user.email, role = %response.user.role, "Signed in");
        let session = Session::new(&response.user, response.token.clone());
        self.state.user = Some(response.user);
        self.state.token = Some(response.token);
        self.state.loading = false;
        Ok(session)
    }

    fn reject<T>(&mut self, error: SessionError) -> Result<T, SessionError> {
        self.state.loading = false;
        self.state.error = Some(error.to_string());
        Err(error)
    }

    fn purge(&mut self) {
        self.state.user = None;
        self.state.token = None;
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::Role;
    use crate::testing::FakeApi;

    #[tokio::test]
    async fn test_login_persists_only_token() {
        let api = FakeApi::new().with_user("admin@college.edu", "secret", Role::Admin);
        let mut store = SessionStore::new(MemoryStorage::new());

        let session = store
            .login(&api, &Credentials::email("admin@college.edu", "secret"))
            .await
            .unwrap();

        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.email, "admin@college.edu");
        assert_eq!(store.storage().read(), Some(session.token.clone()));
        assert!(!store.state().loading);
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_login_with_bad_password() {
        let api = FakeApi::new().with_user("s1@college.edu", "secret", Role::Student);
        let mut store = SessionStore::new(MemoryStorage::with_token("stale"));

        let err = store
            .login(&api, &Credentials::email("s1@college.edu", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::InvalidCredentials);
        assert!(store.session().is_none());
        assert!(store.storage().read().is_none());
        assert_eq!(store.state().error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_login_by_phone() {
        let api = FakeApi::new()
            .with_user("s1@college.edu", "secret", Role::Student)
            .with_phone("s1@college.edu", "9876543210");
        let mut store = SessionStore::new(MemoryStorage::new());

        let session = store
            .login(&api, &Credentials::phone("9876543210", "secret"))
            .await
            .unwrap();
        assert_eq!(session.email, "s1@college.edu");
    }

    #[tokio::test]
    async fn test_register_signs_in_as_student() {
        let api = FakeApi::new();
        let mut store = SessionStore::new(MemoryStorage::new());

        let session = store
            .register(
                &api,
                &Registration {
                    email: "new@college.edu".to_string(),
                    password: "pw".to_string(),
                    name: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(session.role, Role::Student);
        assert!(store.storage().read().is_some());
    }

    #[tokio::test]
    async fn test_load_session_with_valid_token() {
        let api = FakeApi::new().with_user("admin@college.edu", "secret", Role::Admin);
        let token = api.token_for("admin@college.edu");
        let mut store = SessionStore::new(MemoryStorage::with_token(token.clone()));
        assert!(store.has_token());
        assert!(store.session().is_none());

        let session = store.load_session(&api).await.unwrap();
        assert_eq!(session.token, token);
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_load_session_with_invalid_token_clears_storage() {
        let api = FakeApi::new().with_user("admin@college.edu", "secret", Role::Admin);
        let mut store = SessionStore::new(MemoryStorage::with_token("expired"));

        let err = store.load_session(&api).await.unwrap_err();

        assert_eq!(err, SessionError::InvalidToken);
        assert!(store.session().is_none());
        assert!(!store.has_token());
        assert!(store.storage().read().is_none());
    }

    #[tokio::test]
    async fn test_load_session_without_token() {
        let api = FakeApi::new();
        let mut store = SessionStore::new(MemoryStorage::new());

        let err = store.load_session(&api).await.unwrap_err();
        assert_eq!(err, SessionError::NoToken);
        assert_eq!(api.calls(), 0);
    }

    #[test]
    fn test_load_transport_failure_still_purges() {
        let mut store = SessionStore::new(MemoryStorage::with_token("tok"));
        let token = store.begin_load().unwrap();
        let err = store
            .finish_load(&token, Err(ApiError::Transport("offline".into())))
            .unwrap_err();

        assert!(matches!(err, SessionError::Api(ApiError::Transport(_))));
        assert!(store.storage().read().is_none());
    }

    #[tokio::test]
    async fn test_logout_deletes_token() {
        let api = FakeApi::new().with_user("admin@college.edu", "secret", Role::Admin);
        let mut store = SessionStore::new(MemoryStorage::new());
        store
            .login(&api, &Credentials::email("admin@college.edu", "secret"))
            .await
            .unwrap();

        store.logout();

        assert!(store.session().is_none());
        assert!(store.storage().read().is_none());
    }

    #[test]
    fn test_begin_marks_loading() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.begin();
        assert!(store.state().loading);
    }
}
