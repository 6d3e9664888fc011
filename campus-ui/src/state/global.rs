//! Global Application State
//!
//! The session store lives here, mirrored into Leptos signals so the guard,
//! navbar and pages react to sign-in and sign-out.

use leptos::*;

use campus_records::api::{AuthApi, TOKEN_KEY};
use campus_records::models::{Credentials, Registration, Session};
use campus_records::session::{SessionStore, TokenStorage};
use campus_records::{SessionError, StorageError};

use crate::api::{client::console_warn, get_api_base, BrowserApi};

/// Token persisted in the browser's localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl TokenStorage for LocalStorage {
    fn read(&self) -> Option<String> {
        storage().ok()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn write(&mut self, token: &str) -> Result<(), StorageError> {
        storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| StorageError::Io("localStorage.setItem failed".to_string()))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| StorageError::Io("localStorage.removeItem failed".to_string()))
    }
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    store: StoredValue<SessionStore<LocalStorage>>,
    /// Signed-in user and token, once the server has vouched for them
    pub session: RwSignal<Option<Session>>,
    /// A token is held (possibly not yet validated)
    pub has_token: RwSignal<bool>,
    /// A session action is in flight
    pub auth_loading: RwSignal<bool>,
    pub auth_error: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let store = SessionStore::new(LocalStorage);
    let has_token = store.has_token();
    let state = GlobalState {
        store: store_value(store),
        session: create_rw_signal(None),
        has_token: create_rw_signal(has_token),
        auth_loading: create_rw_signal(false),
        auth_error: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Copy the store's state into the signals
    fn sync(&self) {
        let (session, has_token, loading, error) = self.store.with_value(|store| {
            (
                store.session(),
                store.has_token(),
                store.state().loading,
                store.state().error.clone(),
            )
        });
        self.session.set(session);
        self.has_token.set(has_token);
        self.auth_loading.set(loading);
        self.auth_error.set(error);
    }

    /// API client carrying the current token
    pub fn api(&self) -> BrowserApi {
        let token = self.store.with_value(|store| store.state().token.clone());
        BrowserApi::new(get_api_base(), token)
    }

    pub async fn login(self, credentials: Credentials) -> Result<Session, SessionError> {
        self.store.update_value(|store| store.begin());
        self.sync();
        let outcome = self.api().login(&credentials).await;
        let result = self
            .store
            .try_update_value(|store| store.finish_login(outcome))
            .unwrap_or(Err(SessionError::Storage(StorageError::Unavailable)));
        self.sync();
        result
    }

    pub async fn register(self, registration: Registration) -> Result<Session, SessionError> {
        self.store.update_value(|store| store.begin());
        self.sync();
        let outcome = self.api().register(&registration).await;
        let result = self
            .store
            .try_update_value(|store| store.finish_register(outcome))
            .unwrap_or(Err(SessionError::Storage(StorageError::Unavailable)));
        self.sync();
        result
    }

    /// Re-validate a persisted token against the server
    pub async fn load_session(self) {
        let token = self.store.try_update_value(|store| store.begin_load());
        self.sync();
        let Some(Ok(token)) = token else {
            return;
        };

        let outcome = self.api().profile(&token).await;
        let result = self
            .store
            .try_update_value(|store| store.finish_load(&token, outcome));
        self.sync();
        if let Some(Err(e)) = result {
            console_warn(&format!("Session not restored: {}", e));
            self.show_error("Your session has expired. Please log in again.");
        }
    }

    pub fn logout(&self) {
        self.store.update_value(|store| store.logout());
        self.sync();
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
