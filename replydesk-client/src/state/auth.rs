use shared_types::{AuthTokens, RegisterRequest, UserProfile};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::services::pages::Page;
use crate::session::{SessionStatus, SessionStore, StoredSession};

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Persisted session not read yet
    Unknown,
    Authenticated(UserProfile),
    Anonymous,
}

/// Route guard verdict for a protected page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Session still being restored; show a spinner, do not redirect yet
    Pending,
    RedirectToLogin,
}

/// Who is signed in.
///
/// State is read from the shared [`SessionStore`], so a session dropped by
/// the transport after a failed refresh shows up here as `Anonymous`
/// without any extra wiring.
pub struct AuthSession {
    api: AuthApi,
    session: Arc<SessionStore>,
    hydrated: AtomicBool,
    min_password_length: usize,
    last_error: Mutex<Option<String>>,
}

impl AuthSession {
    pub fn new(api: AuthApi, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            hydrated: AtomicBool::new(false),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            last_error: Mutex::new(None),
        }
    }

    pub fn with_min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    pub fn state(&self) -> AuthState {
        if !self.hydrated.load(Ordering::SeqCst) {
            return AuthState::Unknown;
        }
        match self.session.user() {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Anonymous,
        }
    }

    pub fn user(&self) -> Option<UserProfile> {
        match self.state() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), AuthState::Authenticated(_))
    }

    /// True only until the persisted session has been read
    pub fn is_loading(&self) -> bool {
        matches!(self.state(), AuthState::Unknown)
    }

    pub fn last_error(&self) -> Option<String> {
        self.error_slot().clone()
    }

    /// Restore the persisted session. Synchronous, no network; an expired
    /// token is only discovered by the first request that gets a 401.
    pub fn hydrate(&self) -> AuthState {
        match self.session.hydrate() {
            Some(user) => debug!("Restored session for {}", user.email),
            None => debug!("No stored session"),
        }
        self.hydrated.store(true, Ordering::SeqCst);
        self.state()
    }

    pub async fn login(&self, email: &str, password: &str) -> bool {
        if !self.check_password(password) {
            return false;
        }

        let result = self.api.login(email, password).await;
        self.complete("Login", result)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str, domain: &str) -> bool {
        if !self.check_password(password) {
            return false;
        }

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            domain: domain.to_string(),
        };
        let result = self.api.register(&request).await;
        self.complete("Registration", result)
    }

    /// Tell the server, then forget the session whatever it answered
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!("Logout request failed, clearing session anyway: {}", e);
        }
        self.session.clear();
        self.hydrated.store(true, Ordering::SeqCst);
        *self.error_slot() = None;
        info!("Signed out");
    }

    pub fn guard(&self, page: Page) -> Access {
        let access = match self.state() {
            AuthState::Unknown => Access::Pending,
            AuthState::Authenticated(_) => Access::Allow,
            AuthState::Anonymous => Access::RedirectToLogin,
        };
        debug!("Route guard for {}: {:?}", page, access);
        access
    }

    /// Fires on every sign-in and sign-out, including forced sign-outs
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.session.subscribe()
    }

    fn check_password(&self, password: &str) -> bool {
        if password.chars().count() < self.min_password_length {
            *self.error_slot() = Some(format!(
                "Password must be at least {} characters",
                self.min_password_length
            ));
            return false;
        }
        true
    }

    fn complete(&self, action: &str, result: Result<AuthTokens, crate::ApiError>) -> bool {
        match result {
            Ok(tokens) => {
                info!("{} succeeded for {}", action, tokens.user.email);
                self.session.sign_in(StoredSession {
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                    user: tokens.user,
                });
                self.hydrated.store(true, Ordering::SeqCst);
                *self.error_slot() = None;
                true
            }
            Err(e) => {
                warn!("{} failed: {}", action, e);
                *self.error_slot() = Some(e.user_message());
                false
            }
        }
    }

    fn error_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_error.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("state", &self.state())
            .finish()
    }
}
