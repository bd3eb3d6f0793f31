//! Admin session state machine.
//!
//! Three states: `Anonymous` → `Authenticating` → `Authenticated`, falling
//! back to `Anonymous` on login failure, profile-fetch failure, or logout.
//! The session token is persisted through a [`TokenStore`], outside the
//! container, so a restarted process can restore its session via
//! [`AuthSession::restore`].
//!
//! Logout is optimistic: the token is cleared and the state dropped to
//! `Anonymous` before the best-effort server call, whose outcome is
//! ignored.

use emporia_model::User;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gateway::Gateway;
use crate::token::TokenStore;

/// Where the session currently stands.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    /// No session; the initial state.
    Anonymous,
    /// A login request is in flight.
    Authenticating,
    /// A login or profile fetch has resolved successfully.
    Authenticated(User),
}

struct Inner {
    state: AuthState,
    error: Option<String>,
}

/// The admin session container.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct AuthSession {
    gateway: Gateway,
    tokens: Arc<dyn TokenStore>,
    inner: Arc<RwLock<Inner>>,
}

impl AuthSession {
    /// Create an anonymous session.
    pub fn new(gateway: Gateway, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            inner: Arc::new(RwLock::new(Inner {
                state: AuthState::Anonymous,
                error: None,
            })),
        }
    }

    /// Current state.
    pub async fn state(&self) -> AuthState {
        self.inner.read().await.state.clone()
    }

    /// True iff a login or profile fetch has resolved since the last
    /// logout or failure.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.inner.read().await.state, AuthState::Authenticated(_))
    }

    /// The authenticated profile, if any.
    pub async fn user(&self) -> Option<User> {
        match &self.inner.read().await.state {
            AuthState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Latest session error, if any.
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Log in with credentials.
    ///
    /// On success the token is persisted and the profile stored; on failure
    /// the session drops back to `Anonymous` with an error recorded.
    pub async fn login(&self, email: &str, password: &str) {
        {
            let mut inner = self.inner.write().await;
            inner.state = AuthState::Authenticating;
            inner.error = None;
        }

        match self.gateway.login(email, password).await {
            Ok(response) => {
                if let Err(e) = self.tokens.save(&response.token) {
                    // The in-memory session still works; only restore after
                    // a restart is affected.
                    log::warn!("session token not persisted: {e}");
                }
                let mut inner = self.inner.write().await;
                inner.state = AuthState::Authenticated(response.user);
                inner.error = None;
            }
            Err(e) => {
                let mut inner = self.inner.write().await;
                inner.state = AuthState::Anonymous;
                inner.error = Some(e.to_string());
            }
        }
    }

    /// Log out. The token is cleared and the state dropped to `Anonymous`
    /// immediately; the server call is best-effort.
    pub async fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            log::warn!("session token not removed: {e}");
        }
        {
            let mut inner = self.inner.write().await;
            inner.state = AuthState::Anonymous;
            inner.error = None;
        }
        if let Err(e) = self.gateway.logout().await {
            log::debug!("logout request ignored failure: {e}");
        }
    }

    /// Restore a session from a token left by a previous process.
    ///
    /// No stored token leaves the session anonymous without error. A stored
    /// token triggers a profile fetch: success authenticates; any failure
    /// clears the token and, unless `silent`, records the error.
    pub async fn restore(&self, silent: bool) {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                log::warn!("token store unreadable: {e}");
                return;
            }
        };
        log::debug!("restoring session from stored token ({} chars)", token.len());

        match self.gateway.profile().await {
            Ok(user) => {
                let mut inner = self.inner.write().await;
                inner.state = AuthState::Authenticated(user);
                inner.error = None;
            }
            Err(e) => {
                if let Err(clear_err) = self.tokens.clear() {
                    log::warn!("stale token not removed: {clear_err}");
                }
                let mut inner = self.inner.write().await;
                inner.state = AuthState::Anonymous;
                if !silent {
                    inner.error = Some(e.to_string());
                }
            }
        }
    }
}
