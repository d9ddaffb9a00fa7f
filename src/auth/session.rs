use std::sync::Arc;

use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, error};

use super::{AuthResult, IdentityProvider, User};

const DEFAULT_DISPLAY_NAME: &str = "User";

#[derive(Debug)]
struct AuthState {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

/// Client-side authentication state mirrored from the identity provider.
///
/// Starts in the loading state until the first auth-state event arrives or a
/// user is set explicitly.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Wrap `provider` in a fresh session.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            state: RwLock::new(AuthState {
                user: None,
                loading: true,
                error: None,
            }),
        })
    }

    /// Identity provider backing this session.
    pub fn provider(&self) -> Arc<dyn IdentityProvider> {
        self.provider.clone()
    }

    /// Currently signed-in user.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// True until the first auth-state event, and while a sign-in or sign-out runs.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Last sign-in or sign-out failure, if any.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Whether a user is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    /// Display name of the current user, `"User"` when unknown.
    pub async fn display_name(&self) -> String {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .and_then(|user| user.display_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }

    /// Email of the current user, empty when unknown.
    pub async fn email(&self) -> String {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .and_then(|user| user.email.clone())
            .unwrap_or_default()
    }

    /// Avatar URL of the current user, empty when unknown.
    pub async fn photo_url(&self) -> String {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .and_then(|user| user.photo_url.clone())
            .unwrap_or_default()
    }

    /// Sign in through the provider and record the resulting user.
    pub async fn sign_in(&self) -> AuthResult<User> {
        self.begin().await;

        let outcome = self.provider.sign_in().await;
        let mut state = self.state.write().await;
        state.loading = false;
        match outcome {
            Ok(user) => {
                state.user = Some(user.clone());
                Ok(user)
            }
            Err(err) => {
                error!(error = %err, "failed to sign in");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Sign out through the provider and forget the current user.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.begin().await;

        let outcome = self.provider.sign_out().await;
        let mut state = self.state.write().await;
        state.loading = false;
        match outcome {
            Ok(()) => {
                state.user = None;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to sign out");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the current user and leave the loading state.
    pub async fn set_user(&self, user: Option<User>) {
        let mut state = self.state.write().await;
        state.user = user;
        state.loading = false;
    }

    /// Forget the last sign-in or sign-out failure.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Follow the provider's auth-state changes until the provider goes away.
    ///
    /// The current provider value is applied immediately.
    pub fn listen(self: &Arc<Self>) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let mut rx = self.provider.subscribe();
        tokio::spawn(async move {
            loop {
                let user = rx.borrow_and_update().clone();
                debug!(signed_in = user.is_some(), "auth state changed");
                session.set_user(user).await;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }
}
