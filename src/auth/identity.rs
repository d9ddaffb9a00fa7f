use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::{debug, info};

use super::{AuthError, AuthResult, IdentityProvider, User};

/// Identity provider backed by a pre-issued ID token and a fixed profile.
///
/// Useful for command-line use and tests, where the token is obtained out of
/// band and passed through configuration.
#[derive(Clone)]
pub struct StaticIdentity {
    token: Option<Arc<str>>,
    profile: User,
    current: Arc<watch::Sender<Option<User>>>,
}

impl StaticIdentity {
    /// Build a provider that will sign in as `profile` using `token`.
    pub fn new(token: Option<String>, profile: User) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            token: token.map(Arc::from),
            profile,
            current: Arc::new(tx),
        }
    }

    /// Build a provider that is already signed in.
    pub fn signed_in(token: impl Into<String>, profile: User) -> Self {
        let identity = Self::new(Some(token.into()), profile.clone());
        identity.current.send_replace(Some(profile));
        identity
    }
}

impl IdentityProvider for StaticIdentity {
    fn sign_in(&self) -> BoxFuture<'static, AuthResult<User>> {
        let identity = self.clone();
        Box::pin(async move {
            if identity.token.is_none() {
                return Err(AuthError::SignIn("no ID token configured".into()));
            }
            info!(uid = %identity.profile.uid, "signed in");
            identity.current.send_replace(Some(identity.profile.clone()));
            Ok(identity.profile)
        })
    }

    fn sign_out(&self) -> BoxFuture<'static, AuthResult<()>> {
        let identity = self.clone();
        Box::pin(async move {
            identity.current.send_replace(None);
            debug!("signed out");
            Ok(())
        })
    }

    fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    fn id_token(&self) -> BoxFuture<'static, AuthResult<String>> {
        let identity = self.clone();
        Box::pin(async move {
            if identity.current.borrow().is_none() {
                return Err(AuthError::NotAuthenticated);
            }
            identity
                .token
                .as_deref()
                .map(str::to_string)
                .ok_or(AuthError::NotAuthenticated)
        })
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> User {
        User {
            uid: "u1".into(),
            display_name: Some("Sam".into()),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn token_requires_sign_in() {
        let identity = StaticIdentity::new(Some("tok".into()), profile());
        assert!(matches!(
            identity.id_token().await,
            Err(AuthError::NotAuthenticated)
        ));

        identity.sign_in().await.unwrap();
        assert_eq!(identity.id_token().await.unwrap(), "tok");
        assert_eq!(identity.current_user(), Some(profile()));

        identity.sign_out().await.unwrap();
        assert!(identity.current_user().is_none());
        assert!(identity.id_token().await.is_err());
    }

    #[tokio::test]
    async fn sign_in_without_token_fails() {
        let identity = StaticIdentity::new(None, profile());
        assert!(matches!(identity.sign_in().await, Err(AuthError::SignIn(_))));
        assert!(identity.current_user().is_none());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let identity = StaticIdentity::new(Some("tok".into()), profile());
        let mut rx = identity.subscribe();
        identity.sign_in().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|u| u.uid.as_str()), Some("u1"));
    }
}
