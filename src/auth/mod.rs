//! Authentication adapter delegating token issuance to an identity provider.

mod identity;
mod session;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

pub use identity::StaticIdentity;
pub use session::AuthSession;

/// Result alias for identity provider calls.
pub type AuthResult<T> = Result<T, AuthError>;

/// Failures surfaced by an identity provider.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No user is signed in, so no ID token can be produced.
    #[error("not authenticated")]
    NotAuthenticated,
    /// The provider rejected the sign-in attempt.
    #[error("sign-in failed: {0}")]
    SignIn(String),
    /// The provider failed to sign the user out.
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

/// Profile of the signed-in user as exposed by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-specific user identifier.
    pub uid: String,
    /// Name shown in the UI, if the provider has one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Account e-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar location.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Abstraction over the external identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Run the provider's sign-in flow.
    fn sign_in(&self) -> BoxFuture<'static, AuthResult<User>>;
    /// End the current session.
    fn sign_out(&self) -> BoxFuture<'static, AuthResult<()>>;
    /// User signed in right now, if any.
    fn current_user(&self) -> Option<User>;
    /// Fresh ID token for the current user, sent as a bearer token to the backend.
    fn id_token(&self) -> BoxFuture<'static, AuthResult<String>>;
    /// Receiver notified every time the signed-in user changes.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;
}
