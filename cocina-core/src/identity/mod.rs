//! Identity: federated sign-in, sign-out and session-change notification.
//!
//! [`Session`] wraps an [`IdentityProvider`] and publishes the signed-in user
//! on every transition. Views listen through a [`SessionSubscription`], which
//! detaches when dropped.

mod fake;
mod server;

pub use fake::FakeIdentityProvider;
pub use server::ServerIdentity;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

use crate::error::AuthError;

/// Third-party identity providers users can sign in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInProvider {
    Google,
    Facebook,
}

impl SignInProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignInProvider::Google => "google",
            SignInProvider::Facebook => "facebook",
        }
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignInProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SignInProvider::Google),
            "facebook" => Ok(SignInProvider::Facebook),
            other => Err(format!("Unknown identity provider: {}", other)),
        }
    }
}

/// The signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    /// Exchange a provider credential (ID or access token) for a user identity.
    async fn sign_in(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<UserIdentity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The user of an existing session, if there is one.
    async fn current_user(&self) -> Result<Option<UserIdentity>, AuthError>;
}

/// Session state shared by all views.
#[derive(Debug)]
pub struct Session {
    provider: Box<dyn IdentityProvider>,
    state: watch::Sender<Option<UserIdentity>>,
}

impl Session {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(None);
        Self { provider, state }
    }

    pub fn current(&self) -> Option<UserIdentity> {
        self.state.borrow().clone()
    }

    /// Ask the provider for an existing session and publish it.
    pub async fn restore(&self) -> Result<Option<UserIdentity>, AuthError> {
        let user = self.provider.current_user().await?;
        self.publish(user.clone());
        Ok(user)
    }

    pub async fn sign_in(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<UserIdentity, AuthError> {
        let user = self
            .provider
            .sign_in(provider, credential)
            .await
            .inspect_err(|e| tracing::warn!(provider = %provider, error = %e, "Sign-in failed"))?;

        tracing::info!(provider = %provider, uid = %user.uid, "Signed in");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider
            .sign_out()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign-out failed"))?;

        tracing::info!("Signed out");
        self.publish(None);
        Ok(())
    }

    /// Start listening for session changes.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.state.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.state.receiver_count()
    }

    fn publish(&self, user: Option<UserIdentity>) {
        self.state.send_replace(user);
    }
}

/// A live listener on session changes. Dropping it detaches the listener.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<UserIdentity>>,
}

impl SessionSubscription {
    /// The user as of the latest transition.
    pub fn current(&mut self) -> Option<UserIdentity> {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next transition. `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<Option<UserIdentity>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> UserIdentity {
        UserIdentity {
            uid: "u-ana".to_string(),
            email: Some("ana@example.com".to_string()),
            display_name: Some("Ana".to_string()),
            photo_url: None,
        }
    }

    fn session() -> Session {
        let mut provider = FakeIdentityProvider::new();
        provider.accept(SignInProvider::Google, "good-token", ana());
        Session::new(Box::new(provider))
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("Google".parse::<SignInProvider>(), Ok(SignInProvider::Google));
        assert_eq!(
            "facebook".parse::<SignInProvider>(),
            Ok(SignInProvider::Facebook)
        );
        assert!("myspace".parse::<SignInProvider>().is_err());
    }

    #[tokio::test]
    async fn test_sign_in_publishes_user() {
        let session = session();
        let mut sub = session.subscribe();
        assert_eq!(sub.current(), None);

        session
            .sign_in(SignInProvider::Google, "good-token")
            .await
            .unwrap();
        assert_eq!(sub.changed().await, Some(Some(ana())));
        assert_eq!(session.current(), Some(ana()));
    }

    #[tokio::test]
    async fn test_rejected_sign_in_publishes_nothing() {
        let session = session();
        let mut sub = session.subscribe();

        let result = session.sign_in(SignInProvider::Google, "bad-token").await;
        assert!(matches!(result, Err(AuthError::AuthFailed(_))));
        assert!(!sub.receiver.has_changed().unwrap());
        assert_eq!(sub.current(), None);
    }

    #[tokio::test]
    async fn test_sign_out_publishes_none() {
        let session = session();
        session
            .sign_in(SignInProvider::Google, "good-token")
            .await
            .unwrap();
        let mut sub = session.subscribe();

        session.sign_out().await.unwrap();
        assert_eq!(sub.changed().await, Some(None));
    }

    #[tokio::test]
    async fn test_dropping_subscription_detaches() {
        let session = session();
        let first = session.subscribe();
        let second = session.subscribe();
        assert_eq!(session.listener_count(), 2);

        drop(first);
        assert_eq!(session.listener_count(), 1);
        drop(second);
        assert_eq!(session.listener_count(), 0);

        // Publishing with no listeners still succeeds.
        session
            .sign_in(SignInProvider::Google, "good-token")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_subscription_ends_with_session() {
        let session = session();
        let mut sub = session.subscribe();
        drop(session);
        assert_eq!(sub.changed().await, None);
    }
}
