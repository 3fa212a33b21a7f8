//! Fake identity provider for testing.
//!
//! Credentials are registered up front; anything else is rejected.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use super::{IdentityProvider, SignInProvider, UserIdentity};
use crate::error::AuthError;

#[derive(Debug, Default)]
pub struct FakeIdentityProvider {
    accepted: HashMap<(SignInProvider, String), UserIdentity>,
    current: RwLock<Option<UserIdentity>>,
    fail_sign_out: AtomicBool,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `credential` for `provider`, signing in as `user`.
    pub fn accept(&mut self, provider: SignInProvider, credential: &str, user: UserIdentity) {
        self.accepted
            .insert((provider, credential.to_string()), user);
    }

    /// Start with `user` already signed in.
    pub fn with_current_user(self, user: UserIdentity) -> Self {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
        self
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_in(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<UserIdentity, AuthError> {
        let user = self
            .accepted
            .get(&(provider, credential.to_string()))
            .cloned()
            .ok_or_else(|| {
                AuthError::AuthFailed(format!("{} rejected the credential", provider))
            })?;

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable(
                "FakeIdentityProvider: sign-out disabled".to_string(),
            ));
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<UserIdentity>, AuthError> {
        Ok(self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
