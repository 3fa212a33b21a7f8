//! Identity backed by the recipe store server's federated sign-in.
//!
//! The server verifies the provider credential and issues a bearer session
//! token, which is stored on the shared [`ApiClient`] so that subsequent
//! recipe requests are authenticated.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{IdentityProvider, SignInProvider, UserIdentity};
use crate::api_client::{error_message, ApiClient};
use crate::error::AuthError;

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    provider: SignInProvider,
    credential: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    token: String,
    user: UserIdentity,
}

#[derive(Debug, Clone)]
pub struct ServerIdentity {
    api: ApiClient,
}

impl ServerIdentity {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Bearer token of the current session, if signed in.
    pub fn token(&self) -> Option<String> {
        self.api.token()
    }
}

fn unavailable(e: reqwest::Error) -> AuthError {
    AuthError::Unavailable(e.to_string())
}

#[async_trait]
impl IdentityProvider for ServerIdentity {
    async fn sign_in(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<UserIdentity, AuthError> {
        let url = self.api.endpoint(&["api", "auth", "sign-in"]);
        let response = self
            .api
            .request(Method::POST, url)
            .json(&SignInRequest {
                provider,
                credential,
            })
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(AuthError::AuthFailed(error_message(response).await));
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(error_message(response).await));
        }

        let body: SignInResponse = response.json().await.map_err(unavailable)?;
        self.api.set_token(Some(body.token));
        Ok(body.user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.api.token().is_none() {
            return Ok(());
        }

        let url = self.api.endpoint(&["api", "auth", "sign-out"]);
        let response = self
            .api
            .request(Method::POST, url)
            .send()
            .await
            .map_err(unavailable)?;

        // An expired session is as good as signed out.
        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            self.api.set_token(None);
            return Ok(());
        }
        Err(AuthError::Unavailable(error_message(response).await))
    }

    async fn current_user(&self) -> Result<Option<UserIdentity>, AuthError> {
        if self.api.token().is_none() {
            return Ok(None);
        }

        let url = self.api.endpoint(&["api", "auth", "me"]);
        let response = self
            .api
            .request(Method::GET, url)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.api.set_token(None);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(error_message(response).await));
        }

        let user: UserIdentity = response.json().await.map_err(unavailable)?;
        Ok(Some(user))
    }
}
