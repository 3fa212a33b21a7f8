use async_trait::async_trait;
use cocina_core::SignInProvider;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Credential rejected by {provider}: {reason}")]
    Rejected {
        provider: SignInProvider,
        reason: String,
    },

    #[error("Could not reach {provider}: {source}")]
    Unreachable {
        provider: SignInProvider,
        #[source]
        source: reqwest::Error,
    },
}

/// A user identity confirmed by the provider that issued the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub provider: SignInProvider,
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<VerifiedIdentity, VerifyError>;
}

/// Verifies Google ID tokens against the tokeninfo endpoint and Facebook
/// access tokens against the Graph API.
pub struct ProviderVerifier {
    client: reqwest::Client,
    google_tokeninfo_url: String,
    google_client_id: Option<String>,
    facebook_graph_url: String,
}

impl ProviderVerifier {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            google_tokeninfo_url: config.google_tokeninfo_url.clone(),
            google_client_id: config.google_client_id.clone(),
            facebook_graph_url: config.facebook_graph_url.trim_end_matches('/').to_string(),
        })
    }

    async fn verify_google(&self, id_token: &str) -> Result<VerifiedIdentity, VerifyError> {
        let provider = SignInProvider::Google;
        let response = self
            .client
            .get(&self.google_tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|source| VerifyError::Unreachable { provider, source })?;

        if !response.status().is_success() {
            return Err(VerifyError::Rejected {
                provider,
                reason: format!("tokeninfo returned {}", response.status()),
            });
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .map_err(|source| VerifyError::Unreachable { provider, source })?;

        google_identity(info, self.google_client_id.as_deref())
    }

    async fn verify_facebook(&self, access_token: &str) -> Result<VerifiedIdentity, VerifyError> {
        let provider = SignInProvider::Facebook;
        let response = self
            .client
            .get(format!("{}/me", self.facebook_graph_url))
            .query(&[
                ("fields", "id,name,email,picture"),
                ("access_token", access_token),
            ])
            .send()
            .await
            .map_err(|source| VerifyError::Unreachable { provider, source })?;

        if !response.status().is_success() {
            return Err(VerifyError::Rejected {
                provider,
                reason: format!("Graph API returned {}", response.status()),
            });
        }

        let me: FacebookMe = response
            .json()
            .await
            .map_err(|source| VerifyError::Unreachable { provider, source })?;

        Ok(facebook_identity(me))
    }
}

#[async_trait]
impl CredentialVerifier for ProviderVerifier {
    async fn verify(
        &self,
        provider: SignInProvider,
        credential: &str,
    ) -> Result<VerifiedIdentity, VerifyError> {
        if credential.trim().is_empty() {
            return Err(VerifyError::Rejected {
                provider,
                reason: "empty credential".to_string(),
            });
        }

        match provider {
            SignInProvider::Google => self.verify_google(credential).await,
            SignInProvider::Facebook => self.verify_facebook(credential).await,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    sub: String,
    aud: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

fn google_identity(
    info: GoogleTokenInfo,
    expected_audience: Option<&str>,
) -> Result<VerifiedIdentity, VerifyError> {
    if let Some(expected) = expected_audience {
        if info.aud.as_deref() != Some(expected) {
            return Err(VerifyError::Rejected {
                provider: SignInProvider::Google,
                reason: "token issued for a different client".to_string(),
            });
        }
    }

    Ok(VerifiedIdentity {
        provider: SignInProvider::Google,
        subject: info.sub,
        email: info.email,
        display_name: info.name,
        photo_url: info.picture,
    })
}

#[derive(Debug, Deserialize)]
struct FacebookMe {
    id: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<FacebookPicture>,
}

#[derive(Debug, Deserialize)]
struct FacebookPicture {
    data: FacebookPictureData,
}

#[derive(Debug, Deserialize)]
struct FacebookPictureData {
    url: Option<String>,
}

fn facebook_identity(me: FacebookMe) -> VerifiedIdentity {
    VerifiedIdentity {
        provider: SignInProvider::Facebook,
        subject: me.id,
        email: me.email,
        display_name: me.name,
        photo_url: me.picture.and_then(|p| p.data.url),
    }
}
