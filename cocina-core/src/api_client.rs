//! Shared HTTP plumbing for talking to the recipe store server.
//!
//! The store client and the identity client share one `ApiClient`, so the
//! bearer token obtained at sign-in is attached to every recipe request.

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};
use url::Url;

use crate::config::ClientConfig;

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cocina/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner,
            base_url: config.server_url.clone(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Start a request, attaching the bearer token when one is held.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.request(method, url);
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Pull the server's error message out of a failed response.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body,
            Err(_) => status.to_string(),
        },
        Err(_) => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:3000");
        assert_eq!(
            api.endpoint(&["api", "recipes"]).as_str(),
            "http://localhost:3000/api/recipes"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes() {
        let api = client("https://example.com/cocina/");
        assert_eq!(
            api.endpoint(&["api", "recipes", "a b/c"]).as_str(),
            "https://example.com/cocina/api/recipes/a%20b%2Fc"
        );
    }

    #[test]
    fn test_token_shared_between_clones() {
        let api = client("http://localhost:3000");
        let other = api.clone();
        api.set_token(Some("secret".to_string()));
        assert_eq!(other.token().as_deref(), Some("secret"));
        other.set_token(None);
        assert_eq!(api.token(), None);
    }
}
