//! Recipe store backed by the `cocina-server` HTTP API.

use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;

use super::{RecipeDocument, RecipeFields, RecipeStore, RecipeUpdate, COLLECTION};
use crate::api_client::{error_message, ApiClient};
use crate::error::StoreError;

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<RecipeDocument>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    id: String,
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    api: ApiClient,
}

impl HttpStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, StoreError> {
        request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

/// Turn a non-success response into a `StoreError`.
async fn rejection(response: Response) -> StoreError {
    let status = response.status();
    let message = error_message(response).await;
    classify(status, message)
}

fn classify(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(message),
        s if s.is_server_error() => StoreError::Unavailable(format!("{} - {}", s.as_u16(), message)),
        s => StoreError::Rejected {
            status: s.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl RecipeStore for HttpStore {
    async fn list(&self, category: Option<&str>) -> Result<Vec<RecipeDocument>, StoreError> {
        let mut url = self.api.endpoint(&["api", COLLECTION]);
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }

        let response = self.send(self.api.request(Method::GET, url)).await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: ListDocumentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(body.documents)
    }

    async fn insert(&self, fields: &RecipeFields) -> Result<String, StoreError> {
        let url = self.api.endpoint(&["api", COLLECTION]);
        let response = self
            .send(self.api.request(Method::POST, url).json(fields))
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: CreateDocumentResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(body.id)
    }

    async fn update(&self, id: &str, update: &RecipeUpdate) -> Result<(), StoreError> {
        let url = self.api.endpoint(&["api", COLLECTION, id]);
        let response = self
            .send(self.api.request(Method::PATCH, url).json(update))
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.api.endpoint(&["api", COLLECTION, id]);
        let response = self.send(self.api.request(Method::DELETE, url)).await?;

        // Deleting something that is already gone is not an error.
        if response.status().is_success() || response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(rejection(response).await)
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let url = self.api.endpoint(&["api", "categories"]);
        let response = self.send(self.api.request(Method::GET, url)).await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: CategoriesResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(body.categories)
    }

    fn store_name(&self) -> &'static str {
        "http"
    }
}
