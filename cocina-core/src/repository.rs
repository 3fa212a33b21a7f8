//! Translation layer between raw store documents and [`Recipe`].

use std::sync::Arc;

use crate::error::{RepositoryError, StoreError};
use crate::recipe::{validate, Recipe, RecipeDraft};
use crate::store::{RecipeDocument, RecipeFields, RecipeStore, RecipeUpdate};

/// The application's only handle on the recipe store.
///
/// Every operation returns an explicit result; nothing is swallowed or only
/// logged. Writes are validated before anything is sent to the store.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Fetch every recipe. Either the full collection or an error, never part of it.
    pub async fn get_all_recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        self.list(None).await
    }

    /// Fetch recipes whose category equals `category` exactly, filtered by the store.
    pub async fn get_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Recipe>, RepositoryError> {
        self.list(Some(category)).await
    }

    /// Distinct categories in first-seen order, computed by the store.
    pub async fn get_categories(&self) -> Result<Vec<String>, RepositoryError> {
        self.store.categories().await.map_err(|e| {
            tracing::error!(store = self.store.store_name(), error = %e, "Failed to fetch categories");
            RepositoryError::StoreUnavailable(e)
        })
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Recipe>, RepositoryError> {
        let documents = self.store.list(category).await.map_err(|e| {
            tracing::error!(store = self.store.store_name(), error = %e, "Failed to fetch recipes");
            RepositoryError::StoreUnavailable(e)
        })?;

        tracing::debug!(count = documents.len(), category = ?category, "Fetched recipes");
        Ok(documents.into_iter().map(into_recipe).collect())
    }

    /// Persist a new recipe and return the store-assigned id.
    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<String, RepositoryError> {
        draft.validate().map_err(RepositoryError::ValidationFailed)?;

        let fields = RecipeFields {
            name: draft.name.clone(),
            ingredients: draft.ingredients.clone(),
            category: draft.category.clone(),
            instructions: draft.instructions.clone(),
            image_url: draft.image_url.clone().filter(|url| !url.trim().is_empty()),
        };

        let id = self.store.insert(&fields).await.map_err(|e| {
            tracing::error!(store = self.store.store_name(), error = %e, "Failed to create recipe");
            RepositoryError::StoreWriteFailed(e)
        })?;

        tracing::info!(id = %id, name = %draft.name, "Created recipe");
        Ok(id)
    }

    /// Overwrite name, ingredients and instructions of an existing recipe.
    pub async fn update_recipe(
        &self,
        id: &str,
        name: &str,
        ingredients: &[String],
        instructions: &str,
    ) -> Result<(), RepositoryError> {
        validate(name, ingredients, instructions).map_err(RepositoryError::ValidationFailed)?;

        if id.is_empty() {
            return Err(RepositoryError::NotFound(String::new()));
        }

        let update = RecipeUpdate {
            name: name.to_string(),
            ingredients: ingredients.to_vec(),
            instructions: instructions.to_string(),
        };

        match self.store.update(id, &update).await {
            Ok(()) => {
                tracing::info!(id = %id, "Updated recipe");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(RepositoryError::NotFound(id.to_string())),
            Err(e) => {
                tracing::error!(store = self.store.store_name(), id = %id, error = %e, "Failed to update recipe");
                Err(RepositoryError::StoreWriteFailed(e))
            }
        }
    }

    /// Remove a recipe. Removing an id that does not exist succeeds.
    pub async fn delete_recipe(&self, id: &str) -> Result<(), RepositoryError> {
        if id.is_empty() {
            return Ok(());
        }

        match self.store.delete(id).await {
            Ok(()) | Err(StoreError::NotFound(_)) => {
                tracing::info!(id = %id, "Deleted recipe");
                Ok(())
            }
            Err(e) => {
                tracing::error!(store = self.store.store_name(), id = %id, error = %e, "Failed to delete recipe");
                Err(RepositoryError::StoreWriteFailed(e))
            }
        }
    }
}

fn into_recipe(document: RecipeDocument) -> Recipe {
    let RecipeDocument { id, fields } = document;
    Recipe {
        id,
        name: fields.name,
        ingredients: fields.ingredients,
        category: fields.category,
        instructions: fields.instructions,
        image_url: fields.image_url.unwrap_or_default(),
    }
}
