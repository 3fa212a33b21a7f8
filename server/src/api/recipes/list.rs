use crate::api::{error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Exact-match category filter
    pub category: Option<String>,
}

/// A recipe as stored in the `recipes` collection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub category: String,
    pub instructions: String,
    pub image_url: Option<String>,
}

impl From<Recipe> for RecipeDocument {
    fn from(recipe: Recipe) -> Self {
        let ingredients = match serde_json::from_value(recipe.ingredients) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(recipe_id = %recipe.id, "Malformed ingredients column: {}", e);
                Vec::new()
            }
        };

        RecipeDocument {
            id: recipe.id.to_string(),
            name: recipe.name,
            ingredients,
            category: recipe.category,
            instructions: recipe.instructions,
            image_url: recipe.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub documents: Vec<RecipeDocument>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Every recipe, oldest first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    _user: AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let mut query = recipes::table
        .order((recipes::created_at.asc(), recipes::id.asc()))
        .select(Recipe::as_select())
        .into_boxed();

    if let Some(ref category) = params.category {
        query = query.filter(recipes::category.eq(category));
    }

    match query.load::<Recipe>(&mut conn) {
        Ok(rows) => Json(ListRecipesResponse {
            documents: rows.into_iter().map(RecipeDocument::from).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list recipes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn row(ingredients: serde_json::Value) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: "Tarta".to_string(),
            ingredients,
            category: "Postres".to_string(),
            instructions: "Hornear".to_string(),
            image_url: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_uses_camel_case_image_url() {
        let doc = RecipeDocument::from(row(serde_json::json!(["harina", "huevos"])));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["ingredients"], serde_json::json!(["harina", "huevos"]));
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_malformed_ingredients_become_empty() {
        let doc = RecipeDocument::from(row(serde_json::json!({"not": "a list"})));
        assert!(doc.ingredients.is_empty());
    }
}
