use crate::api::{error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cocina_core::recipe::validate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub category: String,
    pub instructions: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(content = CreateRecipeRequest, example = json!({
        "name": "Tarta",
        "ingredients": ["harina", "huevos"],
        "category": "Postres",
        "instructions": "Hornear 30 minutos",
        "imageUrl": null
    })),
    responses(
        (status = 201, description = "Recipe created", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser { user, .. }: AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(field) = validate(&request.name, &request.ingredients, &request.instructions) {
        return error_response(StatusCode::BAD_REQUEST, field.to_string());
    }

    let mut conn = get_conn!(pool);

    let new_recipe = NewRecipe {
        name: &request.name,
        ingredients: serde_json::json!(request.ingredients),
        category: &request.category,
        instructions: &request.instructions,
        image_url: request
            .image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty()),
        created_by: Some(user.id),
    };

    match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(recipes::id)
        .get_result::<Uuid>(&mut conn)
    {
        Ok(id) => {
            tracing::info!(recipe_id = %id, category = %request.category, "Recipe created");
            (StatusCode::CREATED, Json(CreateRecipeResponse { id })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create recipe")
        }
    }
}
