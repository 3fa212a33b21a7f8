use crate::api::{error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RecipeChanges;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use cocina_core::recipe::validate;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::parse_document_id;

/// Full overwrite of the editable fields. Category and image are left alone.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe document ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    _user: AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if let Err(field) = validate(&request.name, &request.ingredients, &request.instructions) {
        return error_response(StatusCode::BAD_REQUEST, field.to_string());
    }

    let Some(id) = parse_document_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, "Recipe not found");
    };

    let mut conn = get_conn!(pool);

    let changes = RecipeChanges {
        name: &request.name,
        ingredients: serde_json::json!(request.ingredients),
        instructions: &request.instructions,
        updated_at: Utc::now(),
    };

    match diesel::update(recipes::table.find(id))
        .set(&changes)
        .execute(&mut conn)
    {
        Ok(0) => error_response(StatusCode::NOT_FOUND, "Recipe not found"),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(recipe_id = %id, "Failed to update recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update recipe")
        }
    }
}
