use crate::api::{error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::parse_document_id;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe document ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted, or it did not exist"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_recipe(
    _user: AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_document_id(&id) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let mut conn = get_conn!(pool);

    match diesel::delete(recipes::table.find(id)).execute(&mut conn) {
        Ok(count) => {
            if count > 0 {
                tracing::info!(recipe_id = %id, "Recipe deleted");
            }
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::error!(recipe_id = %id, "Failed to delete recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete recipe")
        }
    }
}
