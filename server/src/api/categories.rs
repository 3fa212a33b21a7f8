use crate::api::{error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use diesel::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /api/categories (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Keep the first occurrence of each category.
fn first_seen(categories: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "recipes",
    responses(
        (status = 200, description = "Distinct categories in order of first use", body = CategoriesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(_user: AuthUser, State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result = recipes::table
        .order((recipes::created_at.asc(), recipes::id.asc()))
        .select(recipes::category)
        .load::<String>(&mut conn);

    match result {
        Ok(all) => Json(CategoriesResponse {
            categories: first_seen(all),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list categories")
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(list_categories), components(schemas(CategoriesResponse)))]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen() {
        let input = ["A", "A", "B", "A", "C", "B"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(first_seen(input), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_first_seen_is_case_sensitive() {
        let input = vec!["Postres".to_string(), "postres".to_string()];
        assert_eq!(first_seen(input).len(), 2);
    }
}
