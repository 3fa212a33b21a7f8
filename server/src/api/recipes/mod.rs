pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            patch(update::update_recipe).delete(delete::delete_recipe),
        )
}

/// Document ids are UUIDs; anything else names a document that cannot exist.
pub(crate) fn parse_document_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        list::RecipeDocument,
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
