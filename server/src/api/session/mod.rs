pub mod me;
pub mod sign_out;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for session endpoints (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-out", post(sign_out::sign_out))
        .route("/me", get(me::me))
}

#[derive(OpenApi)]
#[openapi(paths(sign_out::sign_out, me::me))]
pub struct ApiDoc;
