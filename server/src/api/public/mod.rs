pub mod auth;
pub mod testing;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/test/unauthed-ping",
            get(testing::unauthed_ping::unauthed_ping),
        )
        .route("/api/auth/sign-in", post(auth::sign_in::sign_in))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::sign_in::sign_in,
        testing::unauthed_ping::unauthed_ping,
    ),
    components(schemas(
        auth::sign_in::SignInRequest,
        auth::sign_in::SignInResponse,
        auth::UserResponse,
        testing::unauthed_ping::UnauthedPingResponse,
    ))
)]
pub struct ApiDoc;
