use crate::api::{error_response, ErrorResponse};
use crate::auth::{delete_session, AuthUser};
use crate::db::DbPool;
use crate::get_conn;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    tag = "auth",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn sign_out(
    AuthUser { user, session_id }: AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match delete_session(&mut conn, session_id) {
        Ok(_) => {
            tracing::info!(user_id = %user.id, "User signed out");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete session: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign out")
        }
    }
}
