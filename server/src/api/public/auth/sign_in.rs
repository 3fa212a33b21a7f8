use crate::api::{error_response, ErrorResponse};
use crate::auth::{create_session, delete_expired_sessions, upsert_user, VerifyError};
use crate::get_conn;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cocina_core::SignInProvider;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// `google` or `facebook`
    #[schema(value_type = String)]
    pub provider: SignInProvider,
    /// Google ID token or Facebook access token
    pub credential: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserResponse,
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = "auth",
    request_body(content = SignInRequest, example = json!({"provider": "google", "credential": "<id token>"})),
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 401, description = "Credential rejected", body = ErrorResponse),
        (status = 502, description = "Identity provider unreachable", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> impl IntoResponse {
    let identity = match state.verifier.verify(req.provider, &req.credential).await {
        Ok(identity) => identity,
        Err(e @ VerifyError::Rejected { .. }) => {
            tracing::warn!(provider = %req.provider, "Sign-in rejected: {}", e);
            return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
        }
        Err(e) => {
            tracing::error!(provider = %req.provider, "Sign-in verification failed: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "Identity provider unavailable");
        }
    };

    let mut conn = get_conn!(state.pool);

    let user = match upsert_user(&mut conn, &identity) {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to store user: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign in");
        }
    };

    match delete_expired_sessions(&mut conn) {
        Ok(0) => {}
        Ok(count) => tracing::debug!(count, "Pruned expired sessions"),
        Err(e) => tracing::warn!("Failed to prune expired sessions: {}", e),
    }

    let token = match create_session(&mut conn, user.id, state.session_ttl_days) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session");
        }
    };

    tracing::info!(user_id = %user.id, provider = %req.provider, "User signed in");

    (
        StatusCode::OK,
        Json(SignInResponse {
            token,
            user: user.into(),
        }),
    )
        .into_response()
}
