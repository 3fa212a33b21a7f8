mod crypto;
mod db;
mod extractor;
mod middleware;
mod verify;

pub use db::{create_session, delete_expired_sessions, delete_session, upsert_user};
pub use extractor::AuthUser;
pub use middleware::require_auth;
pub use verify::{CredentialVerifier, ProviderVerifier, VerifyError};
