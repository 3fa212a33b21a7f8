pub mod sign_in;

use crate::models::User;
use serde::Serialize;
use utoipa::ToSchema;

/// The signed-in user as the client sees it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uid: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
        }
    }
}
