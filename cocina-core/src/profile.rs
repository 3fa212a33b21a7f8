//! Login and profile screens.

use crate::error::AuthError;
use crate::identity::{Session, SignInProvider, UserIdentity};
use crate::navigation::{Destination, Navigator};

pub const UNKNOWN_NAME: &str = "Desconocido";
pub const NO_EMAIL: &str = "No disponible";
pub const DEFAULT_AVATAR: &str = "assets/images/default.png";

#[derive(Debug, Default)]
pub struct LoginView {
    error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in and go to the profile. On failure the view keeps a message.
    pub async fn sign_in(
        &mut self,
        session: &Session,
        provider: SignInProvider,
        credential: &str,
        navigator: &mut dyn Navigator,
    ) -> Result<UserIdentity, AuthError> {
        match session.sign_in(provider, credential).await {
            Ok(user) => {
                self.error = None;
                navigator.navigate(Destination::Profile);
                Ok(user)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

/// What the profile screen shows for a user (or for nobody).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub display_name: String,
    pub email: String,
    pub avatar: String,
    error: Option<String>,
}

impl ProfileView {
    pub fn new(user: Option<&UserIdentity>) -> Self {
        let mut view = Self {
            display_name: String::new(),
            email: String::new(),
            avatar: String::new(),
            error: None,
        };
        view.show(user);
        view
    }

    /// Refresh the displayed fields after a session change.
    pub fn show(&mut self, user: Option<&UserIdentity>) {
        let non_empty = |v: Option<&String>| v.filter(|s| !s.is_empty()).cloned();

        self.display_name = user
            .and_then(|u| non_empty(u.display_name.as_ref()))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        self.email = user
            .and_then(|u| non_empty(u.email.as_ref()))
            .unwrap_or_else(|| NO_EMAIL.to_string());
        self.avatar = user
            .and_then(|u| non_empty(u.photo_url.as_ref()))
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    }

    /// Swap in the default avatar when the user's photo fails to load.
    pub fn avatar_failed(&mut self) {
        self.avatar = DEFAULT_AVATAR.to_string();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn log_out(
        &mut self,
        session: &Session,
        navigator: &mut dyn Navigator,
    ) -> Result<(), AuthError> {
        match session.sign_out().await {
            Ok(()) => {
                self.error = None;
                self.show(None);
                navigator.navigate(Destination::Login);
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Error al cerrar sesión: {}", e));
                Err(e)
            }
        }
    }

    pub fn manage_recipes(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(Destination::Manage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_for_missing_fields() {
        let user = UserIdentity {
            uid: "u1".to_string(),
            email: Some(String::new()),
            display_name: None,
            photo_url: None,
        };
        let view = ProfileView::new(Some(&user));
        assert_eq!(view.display_name, UNKNOWN_NAME);
        assert_eq!(view.email, NO_EMAIL);
        assert_eq!(view.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_shows_user_fields() {
        let user = UserIdentity {
            uid: "u1".to_string(),
            email: Some("ana@example.com".to_string()),
            display_name: Some("Ana".to_string()),
            photo_url: Some("https://example.com/ana.png".to_string()),
        };
        let mut view = ProfileView::new(Some(&user));
        assert_eq!(view.display_name, "Ana");
        assert_eq!(view.email, "ana@example.com");
        assert_eq!(view.avatar, "https://example.com/ana.png");

        view.avatar_failed();
        assert_eq!(view.avatar, DEFAULT_AVATAR);
    }
}
