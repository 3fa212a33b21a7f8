//! Logical screens and the session-driven redirect at app entry.

use url::form_urlencoded;

use crate::identity::{SessionSubscription, UserIdentity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    Profile,
    Manage,
    Catalog,
    CategoryDetail { category: String },
    Favorites,
}

impl Destination {
    pub fn path(&self) -> String {
        match self {
            Destination::Login => "/login".to_string(),
            Destination::Profile => "/Perfil".to_string(),
            Destination::Manage => "/CRUD".to_string(),
            Destination::Catalog => "/".to_string(),
            Destination::CategoryDetail { category } => format!(
                "/categoryDetail?category={}",
                form_urlencoded::byte_serialize(category.as_bytes()).collect::<String>()
            ),
            Destination::Favorites => "/favorites".to_string(),
        }
    }
}

/// Transitions the visible screen.
pub trait Navigator {
    fn navigate(&mut self, destination: Destination);
}

/// A navigator that records where it was sent.
#[derive(Debug, Default)]
pub struct History {
    visited: Vec<Destination>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Destination> {
        self.visited.last()
    }

    pub fn visited(&self) -> &[Destination] {
        &self.visited
    }
}

impl Navigator for History {
    fn navigate(&mut self, destination: Destination) {
        tracing::debug!(path = %destination.path(), "Navigating");
        self.visited.push(destination);
    }
}

/// The tab bar shown once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Favorites,
    Home,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Favorites, Tab::Home, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Favorites => "Favoritos",
            Tab::Home => "Inicio",
            Tab::Profile => "Perfil",
        }
    }

    pub fn destination(&self) -> Destination {
        match self {
            Tab::Favorites => Destination::Favorites,
            Tab::Home => Destination::Catalog,
            Tab::Profile => Destination::Profile,
        }
    }

    pub fn open(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(self.destination());
    }
}

/// Sends signed-in users to their profile and everyone else to login.
#[derive(Debug)]
pub struct SessionRouter {
    subscription: SessionSubscription,
}

impl SessionRouter {
    /// Take ownership of a subscription. Dropping the router detaches it.
    pub fn new(subscription: SessionSubscription) -> Self {
        Self { subscription }
    }

    pub fn destination_for(user: Option<&UserIdentity>) -> Destination {
        match user {
            Some(_) => Destination::Profile,
            None => Destination::Login,
        }
    }

    /// Route for the current session state.
    pub fn route_now(&mut self, navigator: &mut dyn Navigator) {
        let user = self.subscription.current();
        navigator.navigate(Self::destination_for(user.as_ref()));
    }

    /// Wait for the next session transition and route for it.
    /// Returns false once the session has gone away.
    pub async fn follow_next(&mut self, navigator: &mut dyn Navigator) -> bool {
        match self.subscription.changed().await {
            Some(user) => {
                navigator.navigate(Self::destination_for(user.as_ref()));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Destination::Login.path(), "/login");
        assert_eq!(Destination::Profile.path(), "/Perfil");
        assert_eq!(
            Destination::CategoryDetail {
                category: "Platos fríos & sopas".to_string()
            }
            .path(),
            "/categoryDetail?category=Platos+fr%C3%ADos+%26+sopas"
        );
    }

    #[test]
    fn test_destination_for_session() {
        let user = UserIdentity {
            uid: "u1".to_string(),
            email: None,
            display_name: None,
            photo_url: None,
        };
        assert_eq!(
            SessionRouter::destination_for(Some(&user)),
            Destination::Profile
        );
        assert_eq!(SessionRouter::destination_for(None), Destination::Login);
    }

    #[test]
    fn test_tabs_reach_every_top_level_screen() {
        let mut history = History::new();
        for tab in Tab::ALL {
            tab.open(&mut history);
        }
        assert_eq!(
            history.visited(),
            [Destination::Favorites, Destination::Catalog, Destination::Profile]
        );
        assert_eq!(Tab::Home.title(), "Inicio");
        assert_eq!(Tab::Favorites.destination().path(), "/favorites");
    }

    #[test]
    fn test_history_records() {
        let mut history = History::new();
        history.navigate(Destination::Catalog);
        history.navigate(Destination::Manage);
        assert_eq!(history.current(), Some(&Destination::Manage));
        assert_eq!(history.visited().len(), 2);
    }
}
