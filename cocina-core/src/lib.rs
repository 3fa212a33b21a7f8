//! Recipe catalog core: the Recipe entity, the repository over a document
//! store, and the headless views (catalog, category detail, management form,
//! profile) that drive it.

pub mod api_client;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod management;
pub mod navigation;
pub mod profile;
pub mod recipe;
pub mod repository;
pub mod store;
pub mod use_cases;

pub use api_client::ApiClient;
pub use catalog::{
    category_label, distinct_categories, filter_by_category, CatalogView, CategoryDetailView,
    RecipeCard, RecipeCardsView, ViewState, UNCATEGORIZED,
};
pub use config::ClientConfig;
pub use error::{AuthError, ConfigError, RepositoryError, StoreError};
pub use identity::{
    FakeIdentityProvider, IdentityProvider, ServerIdentity, Session, SessionSubscription,
    SignInProvider, UserIdentity,
};
pub use management::{FormAction, FormMode, ManagementSurface, Notice, RecipeForm, SurfaceError};
pub use navigation::{Destination, History, Navigator, SessionRouter, Tab};
pub use profile::{LoginView, ProfileView};
pub use recipe::{InvalidField, Recipe, RecipeDraft, PLACEHOLDER_IMAGE_URL};
pub use repository::RecipeRepository;
pub use store::{HttpStore, MemoryStore, RecipeDocument, RecipeFields, RecipeStore, RecipeUpdate};
pub use use_cases::GetRecipesUseCase;
