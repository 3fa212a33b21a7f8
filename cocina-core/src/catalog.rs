//! Read-only views: category tiles, category detail and recipe cards.

use std::collections::HashSet;

use crate::error::RepositoryError;
use crate::navigation::{Destination, Navigator};
use crate::recipe::Recipe;
use crate::repository::RecipeRepository;
use crate::use_cases::GetRecipesUseCase;

/// Shown when the detail view is opened without a category.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Display label for recipes stored with an empty category.
pub const UNCATEGORIZED: &str = "Sin categoría";

/// How a category key is shown on tiles and headings.
pub fn category_label(category: &str) -> &str {
    if category.is_empty() {
        UNCATEGORIZED
    } else {
        category
    }
}

/// Characters of the instructions shown on a detail card.
pub const PREVIEW_CHARS: usize = 50;

/// Display state of a view that loads from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn from_result<U>(result: Result<U, RepositoryError>, map: impl FnOnce(U) -> T) -> Self {
        match result {
            Ok(value) => ViewState::Ready(map(value)),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(recipes: &[Recipe]) -> Vec<String> {
    let mut seen = HashSet::new();
    recipes
        .iter()
        .filter(|r| seen.insert(r.category.as_str()))
        .map(|r| r.category.clone())
        .collect()
}

/// Recipes whose category equals `category` exactly.
pub fn filter_by_category(recipes: Vec<Recipe>, category: &str) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| r.category == category)
        .collect()
}

/// A recipe prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub has_image: bool,
    pub ingredient_count: usize,
    pub ingredients: String,
    pub category: String,
    pub instructions: String,
    pub preview: String,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            image_url: recipe.image_or_placeholder().to_string(),
            has_image: !recipe.image_url.is_empty(),
            ingredient_count: recipe.ingredients.len(),
            ingredients: recipe.ingredients.join(", "),
            category: recipe.category.clone(),
            instructions: recipe.instructions.clone(),
            preview: preview(&recipe.instructions, PREVIEW_CHARS),
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Category tiles on the home screen.
#[derive(Debug)]
pub struct CatalogView {
    state: ViewState<Vec<String>>,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<String>> {
        &self.state
    }

    /// Fetch all recipes and derive the tiles.
    pub async fn load(&mut self, repository: &RecipeRepository) {
        self.state = ViewState::Loading;
        let result = repository.get_all_recipes().await;
        self.state = ViewState::from_result(result, |recipes| distinct_categories(&recipes));
    }

    /// Ask the store for the distinct categories instead of deriving them here.
    pub async fn load_distinct(&mut self, repository: &RecipeRepository) {
        self.state = ViewState::Loading;
        let result = repository.get_categories().await;
        self.state = ViewState::from_result(result, |categories| categories);
    }

    /// Open the tile at `index`. Returns false if there is no such tile.
    pub fn select(&self, index: usize, navigator: &mut dyn Navigator) -> bool {
        let Some(category) = self.state.ready().and_then(|c| c.get(index)) else {
            return false;
        };
        tracing::debug!(category = %category, "Navigating to category detail");
        navigator.navigate(Destination::CategoryDetail {
            category: category.clone(),
        });
        true
    }
}

/// Recipes of one category.
///
/// The filter key is the category exactly as stored, so an empty category is
/// a real key. Only a request without any category falls back to
/// [`UNKNOWN_CATEGORY`], and that view matches no recipe.
#[derive(Debug)]
pub struct CategoryDetailView {
    category: Option<String>,
    state: ViewState<Vec<RecipeCard>>,
}

impl CategoryDetailView {
    /// `param` is the category from the navigation request, if any.
    pub fn new(param: Option<&str>) -> Self {
        Self {
            category: param.map(str::to_string),
            state: ViewState::Loading,
        }
    }

    /// Heading for the view.
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .map_or(UNKNOWN_CATEGORY, category_label)
    }

    /// The category recipes are matched against, if one was requested.
    pub fn filter_key(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn state(&self) -> &ViewState<Vec<RecipeCard>> {
        &self.state
    }

    /// Refetch everything and filter locally.
    pub async fn load(&mut self, repository: &RecipeRepository) {
        self.state = ViewState::Loading;
        let result = repository.get_all_recipes().await;
        let category = self.category.clone();
        self.state = ViewState::from_result(result, |recipes| match category {
            Some(category) => filter_by_category(recipes, &category)
                .iter()
                .map(RecipeCard::from)
                .collect(),
            None => Vec::new(),
        });
    }

    /// Let the store do the filtering.
    pub async fn load_filtered(&mut self, repository: &RecipeRepository) {
        let Some(category) = self.category.clone() else {
            self.state = ViewState::Ready(Vec::new());
            return;
        };
        self.state = ViewState::Loading;
        let result = repository.get_recipes_by_category(&category).await;
        self.state = ViewState::from_result(result, |recipes| {
            recipes.iter().map(RecipeCard::from).collect()
        });
    }
}

/// Full cards for every recipe.
#[derive(Debug)]
pub struct RecipeCardsView {
    state: ViewState<Vec<RecipeCard>>,
}

impl Default for RecipeCardsView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeCardsView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<RecipeCard>> {
        &self.state
    }

    pub async fn load(&mut self, use_case: &GetRecipesUseCase) {
        self.state = ViewState::Loading;
        let result = use_case.execute().await;
        self.state = ViewState::from_result(result, |recipes| {
            recipes.iter().map(RecipeCard::from).collect()
        });
    }
}
