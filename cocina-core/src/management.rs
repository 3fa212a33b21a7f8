//! The recipe management surface: a form over one selected recipe plus the
//! list it is selected from.
//!
//! The form is either `Idle` (creating a new recipe) or `Editing` a stored
//! one. Every mutation is followed by a re-fetch of the list; failures are
//! kept as a [`Notice`] for display and also returned to the caller. A
//! mutation that was stored but whose re-fetch failed still returns `Ok`,
//! with a [`Notice::Warning`].

use thiserror::Error;

use crate::error::RepositoryError;
use crate::recipe::{Recipe, RecipeDraft};
use crate::repository::RecipeRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Idle,
    Editing { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update,
    Delete,
}

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("{action:?} is not available in the current form state")]
    ActionUnavailable { action: FormAction },

    #[error("No recipe with id {0} in the list")]
    UnknownRecipe(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Form fields and selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    pub name: String,
    pub instructions: String,
    pub category: String,
    pub image_url: String,
    ingredients: Vec<String>,
    mode: FormMode,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            instructions: String::new(),
            category: String::new(),
            image_url: String::new(),
            ingredients: Vec::new(),
            mode: FormMode::Idle,
        }
    }
}

impl RecipeForm {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn selected_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Idle => None,
            FormMode::Editing { id } => Some(id),
        }
    }

    pub fn available_actions(&self) -> &'static [FormAction] {
        match self.mode {
            FormMode::Idle => &[FormAction::Create],
            FormMode::Editing { .. } => &[FormAction::Update, FormAction::Delete],
        }
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Append an empty ingredient entry.
    pub fn add_ingredient(&mut self) {
        self.ingredients.push(String::new());
    }

    /// Replace the text at `index`. Returns false if out of range.
    pub fn set_ingredient(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.ingredients.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`, shifting the rest up.
    pub fn remove_ingredient(&mut self, index: usize) -> Option<String> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    /// Fill the form from a stored recipe and switch to editing it.
    pub fn load(&mut self, recipe: &Recipe) {
        self.name = recipe.name.clone();
        self.ingredients = recipe.ingredients.clone();
        self.instructions = recipe.instructions.clone();
        self.category = recipe.category.clone();
        self.image_url = recipe.image_url.clone();
        self.mode = FormMode::Editing {
            id: recipe.id.clone(),
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            category: self.category.clone(),
            image_url: Some(self.image_url.clone()).filter(|url| !url.is_empty()),
        }
    }
}

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    /// The action succeeded but something after it did not.
    Warning(String),
    Error(String),
}

#[derive(Debug)]
pub struct ManagementSurface {
    repository: RecipeRepository,
    form: RecipeForm,
    recipes: Vec<Recipe>,
    notice: Option<Notice>,
    loading: bool,
}

impl ManagementSurface {
    pub fn new(repository: RecipeRepository) -> Self {
        Self {
            repository,
            form: RecipeForm::default(),
            recipes: Vec::new(),
            notice: None,
            loading: false,
        }
    }

    pub fn form(&self) -> &RecipeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecipeForm {
        &mut self.form
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Re-fetch the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), SurfaceError> {
        self.loading = true;
        let result = self.repository.get_all_recipes().await;
        self.loading = false;

        match result {
            Ok(recipes) => {
                self.recipes = recipes;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Select a recipe from the current list, replacing any previous selection.
    pub fn select(&mut self, id: &str) -> Result<(), SurfaceError> {
        let recipe = self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| SurfaceError::UnknownRecipe(id.to_string()))?;
        self.form.load(recipe);
        self.notice = None;
        Ok(())
    }

    /// Run `action` against the repository with the current form values.
    pub async fn submit(&mut self, action: FormAction) -> Result<(), SurfaceError> {
        if !self.form.available_actions().contains(&action) {
            return Err(SurfaceError::ActionUnavailable { action });
        }

        self.loading = true;
        let outcome = match action {
            FormAction::Create => self
                .repository
                .create_recipe(&self.form.to_draft())
                .await
                .map(|id| format!("Recipe created with id {}", id)),
            FormAction::Update => {
                let id = self.form.selected_id().unwrap_or_default().to_string();
                self.repository
                    .update_recipe(
                        &id,
                        &self.form.name,
                        self.form.ingredients(),
                        &self.form.instructions,
                    )
                    .await
                    .map(|()| format!("Recipe {} updated", id))
            }
            FormAction::Delete => {
                let id = self.form.selected_id().unwrap_or_default().to_string();
                self.repository
                    .delete_recipe(&id)
                    .await
                    .map(|()| format!("Recipe {} deleted", id))
            }
        };
        self.loading = false;

        let message = outcome.map_err(|e| self.fail(e))?;
        self.form.clear();
        self.notice = Some(Notice::Info(message.clone()));

        // The write went through; a failed reload must not report it as failed.
        self.loading = true;
        let reloaded = self.repository.get_all_recipes().await;
        self.loading = false;
        match reloaded {
            Ok(recipes) => self.recipes = recipes,
            Err(e) => {
                tracing::warn!(error = %e, "List reload after {:?} failed", action);
                self.notice = Some(Notice::Warning(format!(
                    "{}, but the list could not be reloaded: {}",
                    message, e
                )));
            }
        }
        Ok(())
    }

    pub async fn create(&mut self) -> Result<(), SurfaceError> {
        self.submit(FormAction::Create).await
    }

    pub async fn update(&mut self) -> Result<(), SurfaceError> {
        self.submit(FormAction::Update).await
    }

    pub async fn delete(&mut self) -> Result<(), SurfaceError> {
        self.submit(FormAction::Delete).await
    }

    fn fail(&mut self, error: RepositoryError) -> SurfaceError {
        tracing::warn!(error = %error, "Recipe management action failed");
        self.notice = Some(Notice::Error(error.to_string()));
        SurfaceError::Repository(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_list_editing() {
        let mut form = RecipeForm::default();
        form.add_ingredient();
        form.add_ingredient();
        form.add_ingredient();
        assert!(form.set_ingredient(0, "harina"));
        assert!(form.set_ingredient(1, "huevo"));
        assert!(form.set_ingredient(2, "azúcar"));
        assert!(!form.set_ingredient(3, "sal"));

        assert_eq!(form.remove_ingredient(1).as_deref(), Some("huevo"));
        assert_eq!(form.ingredients(), ["harina", "azúcar"]);
        assert_eq!(form.remove_ingredient(5), None);
    }

    #[test]
    fn test_actions_follow_mode() {
        let mut form = RecipeForm::default();
        assert_eq!(form.available_actions(), [FormAction::Create]);

        let recipe = Recipe {
            id: "r1".to_string(),
            name: "Tarta".to_string(),
            ingredients: vec!["harina".to_string()],
            category: "Postres".to_string(),
            instructions: "Hornear".to_string(),
            image_url: String::new(),
        };
        form.load(&recipe);
        assert_eq!(form.selected_id(), Some("r1"));
        assert_eq!(
            form.available_actions(),
            [FormAction::Update, FormAction::Delete]
        );

        form.clear();
        assert_eq!(form.mode(), &FormMode::Idle);
        assert!(form.name.is_empty());
        assert!(form.ingredients().is_empty());
    }

    #[test]
    fn test_draft_drops_empty_image() {
        let mut form = RecipeForm {
            name: "Tarta".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_draft().image_url, None);
        form.image_url = "https://x/t.jpg".to_string();
        assert_eq!(form.to_draft().image_url.as_deref(), Some("https://x/t.jpg"));
    }
}
