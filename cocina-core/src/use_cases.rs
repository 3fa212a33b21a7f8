use crate::error::RepositoryError;
use crate::recipe::Recipe;
use crate::repository::RecipeRepository;

/// Fetches the full recipe list. A seam for future filtering or sorting.
#[derive(Debug, Clone)]
pub struct GetRecipesUseCase {
    repository: RecipeRepository,
}

impl GetRecipesUseCase {
    pub fn new(repository: RecipeRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Recipe>, RepositoryError> {
        self.repository.get_all_recipes().await
    }
}
