use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown for recipes without an `image_url`.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// A recipe as the application sees it.
///
/// `id` is empty until the store assigns one. `image_url` is empty when the
/// stored document has none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub category: String,
    pub instructions: String,
    pub image_url: String,
}

impl Recipe {
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        validate(&self.name, &self.ingredients, &self.instructions).is_ok()
    }

    /// One-line summary, e.g. "Tarta - 2 ingredientes".
    pub fn short_description(&self) -> String {
        format!("{} - {} ingredientes", self.name, self.ingredients.len())
    }

    pub fn image_or_placeholder(&self) -> &str {
        if self.image_url.is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.image_url
        }
    }
}

/// Input for creating a recipe. Not yet persisted, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl RecipeDraft {
    pub fn validate(&self) -> Result<(), InvalidField> {
        validate(&self.name, &self.ingredients, &self.instructions)
    }
}

/// The first field that made a recipe invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidField {
    Name,
    Ingredients,
    Instructions,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvalidField::Name => "name cannot be empty",
            InvalidField::Ingredients => "at least one ingredient is required",
            InvalidField::Instructions => "instructions cannot be empty",
        };
        f.write_str(message)
    }
}

/// Name and instructions must be non-blank and there must be at least one
/// ingredient entry.
pub fn validate(name: &str, ingredients: &[String], instructions: &str) -> Result<(), InvalidField> {
    if name.trim().is_empty() {
        return Err(InvalidField::Name);
    }
    if ingredients.is_empty() {
        return Err(InvalidField::Ingredients);
    }
    if instructions.trim().is_empty() {
        return Err(InvalidField::Instructions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarta() -> Recipe {
        Recipe {
            id: String::new(),
            name: "Tarta".to_string(),
            ingredients: vec!["harina".to_string(), "huevo".to_string()],
            category: "Postres".to_string(),
            instructions: "Mezclar y hornear".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_valid_recipe() {
        let recipe = tarta();
        assert!(recipe.is_valid());
        assert!(!recipe.is_persisted());
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let recipe = Recipe {
            name: "   ".to_string(),
            ..tarta()
        };
        assert_eq!(
            validate(&recipe.name, &recipe.ingredients, &recipe.instructions),
            Err(InvalidField::Name)
        );
    }

    #[test]
    fn test_no_ingredients_is_invalid() {
        let recipe = Recipe {
            ingredients: vec![],
            ..tarta()
        };
        assert!(!recipe.is_valid());
    }

    #[test]
    fn test_blank_instructions_is_invalid() {
        let draft = RecipeDraft {
            name: "Tarta".to_string(),
            ingredients: vec!["harina".to_string()],
            instructions: "\n\t".to_string(),
            category: "Postres".to_string(),
            image_url: None,
        };
        assert_eq!(draft.validate(), Err(InvalidField::Instructions));
    }

    #[test]
    fn test_short_description() {
        assert_eq!(tarta().short_description(), "Tarta - 2 ingredientes");
    }

    #[test]
    fn test_placeholder_image() {
        let mut recipe = tarta();
        assert_eq!(recipe.image_or_placeholder(), PLACEHOLDER_IMAGE_URL);

        recipe.image_url = "https://example.com/tarta.jpg".to_string();
        assert_eq!(recipe.image_or_placeholder(), "https://example.com/tarta.jpg");
    }
}
