use anyhow::{Context, Result};
use cocina_core::{RecipeDraft, RecipeRepository};

struct SeedRecipe {
    name: &'static str,
    category: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static str,
    image_url: Option<&'static str>,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Tortilla de patatas",
        category: "Platos principales",
        ingredients: &["4 patatas", "6 huevos", "1 cebolla", "aceite de oliva", "sal"],
        instructions: "1. Pelar y cortar las patatas y la cebolla en láminas finas.
2. Freír a fuego medio en abundante aceite hasta que estén tiernas.
3. Batir los huevos con sal y mezclar con las patatas escurridas.
4. Cuajar en una sartén por ambos lados.",
        image_url: None,
    },
    SeedRecipe {
        name: "Gazpacho andaluz",
        category: "Entrantes",
        ingredients: &[
            "1 kg de tomates maduros",
            "1 pimiento verde",
            "1 pepino",
            "1 diente de ajo",
            "pan del día anterior",
            "aceite de oliva",
            "vinagre de Jerez",
        ],
        instructions: "1. Trocear las verduras y remojar el pan.
2. Triturar todo con el aceite, el vinagre y sal.
3. Colar y enfriar al menos dos horas antes de servir.",
        image_url: None,
    },
    SeedRecipe {
        name: "Arroz con leche",
        category: "Postres",
        ingredients: &[
            "1 litro de leche",
            "100 g de arroz",
            "100 g de azúcar",
            "1 rama de canela",
            "piel de limón",
        ],
        instructions: "1. Calentar la leche con la canela y la piel de limón.
2. Añadir el arroz y cocer a fuego lento removiendo durante 40 minutos.
3. Incorporar el azúcar, cocer 5 minutos más y espolvorear canela.",
        image_url: None,
    },
    SeedRecipe {
        name: "Tarta de queso",
        category: "Postres",
        ingredients: &[
            "500 g de queso crema",
            "4 huevos",
            "200 ml de nata",
            "150 g de azúcar",
            "1 cucharada de harina",
        ],
        instructions: "1. Precalentar el horno a 200 grados.
2. Mezclar todos los ingredientes hasta obtener una crema lisa.
3. Hornear 45 minutos y dejar enfriar antes de desmoldar.",
        image_url: None,
    },
    SeedRecipe {
        name: "Lentejas estofadas",
        category: "Platos principales",
        ingredients: &[
            "300 g de lentejas",
            "1 chorizo",
            "1 zanahoria",
            "1 patata",
            "1 cebolla",
            "pimentón",
        ],
        instructions: "1. Sofreír la cebolla y la zanahoria picadas.
2. Añadir el pimentón, las lentejas, el chorizo y la patata.
3. Cubrir con agua y cocer 45 minutos a fuego lento.",
        image_url: None,
    },
];

fn draft(recipe: &SeedRecipe) -> RecipeDraft {
    RecipeDraft {
        name: recipe.name.to_string(),
        ingredients: recipe.ingredients.iter().map(|i| i.to_string()).collect(),
        instructions: recipe.instructions.to_string(),
        category: recipe.category.to_string(),
        image_url: recipe.image_url.map(str::to_string),
    }
}

/// Create the sample recipes unless the store already holds some.
pub async fn seed(repository: &RecipeRepository) -> Result<()> {
    let existing = repository
        .get_all_recipes()
        .await
        .context("Failed to list existing recipes")?;

    if !existing.is_empty() {
        println!(
            "Store already has {} recipes, skipping seed",
            existing.len()
        );
        return Ok(());
    }

    println!("Creating {} sample recipes...", SAMPLE_RECIPES.len());

    for recipe in SAMPLE_RECIPES {
        let id = repository
            .create_recipe(&draft(recipe))
            .await
            .with_context(|| format!("Failed to create recipe {}", recipe.name))?;
        println!("  Created: {} ({})", recipe.name, id);
    }

    println!("Seed complete!");

    Ok(())
}
