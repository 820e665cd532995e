// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Recipe builders and a small mixed-cuisine corpus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use pantry_match::{Difficulty, IngredientLine, Nutrition, Recipe};

/// Build a recipe from (name, amount, unit) ingredient triples.
pub fn recipe(id: u64, title: &str, servings: u32, ingredients: &[(&str, &str, &str)]) -> Recipe {
    let lines = ingredients
        .iter()
        .map(|(name, amount, unit)| IngredientLine::new(*name, *amount, *unit))
        .collect();
    Recipe::new(id, title, servings).with_ingredients(lines)
}

/// Small corpus with distinct cuisines, difficulties, tags, and ratings,
/// enough to exercise scoring, filtering, and tie-breaking.
pub fn sample_corpus() -> Vec<Recipe> {
    vec![
        recipe(
            1,
            "Classic Pancakes",
            4,
            &[("Flour", "2", "cups"), ("Egg", "1", ""), ("Milk", "1 1/2", "cups")],
        )
        .with_cuisine("American")
        .with_difficulty(Difficulty::Easy)
        .with_cooking_time(20)
        .with_nutrition(Nutrition {
            calories: 800.0,
            protein_g: 24.0,
            carbs_g: 120.0,
            fat_g: 20.0,
        })
        .with_tag("Vegetarian")
        .with_rating(4.2, 31),
        recipe(
            2,
            "Vegan Flatbread",
            2,
            &[("Flour", "3", "cups"), ("Olive Oil", "2", "tbsp"), ("Salt", "to taste", "")],
        )
        .with_cuisine("Mediterranean")
        .with_difficulty(Difficulty::Medium)
        .with_cooking_time(45)
        .with_nutrition(Nutrition {
            calories: 600.0,
            protein_g: 14.0,
            carbs_g: 100.0,
            fat_g: 12.0,
        })
        .with_tag("Vegan")
        .with_tag("Vegetarian")
        .with_rating(4.7, 12),
        recipe(
            3,
            "Egg Fried Rice",
            2,
            &[("Rice", "2", "cups"), ("Egg", "2", ""), ("Soy Sauce", "1", "tbsp")],
        )
        .with_cuisine("Chinese")
        .with_difficulty(Difficulty::Easy)
        .with_cooking_time(15)
        .with_nutrition(Nutrition {
            calories: 550.0,
            protein_g: 18.0,
            carbs_g: 80.0,
            fat_g: 14.0,
        })
        .with_rating(3.9, 58),
        recipe(
            4,
            "Slow Lamb Stew",
            6,
            &[("Lamb", "1.5", "lbs"), ("Carrot", "3", ""), ("Onion", "1", "")],
        )
        .with_cuisine("French")
        .with_difficulty(Difficulty::Hard)
        .with_cooking_time(150)
        .with_nutrition(Nutrition {
            calories: 1800.0,
            protein_g: 130.0,
            carbs_g: 60.0,
            fat_g: 90.0,
        })
        .with_rating(4.9, 7),
    ]
}
