// ABOUTME: Serving-size adjustment for ingredient amounts and nutrition totals
// ABOUTME: Scales numeric quantities by target/original and passes non-numeric amounts through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use crate::amount::{format_amount, Amount};
use crate::errors::{EngineError, EngineResult};
use crate::models::{Nutrition, Recipe, ScaledIngredient, ServingAdjustment};

/// Rescale a recipe's ingredient amounts and nutrition to a target
/// serving count.
///
/// Numeric amounts are multiplied by `target_servings / recipe.servings`
/// and reformatted (see [`format_amount`] for the fraction rendering
/// rules, controlled by `fraction_tolerance`). Non-numeric amounts such
/// as "to taste" are passed through verbatim. Nutrition fields scale by
/// the same multiplier and round to the nearest whole number.
///
/// Pure: identical inputs produce identical outputs, and nothing is
/// cached, since target serving counts are high-cardinality and the
/// work is cheap.
///
/// # Errors
///
/// Returns [`EngineError::InvalidServingCount`] when `target_servings`
/// is zero, or when the recipe itself declares zero base servings (the
/// multiplier would be undefined).
pub fn scale_recipe(
    recipe: &Recipe,
    target_servings: u32,
    fraction_tolerance: f64,
) -> EngineResult<ServingAdjustment> {
    if target_servings < 1 {
        return Err(EngineError::InvalidServingCount(target_servings));
    }
    if recipe.servings < 1 {
        return Err(EngineError::InvalidServingCount(recipe.servings));
    }

    let multiplier = f64::from(target_servings) / f64::from(recipe.servings);

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|line| {
            let amount = match Amount::parse(&line.amount) {
                Amount::Numeric(value) => format_amount(value * multiplier, fraction_tolerance),
                Amount::NonNumeric(_) => line.amount.clone(),
            };
            ScaledIngredient {
                name: line.name.clone(),
                amount,
                unit: line.unit.clone(),
                original_amount: line.amount.clone(),
            }
        })
        .collect();

    Ok(ServingAdjustment {
        recipe_id: recipe.id,
        original_servings: recipe.servings,
        target_servings,
        multiplier,
        ingredients,
        nutrition: scale_nutrition(&recipe.nutrition, multiplier),
    })
}

fn scale_nutrition(nutrition: &Nutrition, multiplier: f64) -> Nutrition {
    Nutrition {
        calories: (nutrition.calories * multiplier).round(),
        protein_g: (nutrition.protein_g * multiplier).round(),
        carbs_g: (nutrition.carbs_g * multiplier).round(),
        fat_g: (nutrition.fat_g * multiplier).round(),
    }
}
