// ABOUTME: Integration tests for serving-size adjustment
// ABOUTME: Covers scaling law round-trips, fraction formatting, pass-through, and nutrition rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use anyhow::Result;
use pantry_match::{scale_recipe, Amount, EngineError, Nutrition};

mod common;
use common::recipe;

const TOLERANCE: f64 = 0.02;

#[test]
fn doubling_servings_doubles_amounts_and_nutrition() -> Result<()> {
    let recipe = recipe(
        1,
        "Pancakes",
        4,
        &[("Flour", "2", "cups"), ("Egg", "1", ""), ("Milk", "1 1/2", "cups")],
    )
    .with_nutrition(Nutrition {
        calories: 800.0,
        protein_g: 24.0,
        carbs_g: 120.0,
        fat_g: 20.0,
    });

    let adjusted = scale_recipe(&recipe, 8, TOLERANCE)?;

    assert_eq!(adjusted.original_servings, 4);
    assert_eq!(adjusted.target_servings, 8);
    assert!((adjusted.multiplier - 2.0).abs() < f64::EPSILON);
    assert_eq!(adjusted.ingredients[0].amount, "4");
    assert_eq!(adjusted.ingredients[1].amount, "2");
    assert_eq!(adjusted.ingredients[2].amount, "3");
    assert_eq!(adjusted.nutrition.calories, 1600.0);
    assert_eq!(adjusted.nutrition.protein_g, 48.0);
    assert_eq!(adjusted.nutrition.carbs_g, 240.0);
    assert_eq!(adjusted.nutrition.fat_g, 40.0);
    Ok(())
}

#[test]
fn mixed_number_scales_to_mixed_fraction() -> Result<()> {
    // "1 1/2" from 2 to 3 servings is 2.25: the remainder 0.25 renders as
    // a quarter, so the whole amount reads "2 1/4".
    let recipe = recipe(1, "Dough", 2, &[("Sugar", "1 1/2", "cups")]);
    let adjusted = scale_recipe(&recipe, 3, TOLERANCE)?;

    assert_eq!(adjusted.ingredients[0].amount, "2 1/4");
    assert_eq!(adjusted.ingredients[0].original_amount, "1 1/2");
    Ok(())
}

#[test]
fn non_numeric_amounts_pass_through_unchanged() -> Result<()> {
    let recipe = recipe(
        1,
        "Soup",
        2,
        &[("Salt", "to taste", ""), ("Pepper", "", ""), ("Stock", "4", "cups")],
    );
    let adjusted = scale_recipe(&recipe, 6, TOLERANCE)?;

    assert_eq!(adjusted.ingredients[0].amount, "to taste");
    assert_eq!(adjusted.ingredients[1].amount, "");
    assert_eq!(adjusted.ingredients[2].amount, "12");
    Ok(())
}

#[test]
fn target_below_one_is_rejected() {
    let recipe = recipe(1, "Toast", 2, &[("Bread", "2", "slices")]);
    let err = scale_recipe(&recipe, 0, TOLERANCE).unwrap_err();
    assert_eq!(err, EngineError::InvalidServingCount(0));
}

#[test]
fn zero_base_servings_is_rejected() {
    let recipe = recipe(1, "Broken", 0, &[("Bread", "2", "slices")]);
    let err = scale_recipe(&recipe, 4, TOLERANCE).unwrap_err();
    assert_eq!(err, EngineError::InvalidServingCount(0));
}

#[test]
fn identical_inputs_produce_identical_outputs() -> Result<()> {
    let recipe = recipe(1, "Stew", 4, &[("Carrot", "3", ""), ("Salt", "to taste", "")]);
    let a = scale_recipe(&recipe, 7, TOLERANCE)?;
    let b = scale_recipe(&recipe, 7, TOLERANCE)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn scaling_round_trips_within_tolerance() -> Result<()> {
    let amounts = ["2", "1.5", "1/2", "1 1/2", "3/4", "5"];
    let serving_pairs = [(1u32, 2u32), (2, 3), (4, 8), (3, 5), (2, 7)];

    for raw in amounts {
        let original = Amount::parse(raw)
            .as_f64()
            .expect("fixture amounts are numeric");
        for (s0, s1) in serving_pairs {
            let there = recipe(1, "Round Trip", s0, &[("Thing", raw, "")]);
            let scaled = scale_recipe(&there, s1, TOLERANCE)?;

            let back = recipe(1, "Round Trip", s1, &[("Thing", &scaled.ingredients[0].amount, "")]);
            let restored = scale_recipe(&back, s0, TOLERANCE)?;

            let value = Amount::parse(&restored.ingredients[0].amount)
                .as_f64()
                .expect("scaled amounts stay numeric");
            assert!(
                (value - original).abs() < 0.05,
                "{raw} scaled {s0}->{s1}->{s0} became {value}, expected ~{original}"
            );
        }
    }
    Ok(())
}

#[test]
fn nutrition_rounds_to_whole_numbers() -> Result<()> {
    let recipe = recipe(1, "Bowl", 3, &[("Rice", "1", "cup")]).with_nutrition(Nutrition {
        calories: 500.0,
        protein_g: 10.0,
        carbs_g: 70.0,
        fat_g: 8.0,
    });
    let adjusted = scale_recipe(&recipe, 2, TOLERANCE)?;

    // 500 * 2/3 = 333.33 -> 333; 10 * 2/3 = 6.67 -> 7
    assert_eq!(adjusted.nutrition.calories, 333.0);
    assert_eq!(adjusted.nutrition.protein_g, 7.0);
    assert_eq!(adjusted.nutrition.carbs_g, 47.0);
    assert_eq!(adjusted.nutrition.fat_g, 5.0);
    Ok(())
}
