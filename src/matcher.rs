// ABOUTME: Recipe matching and ranking against a normalized ingredient query
// ABOUTME: Blends cosine similarity with ingredient coverage, filters, and tie-breaks deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::errors::{EngineError, EngineResult};
use crate::index::VectorIndex;
use crate::models::{MatchResult, Recipe, RecipeFilters};

/// Weight of the TF-IDF cosine component in the blended score.
pub const SIMILARITY_WEIGHT: f64 = 0.7;
/// Weight of the ingredient-coverage component in the blended score.
pub const COVERAGE_WEIGHT: f64 = 0.3;

/// Score and rank the corpus against a normalized query token set.
///
/// The score blends cosine similarity over the TF-IDF index with the
/// fraction of query tokens present among the recipe's ingredient names;
/// both components live in [0, 1] and a blend of zero means no overlap at
/// all, so zero-score candidates are dropped rather than returned.
/// Filters are applied before truncation to `top_k`. Ordering is fully
/// deterministic: score descending, then rating average descending, then
/// recipe id ascending.
///
/// Candidate scoring fans out across the rayon thread pool; the function
/// itself is pure with respect to the corpus snapshot and index.
///
/// # Errors
///
/// Returns [`EngineError::EmptyQuery`] when `query_tokens` is empty.
pub fn find_matches(
    recipes: &[Recipe],
    index: &VectorIndex,
    query_tokens: &BTreeSet<String>,
    filters: &RecipeFilters,
    top_k: usize,
) -> EngineResult<Vec<MatchResult>> {
    if query_tokens.is_empty() {
        return Err(EngineError::EmptyQuery);
    }

    let query_vector = index.vectorize_query(query_tokens);
    let query_len = query_tokens.len() as f64;

    let mut candidates: Vec<(usize, f64, Vec<String>)> = recipes
        .par_iter()
        .enumerate()
        .filter(|(_, recipe)| filters.matches(recipe))
        .filter_map(|(idx, recipe)| {
            let cosine = index.cosine(&query_vector, idx);
            let names = recipe.normalized_ingredient_names();
            let matched: Vec<String> = query_tokens
                .iter()
                .filter(|token| names.contains(*token))
                .cloned()
                .collect();
            let coverage = matched.len() as f64 / query_len;
            let score = SIMILARITY_WEIGHT * cosine + COVERAGE_WEIGHT * coverage;
            (score > 0.0).then_some((idx, score, matched))
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| {
                recipes[b.0]
                    .rating
                    .average
                    .total_cmp(&recipes[a.0].rating.average)
            })
            .then_with(|| recipes[a.0].id.cmp(&recipes[b.0].id))
    });
    candidates.truncate(top_k);

    Ok(candidates
        .into_iter()
        .enumerate()
        .map(|(position, (idx, score, matched))| MatchResult {
            recipe_id: recipes[idx].id,
            score,
            matched_ingredients: matched,
            rank: position + 1,
        })
        .collect())
}
