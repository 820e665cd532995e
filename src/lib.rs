// ABOUTME: Library entry point for the pantry-match recommendation engine
// ABOUTME: Exposes ingredient matching, result caching, and serving-size scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

#![deny(unsafe_code)]

//! # Pantry Match
//!
//! An in-process recipe recommendation engine: given a free-form list of
//! ingredients a user has on hand, it ranks a fixed recipe corpus by
//! relevance, memoizes repeated queries, and rescales a chosen recipe's
//! quantities and nutrition to any serving count.
//!
//! ## Features
//!
//! - **TF-IDF matching**: recipes are ranked by cosine similarity over
//!   their normalized ingredient names, blended with query coverage
//! - **Deterministic ordering**: ties break by rating, then recipe id
//! - **Result caching**: TTL + LRU memoization keyed by canonical query
//! - **Serving scaling**: fraction-aware amount parsing and formatting,
//!   with non-numeric amounts ("to taste") passed through untouched
//!
//! ## Architecture
//!
//! Leaf-first: [`normalize`] and [`amount`] have no internal
//! dependencies; [`index`] builds the vector space over normalized
//! names; [`matcher`] scores and ranks against it; [`cache`] memoizes
//! matcher output; [`scaling`] adjusts quantities independently of the
//! match path. [`engine::RecipeEngine`] ties the pieces together behind
//! an explicit lifecycle with no ambient globals, so tests construct
//! isolated instances.
//!
//! This crate performs no I/O: the corpus arrives as in-memory records
//! from the caller, and HTTP, persistence, and auth belong to the
//! surrounding service.
//!
//! ## Example
//!
//! ```rust
//! use pantry_match::{EngineConfig, IngredientLine, Recipe, RecipeEngine, RecipeFilters};
//!
//! # fn main() -> pantry_match::EngineResult<()> {
//! let corpus = vec![Recipe::new(1, "Pancakes", 4)
//!     .with_ingredient(IngredientLine::parse("2 cups flour"))
//!     .with_ingredient(IngredientLine::parse("1 egg"))];
//! let engine = RecipeEngine::new(EngineConfig::default(), corpus)?;
//!
//! let results = engine.recommend(
//!     &["flour".to_string()],
//!     &RecipeFilters::default(),
//!     None,
//! )?;
//! assert_eq!(results[0].recipe_id, 1);
//!
//! let doubled = engine.scale_servings(1, 8)?;
//! assert_eq!(doubled.ingredients[0].amount, "4");
//! # Ok(())
//! # }
//! ```

/// Quantity string parsing and formatting
pub mod amount;
/// TTL + LRU result cache
pub mod cache;
/// Engine configuration and environment overrides
pub mod config;
/// Service object tying index, matcher, cache, and scaler together
pub mod engine;
/// Error taxonomy
pub mod errors;
/// TF-IDF vector index over ingredient names
pub mod index;
/// Scoring, filtering, and ranking
pub mod matcher;
/// Recipe, ingredient, filter, and result models
pub mod models;
/// Ingredient token normalization
pub mod normalize;
/// Serving-size adjustment
pub mod scaling;

pub use amount::{format_amount, Amount};
pub use cache::{CacheStats, ResultCache};
pub use config::EngineConfig;
pub use engine::{canonical_query_key, RecipeEngine};
pub use errors::{EngineError, EngineResult};
pub use index::VectorIndex;
pub use matcher::find_matches;
pub use models::{
    CookingTimeBucket, Difficulty, IngredientLine, MatchResult, Nutrition, RatingAggregate,
    Recipe, RecipeFilters, ScaledIngredient, ServingAdjustment,
};
pub use normalize::{normalize, normalize_set};
pub use scaling::scale_recipe;
