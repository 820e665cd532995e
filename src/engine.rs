// ABOUTME: Engine service object owning the corpus snapshot, vector index, and result cache
// ABOUTME: Provides recommend, rebuild, serving adjustment, and cache invalidation with atomic snapshot swaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::cache::{CacheStats, ResultCache};
use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::index::VectorIndex;
use crate::matcher::find_matches;
use crate::models::{MatchResult, Recipe, RecipeFilters, ServingAdjustment};
use crate::normalize::normalize_set;
use crate::scaling::scale_recipe;

/// A corpus and the index built from it, swapped as one unit so readers
/// never see recipes from one generation scored against another's index.
#[derive(Debug)]
struct CorpusSnapshot {
    recipes: Vec<Recipe>,
    index: VectorIndex,
}

/// The recommendation engine.
///
/// Owns the two pieces of shared state this core has, the corpus
/// snapshot (with its vector index) and the result cache, behind an
/// explicit lifecycle: construct with a corpus, [`recommend`] and
/// [`scale_servings`] concurrently from many threads, [`rebuild`] when
/// the corpus changes, [`invalidate_cache`] when cached rankings go
/// stale. Tests construct isolated instances; there are no process-wide
/// globals.
///
/// [`recommend`]: RecipeEngine::recommend
/// [`scale_servings`]: RecipeEngine::scale_servings
/// [`rebuild`]: RecipeEngine::rebuild
/// [`invalidate_cache`]: RecipeEngine::invalidate_cache
#[derive(Debug)]
pub struct RecipeEngine {
    config: EngineConfig,
    snapshot: RwLock<Arc<CorpusSnapshot>>,
    cache: ResultCache<Vec<MatchResult>>,
}

impl RecipeEngine {
    /// Build an engine over an initial corpus.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCorpus`] when `recipes` is empty;
    /// an engine with nothing to recommend is a configuration mistake,
    /// not a valid state.
    pub fn new(config: EngineConfig, recipes: Vec<Recipe>) -> EngineResult<Self> {
        let snapshot = Self::build_snapshot(recipes)?;
        let cache = ResultCache::new(config.max_cache_entries, config.ttl_seconds);
        Ok(Self {
            config,
            snapshot: RwLock::new(Arc::new(snapshot)),
            cache,
        })
    }

    fn build_snapshot(recipes: Vec<Recipe>) -> EngineResult<CorpusSnapshot> {
        if recipes.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }
        let index = VectorIndex::build(&recipes);
        Ok(CorpusSnapshot { recipes, index })
    }

    // Readers take the lock only long enough to clone the Arc; the
    // snapshot itself is immutable.
    fn snapshot(&self) -> Arc<CorpusSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rank recipes against a free-form ingredient list.
    ///
    /// Tokens are normalized and deduplicated, the query is canonicalized
    /// into a cache key (two calls with the same tokens in any order and
    /// the same filters share an entry), and on a cache miss the matcher
    /// runs against the current snapshot. `top_k` falls back to the
    /// configured default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyQuery`] when no usable tokens remain
    /// after normalization.
    pub fn recommend(
        &self,
        ingredients: &[String],
        filters: &RecipeFilters,
        top_k: Option<usize>,
    ) -> EngineResult<Vec<MatchResult>> {
        let tokens = normalize_set(ingredients);
        if tokens.is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let top_k = top_k.unwrap_or(self.config.top_k_default);
        let snapshot = self.snapshot();
        let key = canonical_query_key(&tokens, filters, top_k);

        self.cache.get_or_compute(&key, || {
            find_matches(&snapshot.recipes, &snapshot.index, &tokens, filters, top_k)
        })
    }

    /// Replace the corpus, rebuilding the index off to the side and
    /// publishing it with a single swap. On failure the previous snapshot
    /// stays in service (stale-but-valid beats no index) and the cache is
    /// left untouched; on success every cached ranking is invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCorpus`] when `recipes` is empty.
    pub fn rebuild(&self, recipes: Vec<Recipe>) -> EngineResult<()> {
        let next = match Self::build_snapshot(recipes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "corpus rebuild rejected, previous index stays in service");
                return Err(err);
            }
        };

        let recipes = next.recipes.len();
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
        self.cache.invalidate_all();
        tracing::info!(recipes, "published rebuilt corpus snapshot");
        Ok(())
    }

    /// Rescale a recipe's amounts and nutrition to a target serving
    /// count. Looked up fresh from the current corpus and computed on
    /// demand; serving adjustments are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecipeNotFound`] for an unknown id and
    /// [`EngineError::InvalidServingCount`] for a target below one.
    pub fn scale_servings(
        &self,
        recipe_id: u64,
        target_servings: u32,
    ) -> EngineResult<ServingAdjustment> {
        let snapshot = self.snapshot();
        let recipe = snapshot
            .recipes
            .iter()
            .find(|recipe| recipe.id == recipe_id)
            .ok_or(EngineError::RecipeNotFound(recipe_id))?;
        scale_recipe(recipe, target_servings, self.config.fraction_tolerance)
    }

    /// Fetch a recipe from the current snapshot, for hydrating match
    /// results at the request layer.
    #[must_use]
    pub fn recipe(&self, recipe_id: u64) -> Option<Recipe> {
        self.snapshot()
            .recipes
            .iter()
            .find(|recipe| recipe.id == recipe_id)
            .cloned()
    }

    /// Number of recipes in the current snapshot.
    #[must_use]
    pub fn corpus_len(&self) -> usize {
        self.snapshot().recipes.len()
    }

    /// Drop every cached ranking.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Hit/miss/eviction counters for the result cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Canonical cache key for a query: sorted normalized tokens, the
/// filters' canonical fragment, and the result count. Queries that differ
/// only in token order or case collapse to the same key.
#[must_use]
pub fn canonical_query_key(
    tokens: &BTreeSet<String>,
    filters: &RecipeFilters,
    top_k: usize,
) -> String {
    let joined: Vec<&str> = tokens.iter().map(String::as_str).collect();
    format!(
        "q:{}|{}|k:{top_k}",
        joined.join(","),
        filters.canonical_fragment()
    )
}
