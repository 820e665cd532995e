// ABOUTME: Error taxonomy for the matching and serving-adjustment engine
// ABOUTME: Defines EngineError variants and the EngineResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use thiserror::Error;

/// Errors surfaced by the recommendation and scaling engine.
///
/// All variants are local and synchronous: they are returned to the
/// immediate caller and never retried internally. A malformed ingredient
/// amount is deliberately absent from this taxonomy: an amount string
/// that fails to parse is passed through unscaled (see [`crate::amount`]),
/// logged at debug level, and never raised as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A match was requested with zero usable ingredient tokens after
    /// normalization.
    #[error("query contains no usable ingredient tokens")]
    EmptyQuery,

    /// A serving adjustment was requested for fewer than one serving, or
    /// the recipe itself declares a base serving count of zero.
    #[error("invalid serving count: {0}")]
    InvalidServingCount(u32),

    /// An index build or rebuild was attempted over an empty corpus. On a
    /// rebuild the previous index stays in service.
    #[error("cannot build vector index from an empty recipe corpus")]
    EmptyCorpus,

    /// No recipe with the given identifier exists in the current corpus.
    #[error("recipe {0} not found in corpus")]
    RecipeNotFound(u64),
}

/// Result alias used across the engine surface.
pub type EngineResult<T> = Result<T, EngineError>;
