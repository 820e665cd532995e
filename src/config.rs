// ABOUTME: Engine configuration with defaults and environment overrides
// ABOUTME: Covers cache TTL, cache capacity, default result count, and fraction tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use anyhow::{Context, Result};
use std::env;

/// Default cache entry lifetime in seconds (one hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;
/// Default cache capacity before LRU eviction kicks in.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;
/// Default number of ranked results returned by a match.
pub const DEFAULT_TOP_K: usize = 20;
/// Default tolerance when matching a scaled amount against a common
/// culinary fraction.
pub const DEFAULT_FRACTION_TOLERANCE: f64 = 0.02;

/// Tunable knobs for the recommendation engine.
///
/// A `ttl_seconds` of zero disables time-based expiry; entries are then
/// only removed by capacity eviction or explicit invalidation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cache entry lifetime in seconds (0 = never expire on time).
    pub ttl_seconds: u64,
    /// Maximum number of cached query results before LRU eviction.
    pub max_cache_entries: usize,
    /// Result count used when a match call does not specify one.
    pub top_k_default: usize,
    /// Tolerance for rendering scaled amounts as common fractions.
    pub fraction_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECS,
            max_cache_entries: DEFAULT_CACHE_MAX_ENTRIES,
            top_k_default: DEFAULT_TOP_K,
            fraction_tolerance: DEFAULT_FRACTION_TOLERANCE,
        }
    }
}

/// Get environment variable with a fallback default.
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `PANTRY_CACHE_TTL_SECS`,
    /// `PANTRY_CACHE_MAX_ENTRIES`, `PANTRY_TOP_K`,
    /// `PANTRY_FRACTION_TOLERANCE`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but does not parse as the
    /// expected numeric type.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ttl_seconds: env_var_or("PANTRY_CACHE_TTL_SECS", &DEFAULT_TTL_SECS.to_string())
                .parse()
                .context("Invalid PANTRY_CACHE_TTL_SECS value")?,
            max_cache_entries: env_var_or(
                "PANTRY_CACHE_MAX_ENTRIES",
                &DEFAULT_CACHE_MAX_ENTRIES.to_string(),
            )
            .parse()
            .context("Invalid PANTRY_CACHE_MAX_ENTRIES value")?,
            top_k_default: env_var_or("PANTRY_TOP_K", &DEFAULT_TOP_K.to_string())
                .parse()
                .context("Invalid PANTRY_TOP_K value")?,
            fraction_tolerance: env_var_or(
                "PANTRY_FRACTION_TOLERANCE",
                &DEFAULT_FRACTION_TOLERANCE.to_string(),
            )
            .parse()
            .context("Invalid PANTRY_FRACTION_TOLERANCE value")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.ttl_seconds, DEFAULT_TTL_SECS);
        assert_eq!(config.max_cache_entries, DEFAULT_CACHE_MAX_ENTRIES);
        assert_eq!(config.top_k_default, DEFAULT_TOP_K);
        assert!((config.fraction_tolerance - DEFAULT_FRACTION_TOLERANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn from_env_overrides_and_rejects_garbage() {
        env::set_var("PANTRY_CACHE_TTL_SECS", "120");
        env::set_var("PANTRY_TOP_K", "5");
        let config = EngineConfig::from_env().expect("valid overrides");
        assert_eq!(config.ttl_seconds, 120);
        assert_eq!(config.top_k_default, 5);
        assert_eq!(config.max_cache_entries, DEFAULT_CACHE_MAX_ENTRIES);

        env::set_var("PANTRY_TOP_K", "not-a-number");
        assert!(EngineConfig::from_env().is_err());

        env::remove_var("PANTRY_CACHE_TTL_SECS");
        env::remove_var("PANTRY_TOP_K");
    }
}
