// ABOUTME: Ingredient token normalization for matching and indexing
// ABOUTME: Lowercases, strips measurements and punctuation, collapses whitespace, singularizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"));
static MEASUREMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+/\d+|\d+\.\d+|\d+").expect("valid measurement regex"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

/// Canonicalize a free-text ingredient token.
///
/// Lowercases, drops parenthetical segments and embedded numbers or
/// fractions, replaces punctuation with spaces, collapses whitespace, and
/// strips one trailing plural "s" when that is safe (not for words ending
/// in "ss", not for very short words). No semantic synonym resolution
/// happens here. Pure; returns an empty string for input that reduces to
/// nothing.
#[must_use]
pub fn normalize(token: &str) -> String {
    let lowered = token.trim().to_lowercase();
    let stripped = PARENTHETICAL.replace_all(&lowered, "");
    let stripped = MEASUREMENTS.replace_all(&stripped, "");
    let stripped = NON_WORD.replace_all(&stripped, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_plural(&collapsed)
}

/// Normalize a sequence of tokens into a deduplicated, sorted set.
///
/// Empties produced by normalization are dropped, so the result may be
/// smaller than the input (possibly empty).
#[must_use]
pub fn normalize_set<S: AsRef<str>>(tokens: &[S]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

// Trailing-"s" heuristic only; "glass"/"molasses" style words keep their
// ending, as do tokens of three characters or fewer.
fn strip_plural(name: &str) -> String {
    if name.len() > 3 && name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Bell   Pepper "), "bell pepper");
    }

    #[test]
    fn strips_measurements_and_parentheticals() {
        assert_eq!(normalize("2 cups flour (sifted)"), "cup flour");
        assert_eq!(normalize("1/2 onion"), "onion");
        assert_eq!(normalize("1.5 kg potatoes"), "kg potatoe");
    }

    #[test]
    fn plural_heuristic_is_conservative() {
        assert_eq!(normalize("eggs"), "egg");
        assert_eq!(normalize("green beans"), "green bean");
        assert_eq!(normalize("molasses"), "molasses");
        assert_eq!(normalize("gas"), "gas");
    }

    #[test]
    fn empty_and_symbol_only_input_reduces_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ***  "), "");
    }

    #[test]
    fn normalize_set_dedupes_and_sorts() {
        let set = normalize_set(&["Flour", "flour ", "Eggs", ""]);
        let tokens: Vec<_> = set.iter().cloned().collect();
        assert_eq!(tokens, vec!["egg".to_string(), "flour".to_string()]);
    }
}
