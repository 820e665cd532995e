// ABOUTME: Data models for recipes, ingredient lines, filters, and match results
// ABOUTME: Defines Recipe, IngredientLine, RecipeFilters, MatchResult, and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use crate::normalize::normalize;

/// Recipe difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Simple recipes, basic techniques
    Easy,
    /// Moderate complexity, some techniques required
    #[default]
    Medium,
    /// Complex recipes, advanced techniques
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Cooking-time bucket used as an optional match filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingTimeBucket {
    /// Under 30 minutes
    Quick,
    /// 30 to 60 minutes inclusive
    Moderate,
    /// Over 60 minutes
    Long,
}

impl CookingTimeBucket {
    /// Whether a cooking time in minutes falls inside this bucket.
    #[must_use]
    pub const fn contains(&self, cooking_time_mins: u32) -> bool {
        match self {
            Self::Quick => cooking_time_mins < 30,
            Self::Moderate => cooking_time_mins >= 30 && cooking_time_mins <= 60,
            Self::Long => cooking_time_mins > 60,
        }
    }
}

impl fmt::Display for CookingTimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quick => write!(f, "quick"),
            Self::Moderate => write!(f, "moderate"),
            Self::Long => write!(f, "long"),
        }
    }
}

/// Nutrition totals for a recipe at its base serving count.
///
/// Values are totals for the whole recipe as authored, not per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Nutrition {
    /// Total calories
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

/// Aggregated user rating for a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingAggregate {
    /// Mean rating across all votes
    pub average: f64,
    /// Number of votes behind the mean
    pub count: u32,
}

// Ordered patterns for structuring a raw ingredient line. First match
// wins; mixed numbers must be tried before plain amounts so "1 1/2 cups
// sugar" does not split after the leading "1".
static MIXED_UNIT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+ \d+/\d+)\s+([a-zA-Z]+)\s+(.+)$").expect("valid mixed amount pattern")
});
static AMOUNT_UNIT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+/\d+|\d+\.\d+|\d+)\s+([a-zA-Z]+)\s+(.+)$").expect("valid amount pattern")
});
static AMOUNT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+ \d+/\d+|\d+/\d+|\d+\.\d+|\d+)\s+(.+)$").expect("valid bare amount pattern")
});

/// One line of a recipe's ingredient list, as authored.
///
/// The `amount` field keeps the raw string ("1 1/2", "2", "to taste");
/// parsing to a number happens lazily in the scaler so that non-numeric
/// amounts survive round trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Ingredient name, free text
    pub name: String,
    /// Quantity as authored; may be non-numeric
    pub amount: String,
    /// Measurement unit, free text; may be empty
    pub unit: String,
}

impl IngredientLine {
    /// Create a line from already-structured parts.
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }

    /// Structure a raw free-text line like "2 cups flour" or "1/2 onion".
    ///
    /// This is the single boundary where loosely-shaped input becomes the
    /// internal representation; the matcher and scaler never see raw
    /// lines. A line that starts with no recognizable quantity is treated
    /// as a whole-name line with an implicit amount of "1".
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if let Some(caps) = MIXED_UNIT_NAME
            .captures(&lowered)
            .or_else(|| AMOUNT_UNIT_NAME.captures(&lowered))
        {
            return Self::new(title_case(&caps[3]), caps[1].to_string(), caps[2].to_string());
        }
        if let Some(caps) = AMOUNT_NAME.captures(&lowered) {
            return Self::new(title_case(&caps[2]), caps[1].to_string(), String::new());
        }

        Self::new(title_case(trimmed), "1", String::new())
    }
}

// "olive oil" -> "Olive Oil"
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A recipe as supplied by the corpus collaborator.
///
/// Immutable within a session; the engine only reads it. Nutrition values
/// are totals for `servings` servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: u64,
    /// Recipe title
    pub title: String,
    /// Recipe description
    pub description: String,
    /// Cuisine label, e.g. "Italian"
    pub cuisine: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Cooking time in minutes
    pub cooking_time_mins: u32,
    /// Base serving count the nutrition and amounts are authored for
    pub servings: u32,
    /// Nutrition totals at the base serving count
    pub nutrition: Nutrition,
    /// Dietary tags, e.g. "Vegan", "Gluten-Free"
    pub dietary_tags: Vec<String>,
    /// Ordered ingredient lines
    pub ingredients: Vec<IngredientLine>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Aggregated user rating
    pub rating: RatingAggregate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a recipe with the required identity fields; everything else
    /// starts empty and is filled in with the `with_*` builders.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, servings: u32) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            cuisine: String::new(),
            difficulty: Difficulty::default(),
            cooking_time_mins: 0,
            servings,
            nutrition: Nutrition::default(),
            dietary_tags: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            rating: RatingAggregate::default(),
            created_at: Utc::now(),
        }
    }

    /// Add a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the cuisine label
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    /// Set the difficulty tier
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the cooking time
    #[must_use]
    pub const fn with_cooking_time(mut self, mins: u32) -> Self {
        self.cooking_time_mins = mins;
        self
    }

    /// Set the nutrition totals
    #[must_use]
    pub fn with_nutrition(mut self, nutrition: Nutrition) -> Self {
        self.nutrition = nutrition;
        self
    }

    /// Add a dietary tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.dietary_tags.push(tag.into());
        self
    }

    /// Add an ingredient line
    #[must_use]
    pub fn with_ingredient(mut self, line: IngredientLine) -> Self {
        self.ingredients.push(line);
        self
    }

    /// Add multiple ingredient lines
    #[must_use]
    pub fn with_ingredients(mut self, lines: Vec<IngredientLine>) -> Self {
        self.ingredients.extend(lines);
        self
    }

    /// Add an instruction step
    #[must_use]
    pub fn with_instruction(mut self, step: impl Into<String>) -> Self {
        self.instructions.push(step.into());
        self
    }

    /// Set the rating aggregate
    #[must_use]
    pub fn with_rating(mut self, average: f64, count: u32) -> Self {
        self.rating = RatingAggregate { average, count };
        self
    }

    /// Normalized ingredient-name set used for match explanations and
    /// coverage scoring. Empties produced by normalization are dropped.
    #[must_use]
    pub fn normalized_ingredient_names(&self) -> BTreeSet<String> {
        self.ingredients
            .iter()
            .map(|line| normalize(&line.name))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Optional filter criteria for a match call.
///
/// Every field defaults to "no constraint"; a default-constructed filter
/// set passes every recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecipeFilters {
    /// Candidate must carry ALL of these tags (case-insensitive)
    pub dietary_tags: Vec<String>,
    /// Exact difficulty match if set
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive cuisine match if set
    pub cuisine: Option<String>,
    /// Cooking-time bucket if set
    pub cooking_time: Option<CookingTimeBucket>,
}

impl RecipeFilters {
    /// Whether a recipe satisfies every specified criterion.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let dietary_ok = self.dietary_tags.iter().all(|wanted| {
            recipe
                .dietary_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(wanted))
        });
        let difficulty_ok = self
            .difficulty
            .is_none_or(|wanted| recipe.difficulty == wanted);
        let cuisine_ok = self
            .cuisine
            .as_ref()
            .is_none_or(|wanted| recipe.cuisine.eq_ignore_ascii_case(wanted));
        let time_ok = self
            .cooking_time
            .is_none_or(|bucket| bucket.contains(recipe.cooking_time_mins));

        dietary_ok && difficulty_ok && cuisine_ok && time_ok
    }

    /// Canonical fragment for cache keys: lowercased, sorted, and
    /// independent of the order criteria were supplied in.
    #[must_use]
    pub fn canonical_fragment(&self) -> String {
        let mut tags: Vec<String> = self
            .dietary_tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();

        let difficulty = self
            .difficulty
            .map_or_else(|| "-".to_string(), |d| d.to_string().to_lowercase());
        let cuisine = self
            .cuisine
            .as_ref()
            .map_or_else(|| "-".to_string(), |c| c.trim().to_lowercase());
        let time = self
            .cooking_time
            .map_or_else(|| "-".to_string(), |b| b.to_string());

        format!(
            "diet:{}|difficulty:{}|cuisine:{}|time:{}",
            tags.join(","),
            difficulty,
            cuisine,
            time
        )
    }
}

/// One ranked match returned by the engine.
///
/// Carries the recipe identifier rather than the recipe itself; the
/// request layer hydrates full records from the corpus. This keeps cached
/// values small and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the matched recipe
    pub recipe_id: u64,
    /// Blended similarity score in [0, 1]
    pub score: f64,
    /// Query tokens found among the recipe's normalized ingredient names
    pub matched_ingredients: Vec<String>,
    /// 1-based position in the ranked result list
    pub rank: usize,
}

/// One ingredient line after serving adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    /// Ingredient name, unchanged
    pub name: String,
    /// Scaled quantity, or the original text when it was non-numeric
    pub amount: String,
    /// Measurement unit, unchanged
    pub unit: String,
    /// Quantity as originally authored, kept for reference
    pub original_amount: String,
}

/// Result of rescaling a recipe to a target serving count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingAdjustment {
    /// Identifier of the adjusted recipe
    pub recipe_id: u64,
    /// Serving count the recipe was authored for
    pub original_servings: u32,
    /// Requested serving count
    pub target_servings: u32,
    /// target / original
    pub multiplier: f64,
    /// Ingredient lines with scaled amounts
    pub ingredients: Vec<ScaledIngredient>,
    /// Nutrition totals scaled by the multiplier, rounded to whole numbers
    pub nutrition: Nutrition,
}
