// ABOUTME: Quantity string parsing and formatting for ingredient amounts
// ABOUTME: Handles integers, decimals, fractions, mixed numbers, and non-numeric pass-through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common culinary fractions checked when formatting a scaled amount.
/// Ordered ascending; matching is tolerance-based against the fractional
/// remainder of the value.
const COMMON_FRACTIONS: [(f64, &str); 7] = [
    (0.125, "1/8"),
    (0.25, "1/4"),
    (1.0 / 3.0, "1/3"),
    (0.5, "1/2"),
    (2.0 / 3.0, "2/3"),
    (0.75, "3/4"),
    (0.875, "7/8"),
];

// Values this close to a whole number render without a fractional part.
const INTEGER_EPSILON: f64 = 1e-9;

/// A parsed ingredient quantity.
///
/// Amount strings in a recipe are either numeric ("2", "1.5", "1/2",
/// "1 1/2") or explicitly non-numeric ("to taste", ""). The non-numeric
/// case is a first-class value, not an error: it keeps the original text
/// and is passed through unscaled by the serving scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    /// A quantity that can be scaled.
    Numeric(f64),
    /// Free text that cannot be scaled; the raw string is preserved.
    NonNumeric(String),
}

impl Amount {
    /// Parse a raw amount string.
    ///
    /// Recognizes integers, decimals, simple fractions, and mixed numbers.
    /// Anything else (including fractions with a zero denominator) becomes
    /// [`Amount::NonNumeric`] carrying the original text. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::NonNumeric(raw.to_string());
        }

        // Mixed number, e.g. "1 1/2"
        if let Some((whole, fraction)) = trimmed.split_once(' ') {
            if let (Ok(whole), Some(fraction)) =
                (whole.trim().parse::<f64>(), parse_fraction(fraction))
            {
                return Self::Numeric(whole + fraction);
            }
        }

        if let Some(value) = parse_fraction(trimmed) {
            return Self::Numeric(value);
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::Numeric(value);
        }

        tracing::debug!(amount = raw, "amount is not numeric, will pass through unscaled");
        Self::NonNumeric(raw.to_string())
    }

    /// Numeric value, if this amount has one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::NonNumeric(_) => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::NonNumeric(raw) => write!(f, "{raw}"),
        }
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Render a numeric amount as cooks write it.
///
/// Whole numbers render bare ("2"). Otherwise the fractional remainder
/// (the value with its integer part removed) is compared against the
/// common culinary fractions; within `fraction_tolerance` it renders as a
/// fraction or mixed number ("1/4", "2 1/4"). Everything else falls back
/// to one decimal place.
#[must_use]
pub fn format_amount(value: f64, fraction_tolerance: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() < INTEGER_EPSILON {
        return format!("{}", nearest as i64);
    }

    let whole = value.trunc() as i64;
    let remainder = value - value.trunc();
    for (fraction, label) in COMMON_FRACTIONS {
        if (remainder - fraction).abs() < fraction_tolerance {
            return if whole == 0 {
                (*label).to_string()
            } else {
                format!("{whole} {label}")
            };
        }
    }

    format!("{value:.1}")
}
