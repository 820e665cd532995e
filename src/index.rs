// ABOUTME: TF-IDF vector index over the recipe corpus's ingredient names
// ABOUTME: Builds sparse L2-normalized recipe vectors and scores queries by cosine similarity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use std::collections::{BTreeSet, HashMap};

use crate::models::Recipe;
use crate::normalize::normalize;

/// Sparse vector as (term id, weight) pairs, sorted by term id.
pub type SparseVector = Vec<(usize, f64)>;

/// Term-frequency / inverse-document-frequency index over a corpus
/// snapshot.
///
/// Each recipe's document is the multiset of its normalized ingredient
/// names; terms are whole names ("bell pepper" is one term, not two).
/// Recipe vectors are L2-normalized at build time so that scoring a query
/// is a single sparse dot product yielding cosine similarity in [0, 1].
///
/// The index is immutable once built. A corpus change produces a whole
/// new index which the engine publishes with one atomic swap; readers
/// never observe a partially rebuilt state.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    recipe_vectors: Vec<SparseVector>,
}

impl VectorIndex {
    /// Build an index from a corpus snapshot.
    ///
    /// Deterministic: the same recipes in the same order produce the same
    /// vocabulary, weights, and vectors. Recipes whose ingredient lists
    /// normalize to nothing get an empty vector and can never match.
    #[must_use]
    pub fn build(recipes: &[Recipe]) -> Self {
        // Term counts per recipe, in corpus order.
        let documents: Vec<HashMap<String, usize>> = recipes
            .iter()
            .map(|recipe| {
                let mut counts = HashMap::new();
                for line in &recipe.ingredients {
                    let term = normalize(&line.name);
                    if !term.is_empty() {
                        *counts.entry(term).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        // Vocabulary ids in first-encounter order; document frequencies
        // counted per distinct term per document.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for counts in &documents {
            let mut terms: Vec<&String> = counts.keys().collect();
            terms.sort();
            for term in terms {
                if let Some(&id) = vocabulary.get(term) {
                    document_frequency[id] += 1;
                } else {
                    vocabulary.insert(term.clone(), vocabulary.len());
                    document_frequency.push(1);
                }
            }
        }

        // Smoothed IDF, the same form sklearn's TfidfVectorizer defaults
        // to: ln((1 + n) / (1 + df)) + 1. Always positive, so every
        // in-vocabulary term carries weight.
        let corpus_size = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + corpus_size) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let recipe_vectors: Vec<SparseVector> = documents
            .iter()
            .map(|counts| {
                let mut vector: SparseVector = counts
                    .iter()
                    .map(|(term, &count)| {
                        let id = vocabulary[term];
                        (id, count as f64 * idf[id])
                    })
                    .collect();
                vector.sort_by_key(|&(id, _)| id);
                l2_normalize(vector)
            })
            .collect();

        tracing::info!(
            recipes = recipes.len(),
            vocabulary = vocabulary.len(),
            "built ingredient vector index"
        );

        Self {
            vocabulary,
            idf,
            recipe_vectors,
        }
    }

    /// Map a normalized query token set into the index's vector space.
    ///
    /// Out-of-vocabulary tokens contribute nothing; they cannot match any
    /// recipe but do not error. An all-unknown query yields the zero
    /// vector, which scores 0 against everything.
    #[must_use]
    pub fn vectorize_query(&self, tokens: &BTreeSet<String>) -> SparseVector {
        let mut vector: SparseVector = tokens
            .iter()
            .filter_map(|token| {
                self.vocabulary
                    .get(token)
                    .map(|&id| (id, self.idf[id]))
            })
            .collect();
        vector.sort_by_key(|&(id, _)| id);
        l2_normalize(vector)
    }

    /// Cosine similarity between a query vector and the recipe at
    /// `recipe_idx` (corpus order). Both sides are unit-length, so this
    /// is a sparse dot product clamped into [0, 1] against float noise.
    #[must_use]
    pub fn cosine(&self, query: &SparseVector, recipe_idx: usize) -> f64 {
        let Some(recipe_vector) = self.recipe_vectors.get(recipe_idx) else {
            return 0.0;
        };
        dot(query, recipe_vector).clamp(0.0, 1.0)
    }

    /// Number of indexed recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipe_vectors.len()
    }

    /// Whether the index holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipe_vectors.is_empty()
    }

    /// Number of distinct normalized ingredient names across the corpus.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

fn l2_normalize(mut vector: SparseVector) -> SparseVector {
    let norm = vector
        .iter()
        .map(|&(_, weight)| weight * weight)
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for entry in &mut vector {
            entry.1 /= norm;
        }
    }
    vector
}

// Merge-join over two id-sorted sparse vectors.
fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
