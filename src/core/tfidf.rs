use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::core::cosine::{cosine_similarity, l2_normalize};

/// Errors raised while vectorizing a corpus
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TfIdfError {
    #[error("Empty corpus: at least one document is required")]
    EmptyCorpus,

    #[error("Empty vocabulary: documents contain no terms of two or more characters")]
    EmptyVocabulary,
}

/// Tokenize text for TF-IDF vectorization
///
/// Lower-cases, splits on anything that is not alphanumeric or `_`, and drops
/// single-character tokens.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// TF-IDF document vectors fitted on a small corpus
///
/// Raw term counts weighted by smoothed IDF, `ln((1 + n) / (1 + df)) + 1`,
/// with every row scaled to unit length.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    vocabulary: BTreeMap<String, usize>,
    rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    /// Fit the vocabulary and IDF weights on `documents` and vectorize them
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Result<Self, TfIdfError> {
        if documents.is_empty() {
            return Err(TfIdfError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            return Err(TfIdfError::EmptyVocabulary);
        }

        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        // Raw counts and document frequencies
        let mut rows = vec![vec![0.0; vocabulary.len()]; tokenized.len()];
        let mut document_frequency = vec![0usize; vocabulary.len()];
        for (row, tokens) in rows.iter_mut().zip(&tokenized) {
            for token in tokens {
                if let Some(&idx) = vocabulary.get(token) {
                    row[idx] += 1.0;
                }
            }
            for (idx, count) in row.iter().enumerate() {
                if *count > 0.0 {
                    document_frequency[idx] += 1;
                }
            }
        }

        let n = tokenized.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        for row in rows.iter_mut() {
            for (value, weight) in row.iter_mut().zip(&idf) {
                *value *= weight;
            }
            l2_normalize(row);
        }

        Ok(Self { vocabulary, rows })
    }

    /// Number of document rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Normalized vector of document `idx`
    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    /// Cosine similarity between two documents, in [0, 1]
    ///
    /// Out-of-range indices and all-zero rows give 0.
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        match (self.row(a), self.row(b)) {
            (Some(a), Some(b)) => cosine_similarity(a, b).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

/// Fit TF-IDF on the pair `{left, right}` and return their cosine similarity
pub fn pairwise_similarity(left: &str, right: &str) -> Result<f64, TfIdfError> {
    let matrix = TfIdfMatrix::fit_transform(&[left, right])?;
    Ok(matrix.similarity(0, 1))
}
