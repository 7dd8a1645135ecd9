//! TF-IDF vectorizer over movie feature documents.
//!
//! Tokens are lowercased runs of two or more word characters with English
//! stop words removed. Weights use raw term counts and smoothed IDF,
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalised.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::stop_words::is_stop_word;

/// Sparse weighted term vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_map(weights: HashMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> = weights.into_iter().collect();
        entries.sort_unstable_by_key(|(index, _)| *index);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// True when no vocabulary term occurs in the document
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_index, a_weight) = self.entries[i];
            let (b_index, b_weight) = other.entries[j];

            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in self.entries.iter_mut() {
                *weight /= norm;
            }
        }
    }
}

/// Splits text into lowercase word tokens, skipping stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Vocabulary and IDF weights fitted on one corpus
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and document frequencies of `documents`.
    ///
    /// Term indices follow the sorted vocabulary, so the same corpus always
    /// produces the same layout.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for document in documents {
            let unique: BTreeSet<String> = tokenize(document.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());

        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Weights one document against the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the empty vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut weights: HashMap<usize, f64> = HashMap::new();

        for token in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *weights.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, weight) in weights.iter_mut() {
            *weight *= self.idf[*index];
        }

        let mut vector = SparseVector::from_map(weights);
        vector.normalize();
        vector
    }

    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let vectorizer = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|document| vectorizer.transform(document.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }
}
