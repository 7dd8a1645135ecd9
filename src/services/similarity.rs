use super::tfidf::SparseVector;

/// Cosine similarity of two sparse vectors; 0.0 when either is all zeros
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Dense, symmetric pairwise similarity matrix.
///
/// Row and column `i` correspond to position `i` of the corpus the vectors
/// were built from. A degenerate (all-zero) vector has similarity 0.0 with
/// everything, itself included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes every pair once and mirrors it across the diagonal
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            if vectors[i].is_empty() {
                continue;
            }
            values[i * size + i] = 1.0;

            for j in (i + 1)..size {
                let similarity = cosine_similarity(&vectors[i], &vectors[j]);
                values[i * size + j] = similarity;
                values[j * size + i] = similarity;
            }
        }

        Self { size, values }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.size && column < self.size {
            Some(self.values[row * self.size + column])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.size {
            Some(&self.values[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }

    /// Column-wise mean of the given rows. Out-of-range rows are ignored;
    /// returns `None` when no row is usable.
    pub fn mean_of_rows(&self, rows: &[usize]) -> Option<Vec<f64>> {
        let rows: Vec<&[f64]> = rows.iter().filter_map(|&r| self.row(r)).collect();
        if rows.is_empty() {
            return None;
        }

        let mut mean = vec![0.0; self.size];
        for row in &rows {
            for (acc, value) in mean.iter_mut().zip(row.iter()) {
                *acc += value;
            }
        }

        let count = rows.len() as f64;
        for value in mean.iter_mut() {
            *value /= count;
        }

        Some(mean)
    }
}
