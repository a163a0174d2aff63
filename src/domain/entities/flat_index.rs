//! Brute-force exact nearest-neighbor index over squared L2 distance.
//!
//! Vectors are stored contiguously in insertion order, so a vector's position
//! in the index is the position of its document in the [`DocumentStore`].
//!
//! [`DocumentStore`]: crate::domain::entities::document_store::DocumentStore

use crate::domain::error::DomainError;
use serde::Serialize;

/// One search hit: ordinal position and squared L2 distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex {
    /// Fixed by the first vector; 0 while the index is empty.
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh index from a full batch. The first vector fixes the
    /// dimension; every other vector must match it.
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self, DomainError> {
        let mut index = Self::new();
        if let Some(first) = vectors.first() {
            index.data.reserve(first.len() * vectors.len());
        }
        for vector in vectors {
            index.add(vector)?;
        }
        Ok(index)
    }

    /// Rehydrates an index from its raw row-major buffer.
    pub fn from_raw(dimension: usize, data: Vec<f32>) -> Result<Self, DomainError> {
        if dimension == 0 {
            if !data.is_empty() {
                return Err(DomainError::InvalidInput(
                    "zero dimension with non-empty vector data".into(),
                ));
            }
            return Ok(Self::new());
        }
        if data.len() % dimension != 0 {
            return Err(DomainError::InvalidInput(format!(
                "{} floats is not a whole number of {dimension}-d vectors",
                data.len()
            )));
        }
        Ok(Self { dimension, data })
    }

    /// Appends one vector and returns its position.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize, DomainError> {
        if vector.is_empty() {
            return Err(DomainError::InvalidInput(
                "cannot index a zero-length vector".into(),
            ));
        }
        if self.dimension == 0 {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.data.extend_from_slice(vector);
        Ok(self.len() - 1)
    }

    /// Returns up to `k` nearest vectors, ascending by distance. Ties keep
    /// insertion order. An empty index yields an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, DomainError> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<Neighbor> = self
            .vectors()
            .enumerate()
            .map(|(position, stored)| Neighbor {
                position,
                distance: squared_l2(query, stored),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);
        Ok(hits)
    }

    pub fn vectors(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimension.max(1))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn raw(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
