//! Exact cosine-similarity index over unit vectors.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use vault_domain::RankedItem;

/// One indexed record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub vector: Vec<f32>,
}

/// Brute-force index: every search scores every entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry; returns `false` (and drops it) on a dimension mismatch
    pub fn insert(&mut self, entry: IndexEntry) -> bool {
        if entry.vector.len() != self.dimensions {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Whether every stored vector has the declared dimensions
    pub fn is_consistent(&self) -> bool {
        self.entries.iter().all(|e| e.vector.len() == self.dimensions)
    }

    /// Top `k` entries by cosine similarity, most similar first
    pub fn search(&self, query: &[f32], k: usize) -> Vec<RankedItem> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, dot(query, &e.vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(k)
            .enumerate()
            .map(|(position, (i, score))| {
                let entry = &self.entries[i];
                let mut item = RankedItem::new(position, entry.content.clone()).with_score(score);
                for (key, value) in &entry.metadata {
                    item = item.with_metadata(key.clone(), value.clone());
                }
                item
            })
            .collect()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
