use crate::catalog::CatalogItem;
use crate::tokenizer::tokenize;
use crate::{ItemId, TermId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct Posting {
    pub item_id: ItemId,
    /// L2-normalized tf-idf weight for this item.
    pub weight: f32,
}

/// Sparse query-side vector keyed by column id. Produced by
/// [`LexicalIndex::transform`]; an empty map is the zero vector.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    weights: HashMap<TermId, f32>,
}

impl TermVector {
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.weights.values().map(|w| w * w).sum::<f32>().sqrt()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f32)> + '_ {
        self.weights.iter().map(|(t, w)| (*t, *w))
    }
}

/// Frozen tf-idf vector space over the catalog's `combined_text`.
///
/// Built once after normalization; the vocabulary, idf table, and postings
/// never change afterwards, so the index is safe to share across readers.
pub struct LexicalIndex {
    dictionary: HashMap<String, TermId>,
    idf: Vec<f32>,
    // postings per term, sorted by item_id
    postings: HashMap<TermId, Vec<Posting>>,
    num_items: u32,
}

impl LexicalIndex {
    /// Build the vector space from the catalog in `item_id` order.
    ///
    /// Term ids are assigned in first-seen order. Idf is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`. Per-item weights are raw term count
    /// times idf, L2-normalized per item.
    pub fn build(items: &[CatalogItem]) -> Self {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut item_terms: Vec<HashMap<TermId, u32>> = Vec::with_capacity(items.len());

        for item in items {
            let mut tf: HashMap<TermId, u32> = HashMap::new();
            for term in tokenize(&item.combined_text) {
                let next = dictionary.len() as TermId;
                let tid = *dictionary.entry(term).or_insert(next);
                if tid as usize == df.len() {
                    df.push(0);
                }
                *tf.entry(tid).or_insert(0) += 1;
            }
            for &tid in tf.keys() {
                df[tid as usize] += 1;
            }
            item_terms.push(tf);
        }

        let n = items.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let mut postings: HashMap<TermId, Vec<Posting>> = HashMap::new();
        for (row, tf) in item_terms.into_iter().enumerate() {
            let mut weights: Vec<(TermId, f32)> = tf
                .into_iter()
                .map(|(tid, count)| (tid, count as f32 * idf[tid as usize]))
                .collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (_, w) in weights.iter_mut() {
                    *w /= norm;
                }
            }
            // rows are visited in item_id order, so each posting list stays
            // sorted by item_id without an extra sort
            for (tid, weight) in weights {
                postings.entry(tid).or_default().push(Posting {
                    item_id: row as ItemId,
                    weight,
                });
            }
        }

        tracing::info!(
            num_items = items.len(),
            num_terms = dictionary.len(),
            "lexical index built"
        );
        Self {
            dictionary,
            idf,
            postings,
            num_items: items.len() as u32,
        }
    }

    /// Map arbitrary text into the frozen vector space. Unknown tokens are
    /// dropped; each kept token weighs its count in `text` times its frozen
    /// idf. Text with no recognized tokens yields the zero vector.
    pub fn transform(&self, text: &str) -> TermVector {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for term in tokenize(text) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        let weights = counts
            .into_iter()
            .map(|(tid, count)| (tid, count as f32 * self.idf[tid as usize]))
            .collect();
        TermVector { weights }
    }

    pub fn postings(&self, term: TermId) -> &[Posting] {
        self.postings.get(&term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_items(&self) -> u32 {
        self.num_items
    }

    pub fn vocab_size(&self) -> usize {
        self.dictionary.len()
    }
}
