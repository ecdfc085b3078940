use crate::catalog::{Catalog, CatalogItem};
use crate::fuzzy::FuzzyResolver;
use crate::index::LexicalIndex;
use crate::rank::rank;
use serde::Serialize;

/// Default number of recommendations per query.
pub const DEFAULT_K: usize = 10;

/// Locally-recovered query failures, surfaced as a status flag rather than
/// an error. Load-time failures live in [`crate::error::CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendStatus {
    EmptyQuery,
    NoMatch,
}

/// One ranked result, carrying the display fields the caller renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub track_name: String,
    pub artist_name: String,
    pub album: String,
    pub formatted_duration: String,
    pub spotify_link: String,
    pub score: f32,
}

/// The structured result of one `recommend` call. Every failure path
/// returns one of these; nothing panics or propagates out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    pub items: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RecommendStatus>,
}

/// Owns the normalized catalog, the frozen index, and the fuzzy resolver.
/// Immutable after construction; share behind an `Arc` for concurrent
/// readers. Each call allocates its own query vector and buffers.
pub struct Recommender {
    catalog: Catalog,
    index: LexicalIndex,
    resolver: FuzzyResolver,
}

fn to_recommendation(item: &CatalogItem, score: f32) -> Recommendation {
    Recommendation {
        track_name: item.track_name.clone(),
        artist_name: item.artist_name.clone(),
        album: item.album.clone(),
        formatted_duration: item.formatted_duration.clone(),
        spotify_link: item.spotify_link.clone(),
        score,
    }
}

impl Recommender {
    /// Build the index and resolver over an already-normalized catalog.
    pub fn new(catalog: Catalog) -> Self {
        let index = LexicalIndex::build(catalog.items());
        let resolver = FuzzyResolver::new(catalog.items());
        Self {
            catalog,
            index,
            resolver,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve, transform, and rank one query.
    ///
    /// Blank input yields `EMPTY_QUERY`; a query nothing matches yields
    /// `NO_MATCH`. A query that resolves but transforms to the zero vector
    /// is not an error: every item ties at similarity 0 and the first `k`
    /// items come back in `item_id` order.
    pub fn recommend(&self, query: &str, k: usize) -> Outcome {
        if query.trim().is_empty() {
            return Outcome {
                error: Some(RecommendStatus::EmptyQuery),
                ..Default::default()
            };
        }
        let resolved = match self.resolver.resolve(query) {
            Some(r) => r,
            None => {
                tracing::debug!(query, "no fuzzy match above cutoff");
                return Outcome {
                    error: Some(RecommendStatus::NoMatch),
                    ..Default::default()
                };
            }
        };
        tracing::debug!(expanded = %resolved.expanded, hint = ?resolved.hint, "query resolved");
        let vector = self.index.transform(&resolved.expanded);
        let ranked = rank(&vector, &self.index, k);
        let items = ranked
            .into_iter()
            .filter_map(|(item_id, score)| {
                self.catalog
                    .get(item_id)
                    .map(|item| to_recommendation(item, score))
            })
            .collect();
        Outcome {
            items,
            hint: resolved.hint,
            error: None,
        }
    }
}
