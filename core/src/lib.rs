//! Content-based song recommender core.
//!
//! Pipeline: catalog normalization → TF-IDF lexical index → fuzzy query
//! resolution → cosine ranking, orchestrated by [`recommend::Recommender`].
//! Everything is built once at startup and read-only afterwards; a catalog
//! refresh means rebuilding from scratch.

pub mod catalog;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod rank;
pub mod recommend;
pub mod tokenizer;

/// Column id in the frozen vector space.
pub type TermId = u32;
/// Stable 0-based row id assigned at catalog load.
pub type ItemId = u32;

pub use catalog::{Catalog, CatalogItem, RawRecord};
pub use error::CatalogError;
pub use fuzzy::{FuzzyResolver, ResolvedQuery};
pub use index::{LexicalIndex, TermVector};
pub use recommend::{Outcome, RecommendStatus, Recommendation, Recommender};
