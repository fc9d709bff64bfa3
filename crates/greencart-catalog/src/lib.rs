//! GreenCart Catalog - Product index and substitute search
//!
//! This crate turns an externally supplied product catalog into the swap
//! candidates the optimizer explores:
//! - `CatalogRecord` / `CatalogIndex`: id and category lookup with
//!   configurable substitution groups
//! - Cosine similarity over catalog feature vectors
//! - `CandidateGenerator`: constraint filtering, ranking, and a
//!   concurrency-safe memoization cache

pub mod generator;
pub mod index;
pub mod product;
pub mod similarity;

pub use generator::CandidateGenerator;
pub use index::CatalogIndex;
pub use product::{default_feature_vector, CatalogRecord, FeatureVec};
pub use similarity::cosine_similarity;
