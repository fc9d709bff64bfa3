//! GreenCart Behavior - Swap acceptance prediction
//!
//! Maps a proposed swap's feature vector to the probability that a shopper
//! actually adopts it. Two interchangeable strategies sit behind one
//! `predict` contract:
//! - a trained classifier supplied by an external collaborator
//!   (`AcceptanceClassifier` trait object; `LogisticAcceptance` is a
//!   serde-loadable implementation of that runtime contract)
//! - a deterministic heuristic fallback used when no classifier is
//!   available
//!
//! Callers never need to know which strategy served a request; both clamp
//! to [0, 1].

pub mod features;
pub mod heuristic;
pub mod logistic;
pub mod model;

pub use features::{MessageFraming, SwapFeatures, UserContext};
pub use heuristic::HeuristicAcceptance;
pub use logistic::LogisticAcceptance;
pub use model::{AcceptanceClassifier, AcceptanceModel, AcceptanceRecord};
