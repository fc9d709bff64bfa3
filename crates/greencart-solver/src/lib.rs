//! GreenCart Solver - Constrained beam search over basket substitutions
//!
//! This crate provides the basket optimizer:
//! - Multi-objective scoring J(B') = α·E + β·C + γ·D + δ·(1 − H)
//! - Beam state and bounded beam container
//! - The search loop with basket-level hard constraints, parallel
//!   successor scoring, and deadline-based interruption between positions
//! - Position-wise swap reconstruction and application

pub mod beam;
pub mod deadline;
pub mod objective;
pub mod optimizer;
pub mod state;


pub use beam::Beam;
pub use deadline::Deadline;
pub use objective::ObjectiveWeights;
pub use optimizer::{apply_swaps, AppliedSwap, BasketOptimizer, OptimizationResult};
pub use state::BasketState;
