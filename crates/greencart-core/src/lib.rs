//! GreenCart Core - Domain types and emissions math for basket analysis
//!
//! This crate provides the foundations shared by the GreenCart workspace:
//! - Basket and line-item types with dietary/allergen tagging
//! - The read-only footprint store (emissions factors with uncertainty)
//! - Emissions aggregation with variance propagation
//! - Swap candidate and shopper constraint types
//! - The error taxonomy

pub mod basket;
pub mod candidate;
pub mod constraints;
pub mod emissions;
pub mod error;
pub mod footprint;

pub use basket::{Basket, DietFlag, LineItem};
pub use candidate::SwapCandidate;
pub use constraints::ShopperConstraints;
pub use emissions::{aggregate, EmissionsEstimate, ItemEmissions};
pub use error::{GreenCartError, Result};
pub use footprint::{Footprint, FootprintSource, FootprintStore};
