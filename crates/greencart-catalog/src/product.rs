//! Catalog records supplied by the external catalog/category index

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use greencart_core::{DietFlag, Footprint};

/// Feature vector used for similarity scoring.
pub type FeatureVec = SmallVec<[f64; 8]>;

/// One row of the external product catalog.
///
/// The feature vector is owned by the catalog collaborator; when a
/// catalog ships without one, [`default_feature_vector`] derives a usable
/// stand-in from the record's own attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub dietary_flags: BTreeSet<DietFlag>,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[serde(default = "default_health")]
    pub health_score: f64,
    #[serde(default)]
    pub features: FeatureVec,
}

fn default_health() -> f64 {
    0.5
}

impl CatalogRecord {
    #[inline]
    pub fn is_vegetarian(&self) -> bool {
        self.dietary_flags.contains(&DietFlag::Vegetarian)
            || self.dietary_flags.contains(&DietFlag::Vegan)
    }
}

/// Derives a feature vector from a record's attributes and its emissions
/// factor: normalized emissions, normalized price, health score,
/// vegetarian flag, allergen count.
pub fn default_feature_vector(record: &CatalogRecord, footprint: Footprint) -> FeatureVec {
    let mut features = FeatureVec::new();
    features.push(footprint.mean() / 100.0);
    features.push(record.price / 20.0);
    features.push(record.health_score);
    features.push(if record.is_vegetarian() { 1.0 } else { 0.0 });
    features.push(record.allergens.len() as f64 / 5.0);
    features
}
