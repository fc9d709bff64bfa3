//! Shared test fixtures: a small synthetic grocery catalog with known
//! emissions factors, prices, and dietary tags.

use std::collections::BTreeSet;
use std::sync::Arc;

use greencart_catalog::{default_feature_vector, CandidateGenerator, CatalogIndex, CatalogRecord, FeatureVec};
use greencart_core::{Basket, DietFlag, Footprint, FootprintStore, LineItem};

struct Fixture {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    emissions: f64,
    variance: f64,
    price: f64,
    vegetarian: bool,
    allergens: &'static [&'static str],
    health: f64,
}

const FIXTURES: &[Fixture] = &[
    Fixture { id: "beef_001", name: "Ground Beef", category: "Beef", emissions: 60.0, variance: 225.0, price: 8.99, vegetarian: false, allergens: &[], health: 0.4 },
    Fixture { id: "beef_002", name: "Beef Steak", category: "Beef", emissions: 65.0, variance: 240.0, price: 12.99, vegetarian: false, allergens: &[], health: 0.4 },
    Fixture { id: "chicken_001", name: "Chicken Breast", category: "Chicken", emissions: 6.9, variance: 4.0, price: 6.99, vegetarian: false, allergens: &[], health: 0.7 },
    Fixture { id: "chicken_002", name: "Ground Chicken", category: "Chicken", emissions: 7.2, variance: 4.0, price: 5.99, vegetarian: false, allergens: &[], health: 0.7 },
    Fixture { id: "tofu_001", name: "Firm Tofu", category: "Tofu", emissions: 2.0, variance: 0.25, price: 3.99, vegetarian: true, allergens: &["soy"], health: 0.8 },
    Fixture { id: "tofu_002", name: "Extra Firm Tofu", category: "Tofu", emissions: 2.1, variance: 0.25, price: 4.49, vegetarian: true, allergens: &["soy"], health: 0.8 },
    Fixture { id: "tempeh_001", name: "Tempeh", category: "Tempeh", emissions: 2.3, variance: 0.3, price: 4.99, vegetarian: true, allergens: &["soy"], health: 0.85 },
    Fixture { id: "beans_001", name: "Black Beans", category: "Legumes", emissions: 0.9, variance: 0.04, price: 1.99, vegetarian: true, allergens: &[], health: 0.9 },
    Fixture { id: "milk_001", name: "Whole Milk", category: "Milk", emissions: 3.2, variance: 0.64, price: 4.99, vegetarian: true, allergens: &["dairy"], health: 0.6 },
    Fixture { id: "milk_002", name: "2% Milk", category: "Milk", emissions: 3.0, variance: 0.64, price: 4.79, vegetarian: true, allergens: &["dairy"], health: 0.6 },
    Fixture { id: "oat_milk_001", name: "Oat Milk", category: "Plant Milk", emissions: 0.9, variance: 0.04, price: 4.49, vegetarian: true, allergens: &[], health: 0.7 },
    Fixture { id: "almond_milk_001", name: "Almond Milk", category: "Plant Milk", emissions: 0.7, variance: 0.04, price: 4.99, vegetarian: true, allergens: &["nuts"], health: 0.7 },
    Fixture { id: "soy_milk_001", name: "Soy Milk", category: "Plant Milk", emissions: 0.8, variance: 0.04, price: 3.99, vegetarian: true, allergens: &["soy"], health: 0.75 },
    Fixture { id: "pork_001", name: "Pork Chops", category: "Pork", emissions: 12.1, variance: 9.0, price: 7.99, vegetarian: false, allergens: &[], health: 0.5 },
    Fixture { id: "fish_001", name: "Salmon Fillet", category: "Fish", emissions: 11.9, variance: 9.0, price: 14.99, vegetarian: false, allergens: &["fish"], health: 0.85 },
    Fixture { id: "fish_002", name: "Tuna", category: "Fish", emissions: 6.1, variance: 4.0, price: 9.99, vegetarian: false, allergens: &["fish"], health: 0.85 },
];

/// Footprint store covering every fixture product plus category-level
/// entries and the conservative default fallback.
pub fn fixture_store() -> Arc<FootprintStore> {
    let mut entries: Vec<(String, Footprint)> = FIXTURES
        .iter()
        .map(|f| (f.id.to_string(), Footprint::of(f.emissions, f.variance)))
        .collect();
    entries.push(("Beef".to_string(), Footprint::of(27.0, 25.0)));
    entries.push(("Vegetables".to_string(), Footprint::of(0.4, 0.01)));

    Arc::new(
        FootprintStore::from_entries(entries, Some(Footprint::DEFAULT_FALLBACK))
            .expect("fixture store is valid"),
    )
}

/// Catalog index over the fixture products, with the protein and milk
/// substitution groups.
pub fn fixture_catalog(store: &FootprintStore) -> Arc<CatalogIndex> {
    let records: Vec<CatalogRecord> = FIXTURES
        .iter()
        .map(|f| {
            let mut flags = BTreeSet::new();
            if f.vegetarian {
                flags.insert(DietFlag::Vegetarian);
            }
            let mut record = CatalogRecord {
                id: f.id.to_string(),
                name: f.name.to_string(),
                brand: None,
                category: f.category.to_string(),
                price: f.price,
                dietary_flags: flags,
                allergens: f.allergens.iter().map(|a| a.to_string()).collect(),
                health_score: f.health,
                features: FeatureVec::new(),
            };
            let (footprint, _) = store
                .resolve(&record.id, &record.category)
                .expect("fixture footprint resolves");
            record.features = default_feature_vector(&record, footprint);
            record
        })
        .collect();

    Arc::new(
        CatalogIndex::new(records)
            .with_substitution_group(["Beef", "Chicken", "Pork", "Fish", "Tofu", "Tempeh", "Legumes"])
            .with_substitution_group(["Milk", "Plant Milk"]),
    )
}

/// Candidate generator wired to the fixture store and catalog.
pub fn fixture_generator() -> CandidateGenerator {
    let store = fixture_store();
    let catalog = fixture_catalog(&store);
    CandidateGenerator::new(catalog, store)
}

/// Builds a fully enriched basket from (product id, quantity) pairs,
/// joining price, category, tags, health, and emissions from the fixture
/// data.
pub fn fixture_basket(items: &[(&str, f64)]) -> Basket {
    let store = fixture_store();
    let catalog = fixture_catalog(&store);

    let items = items
        .iter()
        .map(|(id, quantity)| {
            let record = catalog.product(id).expect("fixture product exists");
            let (footprint, _) = store
                .resolve(&record.id, &record.category)
                .expect("fixture footprint resolves");
            let mut item = LineItem::new(record.id.clone(), *quantity, record.price);
            item.category = record.category.clone();
            item.brand = record.brand.clone();
            item.dietary_flags = record.dietary_flags.clone();
            item.allergens = record.allergens.clone();
            item.emissions_mean = Some(footprint.mean());
            item.emissions_variance = Some(footprint.variance());
            item.health_score = record.health_score;
            item
        })
        .collect();

    Basket::from_items(items)
}
