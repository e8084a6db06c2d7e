//! Normalized content records.
//!
//! These are the clean in-memory shapes the engine, map, and session crates
//! operate on. Raw CMS documents live in `thriftmap-content` and are
//! normalized into these types at the repository boundary; everything here is
//! immutable once loaded for the session lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A second-hand store record.
///
/// `location` is optional: stores missing a coordinate stay in the list view
/// but are excluded from map placement and distance computations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Opaque CMS document id, unique across the collection.
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Short description shown on list cards; also a search target.
    pub card_description: Option<String>,
    pub location: Option<Coordinate>,
    pub formatted_address: Option<String>,
    pub primary_category: Category,
    pub secondary_categories: Vec<Category>,
    pub neighborhood: Neighborhood,
    pub metrics: Option<StoreMetrics>,
    pub website: Option<String>,
    pub maps_url: Option<String>,
}

impl Store {
    /// True if the store carries any category with the given slug,
    /// primary or secondary.
    #[must_use]
    pub fn has_category(&self, slug: &str) -> bool {
        self.primary_category.slug == slug
            || self.secondary_categories.iter().any(|c| c.slug == slug)
    }

    /// Rating with missing values treated as 0, per the sort contract.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.metrics.as_ref().and_then(|m| m.rating).unwrap_or(0.0)
    }

    /// Review count with missing values treated as 0.
    #[must_use]
    pub fn review_count_or_zero(&self) -> u32 {
        self.metrics
            .as_ref()
            .and_then(|m| m.review_count)
            .unwrap_or(0)
    }
}

/// Aggregate metrics imported from the places data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreMetrics {
    /// 0.0–5.0 star rating.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// 1–4 price tier.
    pub price_level: Option<u8>,
}

/// An authored category document (distinct from the inferred [`crate::StoreKind`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Slug of the owning city; cities are a grouping root only.
    pub city_slug: String,
}

/// City document: grouping root plus the map camera defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub state: Option<String>,
    pub center: Option<Coordinate>,
    pub default_zoom: Option<f64>,
}

/// A blog post record; the repository returns these newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub excerpt: Option<String>,
    pub category_slugs: Vec<String>,
    pub featured_store_slugs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(slug: &str) -> Category {
        Category {
            id: format!("cat-{slug}"),
            name: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn store_with_categories(primary: &str, secondary: &[&str]) -> Store {
        Store {
            id: "store-1".to_string(),
            name: "Test Store".to_string(),
            slug: "test-store".to_string(),
            card_description: None,
            location: None,
            formatted_address: None,
            primary_category: category(primary),
            secondary_categories: secondary.iter().map(|s| category(s)).collect(),
            neighborhood: Neighborhood {
                id: "n-1".to_string(),
                name: "SoHo".to_string(),
                slug: "soho".to_string(),
                region: Region {
                    id: "r-1".to_string(),
                    name: "Manhattan".to_string(),
                    slug: "manhattan".to_string(),
                    city_slug: "new-york".to_string(),
                },
            },
            metrics: None,
            website: None,
            maps_url: None,
        }
    }

    #[test]
    fn has_category_matches_primary() {
        let store = store_with_categories("vintage", &[]);
        assert!(store.has_category("vintage"));
        assert!(!store.has_category("thrift"));
    }

    #[test]
    fn has_category_matches_secondary() {
        let store = store_with_categories("vintage", &["thrift", "books"]);
        assert!(store.has_category("books"));
    }

    #[test]
    fn missing_metrics_default_to_zero() {
        let store = store_with_categories("vintage", &[]);
        assert_eq!(store.rating_or_zero(), 0.0);
        assert_eq!(store.review_count_or_zero(), 0);
    }

    #[test]
    fn store_round_trips_through_json() {
        let mut store = store_with_categories("vintage", &["thrift"]);
        store.metrics = Some(StoreMetrics {
            rating: Some(4.5),
            review_count: Some(120),
            price_level: Some(2),
        });
        let json = serde_json::to_string(&store).unwrap();
        let back: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, store.id);
        assert_eq!(back.metrics.unwrap().review_count, Some(120));
    }
}
