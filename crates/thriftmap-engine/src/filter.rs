//! Filter/sort pipeline over the loaded store collection.
//!
//! Structural filters combine as AND across the category/neighborhood/region
//! groups and OR within each group; free-text search then narrows the
//! structural result; finally the survivors are stable-sorted by the active
//! sort key.

use serde::{Deserialize, Serialize};
use thriftmap_core::{distance_miles, Coordinate, Store, NYC_CENTER};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending case-insensitive compare on name.
    #[default]
    Alphabetical,
    /// Descending rating, ties broken by descending review count.
    Rating,
    /// Ascending distance from the sort origin; stores without a usable
    /// coordinate sort last, in input order.
    Distance,
}

/// The current filter/search/sort selection.
///
/// Slug vectors keep insertion order (they render as removable chips);
/// insertion is idempotent via [`FilterSpec::add_category`] and friends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub categories: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub regions: Vec<String>,
    pub query: String,
    pub sort: SortKey,
}

impl FilterSpec {
    /// True when any structural selection or a non-empty search query is in
    /// effect; lets the page distinguish "no stores loaded" from "no stores
    /// after filtering".
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || !self.neighborhoods.is_empty()
            || !self.regions.is_empty()
            || !self.query.trim().is_empty()
    }

    pub fn add_category(&mut self, slug: &str) {
        push_unique(&mut self.categories, slug);
    }

    pub fn add_neighborhood(&mut self, slug: &str) {
        push_unique(&mut self.neighborhoods, slug);
    }

    pub fn add_region(&mut self, slug: &str) {
        push_unique(&mut self.regions, slug);
    }

    pub fn remove_category(&mut self, slug: &str) {
        self.categories.retain(|s| s != slug);
    }

    pub fn remove_neighborhood(&mut self, slug: &str) {
        self.neighborhoods.retain(|s| s != slug);
    }

    pub fn remove_region(&mut self, slug: &str) {
        self.regions.retain(|s| s != slug);
    }

    /// Drop every structural selection and the search query; the sort key is
    /// a view preference and survives.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.neighborhoods.clear();
        self.regions.clear();
        self.query.clear();
    }

    /// Structural match: the store must hit ANY selected category AND ANY
    /// selected neighborhood AND ANY selected region; an empty group is
    /// vacuously true.
    #[must_use]
    pub fn matches_structural(&self, store: &Store) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.iter().any(|s| store.has_category(s));
        let neighborhood_ok = self.neighborhoods.is_empty()
            || self.neighborhoods.iter().any(|s| *s == store.neighborhood.slug);
        let region_ok = self.regions.is_empty()
            || self.regions.iter().any(|s| *s == store.neighborhood.region.slug);
        category_ok && neighborhood_ok && region_ok
    }

    /// Case-insensitive substring search over name, card description, and
    /// neighborhood name. An empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, store: &Store) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        store.name.to_lowercase().contains(&query)
            || store
                .card_description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
            || store.neighborhood.name.to_lowercase().contains(&query)
    }
}

fn push_unique(values: &mut Vec<String>, slug: &str) {
    if !values.iter().any(|s| s == slug) {
        values.push(slug.to_string());
    }
}

/// Sort key for distance ordering: an unusable coordinate maps to infinity,
/// which a stable sort leaves last in input order.
fn distance_key(store: &Store, origin: Coordinate) -> f64 {
    match store.location {
        Some(coord) if coord.is_valid() => distance_miles(origin, coord),
        _ => f64::INFINITY,
    }
}

/// [`apply_from`] measuring distance from [`NYC_CENTER`].
#[must_use]
pub fn apply(stores: &[Store], spec: &FilterSpec) -> Vec<Store> {
    apply_from(stores, spec, NYC_CENTER)
}

/// Apply the filter specification to the full collection and return the
/// ordered visible subset. `origin` is the reference point for the distance
/// sort — the loaded city's center, where one is known.
///
/// Pure and deterministic: identical inputs yield identical, order-stable
/// output. Search narrows the structural result, never widens it. Stores
/// missing a field needed by the active criteria are excluded (distance) or
/// ranked as zero (rating) rather than causing a failure.
#[must_use]
pub fn apply_from(stores: &[Store], spec: &FilterSpec, origin: Coordinate) -> Vec<Store> {
    let mut visible: Vec<Store> = stores
        .iter()
        .filter(|s| spec.matches_structural(s))
        .filter(|s| spec.matches_query(s))
        .cloned()
        .collect();

    match spec.sort {
        SortKey::Alphabetical => {
            visible.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::Rating => {
            visible.sort_by(|a, b| {
                b.rating_or_zero()
                    .total_cmp(&a.rating_or_zero())
                    .then_with(|| b.review_count_or_zero().cmp(&a.review_count_or_zero()))
            });
        }
        SortKey::Distance => {
            visible.sort_by(|a, b| distance_key(a, origin).total_cmp(&distance_key(b, origin)));
        }
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftmap_core::{Category, Coordinate, Neighborhood, Region, StoreMetrics};

    fn category(slug: &str) -> Category {
        Category {
            id: format!("cat-{slug}"),
            name: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn neighborhood(slug: &str, region_slug: &str) -> Neighborhood {
        Neighborhood {
            id: format!("n-{slug}"),
            name: slug.to_string(),
            slug: slug.to_string(),
            region: Region {
                id: format!("r-{region_slug}"),
                name: region_slug.to_string(),
                slug: region_slug.to_string(),
                city_slug: "new-york".to_string(),
            },
        }
    }

    fn store(id: &str, name: &str, cat: &str, nbhd: &str, region: &str) -> Store {
        Store {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            card_description: None,
            location: None,
            formatted_address: None,
            primary_category: category(cat),
            secondary_categories: vec![],
            neighborhood: neighborhood(nbhd, region),
            metrics: None,
            website: None,
            maps_url: None,
        }
    }

    fn with_metrics(mut s: Store, rating: f64, reviews: u32) -> Store {
        s.metrics = Some(StoreMetrics {
            rating: Some(rating),
            review_count: Some(reviews),
            price_level: None,
        });
        s
    }

    fn with_location(mut s: Store, lat: f64, lng: f64) -> Store {
        s.location = Some(Coordinate { lat, lng });
        s
    }

    fn spec() -> FilterSpec {
        FilterSpec::default()
    }

    #[test]
    fn empty_spec_keeps_everything() {
        let stores = vec![
            store("1", "Ann's Vintage", "vintage", "soho", "manhattan"),
            store("2", "Zed Thrift", "thrift", "astoria", "queens"),
        ];
        assert_eq!(apply(&stores, &spec()).len(), 2);
        assert!(!spec().is_active());
    }

    #[test]
    fn category_group_is_or_semantics() {
        let stores = vec![
            store("1", "A", "vintage", "soho", "manhattan"),
            store("2", "B", "thrift", "soho", "manhattan"),
            store("3", "C", "books", "soho", "manhattan"),
        ];
        let mut s = spec();
        s.add_category("vintage");
        s.add_category("thrift");
        let out = apply(&stores, &s);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn secondary_category_matches() {
        let mut a = store("1", "A", "vintage", "soho", "manhattan");
        a.secondary_categories.push(category("books"));
        let mut s = spec();
        s.add_category("books");
        assert_eq!(apply(&[a], &s).len(), 1);
    }

    #[test]
    fn groups_combine_with_and() {
        let stores = vec![
            store("1", "A", "vintage", "soho", "manhattan"),
            store("2", "B", "vintage", "astoria", "queens"),
        ];
        let mut s = spec();
        s.add_category("vintage");
        s.add_neighborhood("soho");
        let out = apply(&stores, &s);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn region_filter_uses_the_neighborhood_chain() {
        let stores = vec![
            store("1", "A", "vintage", "soho", "manhattan"),
            store("2", "B", "vintage", "astoria", "queens"),
        ];
        let mut s = spec();
        s.add_region("queens");
        let out = apply(&stores, &s);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }

    #[test]
    fn search_narrows_the_structural_result() {
        let mut a = store("1", "Ann's Vintage", "vintage", "soho", "manhattan");
        a.card_description = Some("Curated womenswear".to_string());
        let b = store("2", "Beacon Vintage", "vintage", "soho", "manhattan");
        let stores = vec![a, b];

        let mut without_query = spec();
        without_query.add_category("vintage");
        let mut with_query = without_query.clone();
        with_query.query = "womenswear".to_string();

        let wide = apply(&stores, &without_query);
        let narrow = apply(&stores, &with_query);
        assert!(narrow.len() <= wide.len());
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[0].id, "1");
    }

    #[test]
    fn search_covers_neighborhood_name() {
        let stores = vec![store("1", "A", "vintage", "Williamsburg", "brooklyn")];
        let mut s = spec();
        s.query = "williams".to_string();
        assert_eq!(apply(&stores, &s).len(), 1);
    }

    #[test]
    fn alphabetical_sort_ignores_input_order() {
        let stores = vec![
            store("z", "Zed Thrift", "thrift", "soho", "manhattan"),
            store("a", "Ann's Vintage", "vintage", "soho", "manhattan"),
            store("b", "Bee Consign", "consignment", "soho", "manhattan"),
        ];
        let out = apply(&stores, &spec());
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "z"]);
    }

    #[test]
    fn rating_ties_break_on_review_count() {
        let stores = vec![
            with_metrics(store("1", "Few", "thrift", "soho", "manhattan"), 4.5, 10),
            with_metrics(store("2", "Many", "thrift", "soho", "manhattan"), 4.5, 50),
        ];
        let mut s = spec();
        s.sort = SortKey::Rating;
        let out = apply(&stores, &s);
        assert_eq!(out[0].id, "2");
        assert_eq!(out[1].id, "1");
    }

    #[test]
    fn missing_rating_sorts_as_zero() {
        let stores = vec![
            store("unrated", "No Stars", "thrift", "soho", "manhattan"),
            with_metrics(store("rated", "Stars", "thrift", "soho", "manhattan"), 3.0, 1),
        ];
        let mut s = spec();
        s.sort = SortKey::Rating;
        let out = apply(&stores, &s);
        assert_eq!(out[0].id, "rated");
    }

    #[test]
    fn distance_sort_puts_unlocated_stores_last() {
        let stores = vec![
            store("nowhere", "Mystery", "thrift", "soho", "manhattan"),
            with_location(
                store("far", "Far", "thrift", "astoria", "queens"),
                40.90,
                -73.80,
            ),
            with_location(store("near", "Near", "thrift", "soho", "manhattan"), 40.72, -74.00),
        ];
        let mut s = spec();
        s.sort = SortKey::Distance;
        let out = apply(&stores, &s);
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["near", "far", "nowhere"]);
    }

    #[test]
    fn distance_sort_measures_from_the_given_origin() {
        let stores = vec![
            with_location(
                store("downtown", "Downtown", "thrift", "soho", "manhattan"),
                40.72,
                -74.00,
            ),
            with_location(
                store("uptown", "Uptown", "thrift", "harlem", "manhattan"),
                40.81,
                -73.94,
            ),
        ];
        let mut s = spec();
        s.sort = SortKey::Distance;

        // Default origin is the NYC city-hall reference point.
        let from_default = apply(&stores, &s);
        assert_eq!(from_default[0].id, "downtown");

        let harlem = Coordinate {
            lat: 40.81,
            lng: -73.94,
        };
        let from_uptown = apply_from(&stores, &s, harlem);
        assert_eq!(from_uptown[0].id, "uptown");
    }

    #[test]
    fn apply_is_deterministic() {
        let stores = vec![
            store("1", "Ann's Vintage", "vintage", "soho", "manhattan"),
            store("2", "Zed Thrift", "thrift", "astoria", "queens"),
        ];
        let mut s = spec();
        s.query = "a".to_string();
        let first = apply(&stores, &s);
        let second = apply(&stores, &s);
        let ids = |v: &[Store]| v.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn add_is_idempotent_and_remove_deletes() {
        let mut s = spec();
        s.add_category("vintage");
        s.add_category("vintage");
        assert_eq!(s.categories.len(), 1);
        s.remove_category("vintage");
        assert!(s.categories.is_empty());
    }

    #[test]
    fn clear_keeps_the_sort_key() {
        let mut s = spec();
        s.add_category("vintage");
        s.query = "ann".to_string();
        s.sort = SortKey::Rating;
        s.clear();
        assert!(!s.is_active());
        assert_eq!(s.sort, SortKey::Rating);
    }

    #[test]
    fn scenario_neighborhood_filter_with_rating_sort() {
        let stores = vec![
            with_metrics(store("1", "Zed", "thrift", "SoHo", "manhattan"), 4.0, 5),
            with_metrics(store("2", "Ann", "vintage", "SoHo", "manhattan"), 4.0, 50),
        ];
        let mut s = spec();
        s.add_neighborhood("SoHo");
        s.sort = SortKey::Rating;
        let out = apply(&stores, &s);
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn scenario_category_filter_with_search() {
        let stores = vec![
            store("1", "Zed", "thrift", "soho", "manhattan"),
            store("2", "Ann", "vintage", "soho", "manhattan"),
        ];
        let mut s = spec();
        s.add_category("vintage");
        s.query = "an".to_string();
        let out = apply(&stores, &s);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }
}
