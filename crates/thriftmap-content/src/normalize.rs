//! Normalization from raw CMS documents to `thriftmap-core` records.
//!
//! Malformed documents never become errors at this boundary: a record missing
//! its identity, name, or a required reference chain is dropped with a
//! warning, and optional fields that fail validation (a half-present
//! coordinate, for example) are normalized to absent.

use thriftmap_core::{
    BlogPost, Category, City, Coordinate, Neighborhood, Region, Store, StoreMetrics,
};

use crate::wire::{
    BlogPostDoc, CategoryDoc, CityDoc, GeoPointDoc, NeighborhoodDoc, RegionDoc, StoreDoc,
};

fn coordinate(point: Option<GeoPointDoc>) -> Option<Coordinate> {
    let point = point?;
    let (lat, lng) = (point.lat?, point.lng?);
    let coord = Coordinate { lat, lng };
    coord.is_valid().then_some(coord)
}

pub(crate) fn category(doc: CategoryDoc) -> Option<Category> {
    Some(Category {
        id: doc.id?,
        name: doc.name?,
        slug: doc.slug?.current,
    })
}

pub(crate) fn region(doc: RegionDoc) -> Option<Region> {
    Some(Region {
        id: doc.id?,
        name: doc.name?,
        slug: doc.slug?.current,
        city_slug: doc.city?.slug?.current,
    })
}

pub(crate) fn neighborhood(doc: NeighborhoodDoc) -> Option<Neighborhood> {
    Some(Neighborhood {
        id: doc.id?,
        name: doc.name?,
        slug: doc.slug?.current,
        region: region(doc.region?)?,
    })
}

pub(crate) fn city(doc: CityDoc) -> Option<City> {
    Some(City {
        id: doc.id?,
        name: doc.name?,
        slug: doc.slug?.current,
        state: doc.state,
        center: coordinate(doc.center),
        default_zoom: doc.default_zoom,
    })
}

pub(crate) fn store(doc: StoreDoc) -> Option<Store> {
    Some(Store {
        id: doc.id?,
        name: doc.name?,
        slug: doc.slug?.current,
        card_description: doc.card_description,
        location: coordinate(doc.location),
        formatted_address: doc.formatted_address,
        primary_category: category(doc.primary_category?)?,
        secondary_categories: doc
            .secondary_categories
            .into_iter()
            .filter_map(category)
            .collect(),
        neighborhood: neighborhood(doc.neighborhood?)?,
        metrics: doc.metrics.map(|m| StoreMetrics {
            rating: m.rating,
            review_count: m.review_count,
            price_level: m.price_level,
        }),
        website: doc.website,
        maps_url: doc.google_maps_url,
    })
}

pub(crate) fn blog_post(doc: BlogPostDoc) -> Option<BlogPost> {
    Some(BlogPost {
        id: doc.id?,
        title: doc.title?,
        slug: doc.slug?.current,
        author: doc.author,
        published_at: doc.published_at?,
        excerpt: doc.excerpt,
        category_slugs: doc
            .categories
            .into_iter()
            .filter_map(|c| c.slug.map(|s| s.current))
            .collect(),
        featured_store_slugs: doc
            .featured_stores
            .into_iter()
            .filter_map(|r| r.slug.map(|s| s.current))
            .collect(),
    })
}

/// Normalize a document batch, dropping malformed entries with one warning
/// per drop.
pub(crate) fn batch<D, T>(docs: Vec<D>, kind: &str, f: impl Fn(D) -> Option<T>) -> Vec<T> {
    let total = docs.len();
    let normalized: Vec<T> = docs.into_iter().filter_map(f).collect();
    let dropped = total - normalized.len();
    if dropped > 0 {
        tracing::warn!(kind, dropped, total, "dropped malformed content documents");
    }
    normalized
}

/// Name sort used where the original service sorted its collections.
pub(crate) fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| name(a).to_lowercase().cmp(&name(b).to_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_doc(value: serde_json::Value) -> StoreDoc {
        serde_json::from_value(value).unwrap()
    }

    fn full_store_json() -> serde_json::Value {
        json!({
            "_id": "store-1",
            "name": "Ann's Vintage",
            "slug": {"current": "anns-vintage"},
            "cardDescription": "Curated womenswear",
            "location": {"lat": 40.7233, "lng": -74.0030},
            "formattedAddress": "123 Spring St",
            "primaryCategory": {"_id": "cat-1", "name": "Vintage", "slug": {"current": "vintage"}},
            "secondaryCategories": [
                {"_id": "cat-2", "name": "Designer", "slug": {"current": "designer"}}
            ],
            "neighborhood": {
                "_id": "n-1",
                "name": "SoHo",
                "slug": {"current": "soho"},
                "region": {
                    "_id": "r-1",
                    "name": "Manhattan",
                    "slug": {"current": "manhattan"},
                    "city": {"_id": "c-1", "name": "New York City", "slug": {"current": "new-york"}}
                }
            },
            "metrics": {"rating": 4.5, "userRatingsTotal": 321, "priceLevel": 2},
            "website": "https://example.com",
            "googleMapsUrl": "https://maps.example.com"
        })
    }

    #[test]
    fn complete_store_normalizes() {
        let normalized = store(store_doc(full_store_json())).unwrap();
        assert_eq!(normalized.id, "store-1");
        assert_eq!(normalized.neighborhood.region.city_slug, "new-york");
        assert_eq!(normalized.secondary_categories.len(), 1);
        assert_eq!(normalized.metrics.unwrap().review_count, Some(321));
        assert!(normalized.location.is_some());
    }

    #[test]
    fn store_without_neighborhood_chain_is_dropped() {
        let mut value = full_store_json();
        value["neighborhood"]["region"] = serde_json::Value::Null;
        assert!(store(store_doc(value)).is_none());
    }

    #[test]
    fn half_present_coordinate_becomes_absent() {
        let mut value = full_store_json();
        value["location"] = json!({"lat": 40.72});
        let normalized = store(store_doc(value)).unwrap();
        assert!(normalized.location.is_none());
    }

    #[test]
    fn malformed_secondary_category_is_skipped_not_fatal() {
        let mut value = full_store_json();
        value["secondaryCategories"] = json!([{"_id": "cat-3"}]);
        let normalized = store(store_doc(value)).unwrap();
        assert!(normalized.secondary_categories.is_empty());
    }

    #[test]
    fn batch_counts_drops() {
        let good = store_doc(full_store_json());
        let mut bad_value = full_store_json();
        bad_value["name"] = serde_json::Value::Null;
        let bad = store_doc(bad_value);
        let out = batch(vec![good, bad], "store", store);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn blog_post_requires_publish_date() {
        let doc: BlogPostDoc = serde_json::from_value(json!({
            "_id": "post-1",
            "title": "Thrifting Brooklyn",
            "slug": {"current": "thrifting-brooklyn"}
        }))
        .unwrap();
        assert!(blog_post(doc).is_none());
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut names = vec!["beacon".to_string(), "Ann".to_string(), "zed".to_string()];
        sort_by_name(&mut names, |s| s.as_str());
        assert_eq!(names, vec!["Ann", "beacon", "zed"]);
    }
}
