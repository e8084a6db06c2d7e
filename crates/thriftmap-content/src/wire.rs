//! Raw CMS document shapes.
//!
//! Mirrors the content API's JSON: `_id` identifiers, `slug.current`
//! wrappers, dereferenced neighborhood→region→city chains, optional
//! everything. Normalization into core records happens in
//! [`crate::normalize`]; nothing outside this crate touches these types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SlugField {
    pub current: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeoPointDoc {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<SlugField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<SlugField>,
    pub state: Option<String>,
    pub center: Option<GeoPointDoc>,
    pub default_zoom: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<SlugField>,
    pub city: Option<CityDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeighborhoodDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<SlugField>,
    pub region: Option<RegionDoc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MetricsDoc {
    pub rating: Option<f64>,
    #[serde(rename = "userRatingsTotal")]
    pub review_count: Option<u32>,
    #[serde(rename = "priceLevel")]
    pub price_level: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<SlugField>,
    pub card_description: Option<String>,
    pub location: Option<GeoPointDoc>,
    pub formatted_address: Option<String>,
    pub primary_category: Option<CategoryDoc>,
    #[serde(default)]
    pub secondary_categories: Vec<CategoryDoc>,
    pub neighborhood: Option<NeighborhoodDoc>,
    pub metrics: Option<MetricsDoc>,
    pub website: Option<String>,
    pub google_maps_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreRefDoc {
    pub slug: Option<SlugField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<SlugField>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDoc>,
    #[serde(default)]
    pub featured_stores: Vec<StoreRefDoc>,
}

/// Top-level shape of a local fixture file: every collection the content API
/// serves, in one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDoc {
    #[serde(default)]
    pub stores: Vec<StoreDoc>,
    #[serde(default)]
    pub categories: Vec<CategoryDoc>,
    #[serde(default)]
    pub neighborhoods: Vec<NeighborhoodDoc>,
    #[serde(default)]
    pub regions: Vec<RegionDoc>,
    #[serde(default)]
    pub cities: Vec<CityDoc>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPostDoc>,
}
