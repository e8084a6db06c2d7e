//! Fixture-backed repository.
//!
//! Serves pre-normalized collections from memory: the CLI's offline mode and
//! the test suites use it in place of the HTTP client. Accepts the same wire
//! format the content API emits, so one JSON fixture file drives both paths.

use std::path::Path;

use thriftmap_core::{BlogPost, Category, City, Neighborhood, Region, Store};

use crate::error::ContentError;
use crate::normalize;
use crate::repository::ContentRepository;
use crate::wire::FixtureDoc;

#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    stores: Vec<Store>,
    categories: Vec<Category>,
    neighborhoods: Vec<Neighborhood>,
    regions: Vec<Region>,
    cities: Vec<City>,
    blog_posts: Vec<BlogPost>,
}

impl InMemoryRepository {
    /// Build directly from normalized records; sorting contracts (name-sorted
    /// categories/neighborhoods, newest-first posts) are applied here.
    #[must_use]
    pub fn new(
        stores: Vec<Store>,
        categories: Vec<Category>,
        neighborhoods: Vec<Neighborhood>,
        regions: Vec<Region>,
        cities: Vec<City>,
        blog_posts: Vec<BlogPost>,
    ) -> Self {
        let mut repo = Self {
            stores,
            categories,
            neighborhoods,
            regions,
            cities,
            blog_posts,
        };
        normalize::sort_by_name(&mut repo.categories, |c| c.name.as_str());
        normalize::sort_by_name(&mut repo.neighborhoods, |n| n.name.as_str());
        repo.blog_posts
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));
        repo
    }

    /// Parse a wire-format fixture document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Deserialize`] if the JSON does not match the
    /// fixture shape. Malformed individual documents inside a well-formed
    /// fixture are dropped with a warning, same as the HTTP path.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let doc: FixtureDoc = serde_json::from_str(json)?;
        Ok(Self::new(
            normalize::batch(doc.stores, "store", normalize::store),
            normalize::batch(doc.categories, "category", normalize::category),
            normalize::batch(doc.neighborhoods, "neighborhood", normalize::neighborhood),
            normalize::batch(doc.regions, "region", normalize::region),
            normalize::batch(doc.cities, "city", normalize::city),
            normalize::batch(doc.blog_posts, "blog_post", normalize::blog_post),
        ))
    }

    /// Load a fixture file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] if the file cannot be read, or
    /// [`ContentError::Deserialize`] if it is not valid fixture JSON.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl ContentRepository for InMemoryRepository {
    async fn all_stores(&self) -> Vec<Store> {
        self.stores.clone()
    }

    async fn stores_by_city(&self, city_slug: &str) -> Vec<Store> {
        self.stores
            .iter()
            .filter(|s| s.neighborhood.region.city_slug == city_slug)
            .cloned()
            .collect()
    }

    async fn store_by_slug(&self, slug: &str) -> Option<Store> {
        self.stores.iter().find(|s| s.slug == slug).cloned()
    }

    async fn all_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    async fn all_neighborhoods(&self) -> Vec<Neighborhood> {
        self.neighborhoods.clone()
    }

    async fn neighborhoods_by_city(&self, city_slug: &str) -> Vec<Neighborhood> {
        self.neighborhoods
            .iter()
            .filter(|n| n.region.city_slug == city_slug)
            .cloned()
            .collect()
    }

    async fn regions_by_city(&self, city_slug: &str) -> Vec<Region> {
        self.regions
            .iter()
            .filter(|r| r.city_slug == city_slug)
            .cloned()
            .collect()
    }

    async fn city(&self, slug: &str) -> Option<City> {
        self.cities.iter().find(|c| c.slug == slug).cloned()
    }

    async fn all_blog_posts(&self) -> Vec<BlogPost> {
        self.blog_posts.clone()
    }

    async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.blog_posts.iter().find(|p| p.slug == slug).cloned()
    }
}
