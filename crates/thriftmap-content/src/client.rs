//! HTTP client for the content API.
//!
//! Thin typed wrapper over the CMS read endpoints. The raw fetchers return
//! [`ContentError`]s; the [`ContentRepository`] impl converts every failure
//! into an empty result with a warning, which is the contract the rest of
//! the system assumes.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use thriftmap_core::{BlogPost, Category, City, Neighborhood, Region, Store};

use crate::error::ContentError;
use crate::normalize;
use crate::repository::ContentRepository;
use crate::wire::{BlogPostDoc, CategoryDoc, CityDoc, NeighborhoodDoc, RegionDoc, StoreDoc};

pub struct HttpContentClient {
    client: Client,
    base_url: String,
}

impl HttpContentClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Single-document fetch where 404 means "no such document".
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ContentError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ContentError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        Ok(Some(response.json::<T>().await?))
    }

    async fn fetch_stores(&self, city_slug: Option<&str>) -> Result<Vec<Store>, ContentError> {
        let query: Vec<(&str, &str)> = city_slug.map(|c| ("city", c)).into_iter().collect();
        let docs: Vec<StoreDoc> = self.get_json("/stores", &query).await?;
        Ok(normalize::batch(docs, "store", normalize::store))
    }

    async fn fetch_neighborhoods(
        &self,
        city_slug: Option<&str>,
    ) -> Result<Vec<Neighborhood>, ContentError> {
        let query: Vec<(&str, &str)> = city_slug.map(|c| ("city", c)).into_iter().collect();
        let docs: Vec<NeighborhoodDoc> = self.get_json("/neighborhoods", &query).await?;
        let mut neighborhoods = normalize::batch(docs, "neighborhood", normalize::neighborhood);
        normalize::sort_by_name(&mut neighborhoods, |n| n.name.as_str());
        Ok(neighborhoods)
    }
}

/// Log-and-degrade for collection fetches.
fn or_empty<T>(result: Result<Vec<T>, ContentError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(what, error = %e, "content fetch failed, degrading to empty");
            Vec::new()
        }
    }
}

/// Log-and-degrade for single-document fetches.
fn or_none<T>(result: Result<Option<T>, ContentError>, what: &str) -> Option<T> {
    match result {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!(what, error = %e, "content fetch failed, degrading to none");
            None
        }
    }
}

impl ContentRepository for HttpContentClient {
    async fn all_stores(&self) -> Vec<Store> {
        or_empty(self.fetch_stores(None).await, "stores")
    }

    async fn stores_by_city(&self, city_slug: &str) -> Vec<Store> {
        or_empty(self.fetch_stores(Some(city_slug)).await, "stores_by_city")
    }

    async fn store_by_slug(&self, slug: &str) -> Option<Store> {
        let result = self
            .get_optional::<StoreDoc>(&format!("/stores/{slug}"))
            .await
            .map(|doc| doc.and_then(normalize::store));
        or_none(result, "store_by_slug")
    }

    async fn all_categories(&self) -> Vec<Category> {
        let result = self
            .get_json::<Vec<CategoryDoc>>("/categories", &[])
            .await
            .map(|docs| {
                let mut categories = normalize::batch(docs, "category", normalize::category);
                normalize::sort_by_name(&mut categories, |c| c.name.as_str());
                categories
            });
        or_empty(result, "categories")
    }

    async fn all_neighborhoods(&self) -> Vec<Neighborhood> {
        or_empty(self.fetch_neighborhoods(None).await, "neighborhoods")
    }

    async fn neighborhoods_by_city(&self, city_slug: &str) -> Vec<Neighborhood> {
        or_empty(
            self.fetch_neighborhoods(Some(city_slug)).await,
            "neighborhoods_by_city",
        )
    }

    async fn regions_by_city(&self, city_slug: &str) -> Vec<Region> {
        let result = self
            .get_json::<Vec<RegionDoc>>("/regions", &[("city", city_slug)])
            .await
            .map(|docs| normalize::batch(docs, "region", normalize::region));
        or_empty(result, "regions_by_city")
    }

    async fn city(&self, slug: &str) -> Option<City> {
        let result = self
            .get_optional::<CityDoc>(&format!("/cities/{slug}"))
            .await
            .map(|doc| doc.and_then(normalize::city));
        or_none(result, "city")
    }

    async fn all_blog_posts(&self) -> Vec<BlogPost> {
        let result = self
            .get_json::<Vec<BlogPostDoc>>("/blog-posts", &[])
            .await
            .map(|docs| {
                let mut posts = normalize::batch(docs, "blog_post", normalize::blog_post);
                posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                posts
            });
        or_empty(result, "blog_posts")
    }

    async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let result = self
            .get_optional::<BlogPostDoc>(&format!("/blog-posts/{slug}"))
            .await
            .map(|doc| doc.and_then(normalize::blog_post));
        or_none(result, "blog_post_by_slug")
    }
}
