//! The repository trait the session consumes.

use thriftmap_core::{BlogPost, Category, City, Neighborhood, Region, Store};

/// Typed content access with degrade-on-failure semantics: every method
/// returns an empty collection or `None` when the backing source fails, never
/// an error. Implementations log the failure; callers render the empty state.
///
/// Consumed through generics (`DiscoverySession<R: ContentRepository>`), so
/// native async fns suffice.
#[allow(async_fn_in_trait)]
pub trait ContentRepository {
    async fn all_stores(&self) -> Vec<Store>;

    async fn stores_by_city(&self, city_slug: &str) -> Vec<Store>;

    async fn store_by_slug(&self, slug: &str) -> Option<Store>;

    /// All categories, name-sorted.
    async fn all_categories(&self) -> Vec<Category>;

    /// All neighborhoods, name-sorted.
    async fn all_neighborhoods(&self) -> Vec<Neighborhood>;

    async fn neighborhoods_by_city(&self, city_slug: &str) -> Vec<Neighborhood>;

    async fn regions_by_city(&self, city_slug: &str) -> Vec<Region>;

    async fn city(&self, slug: &str) -> Option<City>;

    /// All posts, newest first.
    async fn all_blog_posts(&self) -> Vec<BlogPost>;

    async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost>;
}
