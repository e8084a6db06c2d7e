//! Command handlers for the CLI.
//!
//! These are called from `main` after the repository and config are
//! established. Content failures degrade to empty collections at the
//! repository boundary, so handlers render empty states instead of erroring.

use thriftmap_content::ContentRepository;
use thriftmap_core::{classify_store, distance_miles, StoreKind, NYC_CENTER};
use thriftmap_engine::{apply_from, build_index, search_index, FilterSpec, SortKey};

/// Assemble a filter spec from the `list` flags, optionally seeded from a
/// shareable query string first (flags then add on top of it).
pub(crate) fn build_spec(
    categories: Vec<String>,
    neighborhoods: Vec<String>,
    regions: Vec<String>,
    search: Option<String>,
    sort: SortKey,
    url: Option<&str>,
) -> anyhow::Result<FilterSpec> {
    let mut spec = FilterSpec::default();

    if let Some(url) = url {
        let mut pairs = Vec::new();
        for part in url.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("malformed query parameter: '{part}'"))?;
            pairs.push((key.to_string(), value.to_string()));
        }
        thriftmap_session::url::apply_query_pairs(&mut spec, &pairs);
    }

    for slug in &categories {
        spec.add_category(slug);
    }
    for slug in &neighborhoods {
        spec.add_neighborhood(slug);
    }
    for slug in &regions {
        spec.add_region(slug);
    }
    if let Some(query) = search {
        spec.query = query;
    }
    spec.sort = sort;
    Ok(spec)
}

/// List the stores matching the filter selection, as a table or as JSON.
pub(crate) async fn run_list<R: ContentRepository>(
    repo: &R,
    city_slug: &str,
    spec: &FilterSpec,
    json: bool,
) -> anyhow::Result<()> {
    let stores = repo.stores_by_city(city_slug).await;
    let center = repo
        .city(city_slug)
        .await
        .and_then(|c| c.center)
        .unwrap_or(NYC_CENTER);

    let visible = apply_from(&stores, spec, center);
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        if spec.is_active() {
            println!("no stores match the current filters ({} total)", stores.len());
        } else {
            println!("no stores loaded");
        }
        return Ok(());
    }

    for store in &visible {
        let kind = classify_store(&store.name, store.card_description.as_deref());
        let rating = store.metrics.as_ref().and_then(|m| m.rating).map_or_else(
            || "\u{2014}".to_string(),
            |r| format!("{r:.1}"),
        );
        let distance = store
            .location
            .filter(thriftmap_core::Coordinate::is_valid)
            .map_or_else(
                || "\u{2014}".to_string(),
                |coord| format!("{:.1} mi", distance_miles(center, coord)),
            );
        println!(
            "{:<40} {:<12} {:<20} {:>4} {:>8}",
            store.name,
            kind.label(),
            store.neighborhood.name,
            rating,
            distance
        );
    }
    println!("\n{} of {} stores", visible.len(), stores.len());
    Ok(())
}

/// Print autocomplete suggestions for a partial query.
pub(crate) async fn run_search<R: ContentRepository>(
    repo: &R,
    city_slug: &str,
    query: &str,
) -> anyhow::Result<()> {
    let (stores, neighborhoods, regions, categories) = tokio::join!(
        repo.stores_by_city(city_slug),
        repo.neighborhoods_by_city(city_slug),
        repo.regions_by_city(city_slug),
        repo.all_categories(),
    );
    let index = build_index(&stores, &neighborhoods, &regions, &categories);
    let matches = search_index(&index, query);
    if matches.is_empty() {
        println!("no suggestions for '{query}'");
        return Ok(());
    }
    for option in matches {
        println!("{:<14} {}", option.kind.tag(), option.label);
    }
    Ok(())
}

/// Show one store in detail, with its classification and distance from the
/// city center.
pub(crate) async fn run_show<R: ContentRepository>(
    repo: &R,
    city_slug: &str,
    slug: &str,
) -> anyhow::Result<()> {
    let Some(store) = repo.store_by_slug(slug).await else {
        anyhow::bail!("store '{slug}' not found");
    };
    let center = repo
        .city(city_slug)
        .await
        .and_then(|c| c.center)
        .unwrap_or(NYC_CENTER);

    let kind = classify_store(&store.name, store.card_description.as_deref());
    let style = kind.style();

    println!("{}", store.name);
    println!("  type:         {} {}", style.glyph, style.label);
    println!("  category:     {}", store.primary_category.name);
    println!(
        "  neighborhood: {} ({})",
        store.neighborhood.name, store.neighborhood.region.name
    );
    if let Some(address) = &store.formatted_address {
        println!("  address:      {address}");
    }
    if let Some(coord) = store.location.filter(thriftmap_core::Coordinate::is_valid) {
        println!(
            "  distance:     {:.1} mi from the city center",
            distance_miles(center, coord)
        );
    }
    if let Some(metrics) = &store.metrics {
        if let Some(rating) = metrics.rating {
            println!(
                "  rating:       {rating:.1} ({} reviews)",
                metrics.review_count.unwrap_or(0)
            );
        }
    }
    if let Some(website) = &store.website {
        println!("  website:      {website}");
    }
    if let Some(description) = &store.card_description {
        println!("\n  {description}");
    }
    Ok(())
}

/// Print the marker legend: every store type with its color and glyph.
pub(crate) fn run_legend() {
    for kind in StoreKind::ALL {
        let style = kind.style();
        println!("{} {:<14} {}", style.glyph, style.label, style.color);
    }
}

/// List blog posts newest-first, or show one by slug.
pub(crate) async fn run_blog<R: ContentRepository>(
    repo: &R,
    slug: Option<&str>,
) -> anyhow::Result<()> {
    match slug {
        Some(slug) => {
            let Some(post) = repo.blog_post_by_slug(slug).await else {
                anyhow::bail!("post '{slug}' not found");
            };
            println!("{}", post.title);
            println!(
                "  {} by {}",
                post.published_at.format("%Y-%m-%d"),
                post.author.as_deref().unwrap_or("unknown")
            );
            if let Some(excerpt) = &post.excerpt {
                println!("\n  {excerpt}");
            }
        }
        None => {
            let posts = repo.all_blog_posts().await;
            if posts.is_empty() {
                println!("no posts");
                return Ok(());
            }
            for post in &posts {
                println!(
                    "{}  {:<40} {}",
                    post.published_at.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
    }
    Ok(())
}
