//! The discovery session controller.

use std::collections::HashSet;

use thriftmap_content::ContentRepository;
use thriftmap_core::{
    distance_miles, Category, City, Coordinate, Neighborhood, Region, Store, DEFAULT_ZOOM,
    NYC_CENTER,
};
use thriftmap_engine::{
    apply_from, build_index, search_index, AutocompleteOption, FilterSpec, OptionKind, SortKey,
};
use thriftmap_map::{MapEvent, MapView, MarkerSynchronizer};

/// Which filter panel the sidebar shows; autocomplete selections switch it so
/// the freshly added chip is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterTab {
    #[default]
    Categories,
    Regions,
}

/// Everything one content load produces.
#[derive(Debug, Default)]
pub struct LoadedContent {
    pub stores: Vec<Store>,
    pub categories: Vec<Category>,
    pub neighborhoods: Vec<Neighborhood>,
    pub regions: Vec<Region>,
    pub city: Option<City>,
}

/// Liveness token for one load: [`DiscoverySession::apply_load`] discards
/// content carrying a token older than the most recent `begin_load`, so a
/// superseded fetch can never clobber newer data.
#[derive(Debug, Clone, Copy)]
pub struct LoadToken {
    generation: u64,
}

/// Page-level state for the interactive store map: the loaded collections,
/// the current filter specification, the derived visible subset and
/// autocomplete index, and the marker synchronizer over the owned map view.
pub struct DiscoverySession<V: MapView> {
    view: V,
    markers: MarkerSynchronizer,
    city_slug: String,

    stores: Vec<Store>,
    categories: Vec<Category>,
    neighborhoods: Vec<Neighborhood>,
    regions: Vec<Region>,
    city: Option<City>,

    spec: FilterSpec,
    visible: Vec<Store>,
    index: Vec<AutocompleteOption>,
    selected: Option<String>,
    active_tab: FilterTab,

    loading: bool,
    generation: u64,
}

impl<V: MapView> DiscoverySession<V> {
    pub fn new(view: V, city_slug: impl Into<String>) -> Self {
        Self {
            view,
            markers: MarkerSynchronizer::new(),
            city_slug: city_slug.into(),
            stores: Vec::new(),
            categories: Vec::new(),
            neighborhoods: Vec::new(),
            regions: Vec::new(),
            city: None,
            spec: FilterSpec::default(),
            visible: Vec::new(),
            index: Vec::new(),
            selected: None,
            active_tab: FilterTab::default(),
            loading: false,
            generation: 0,
        }
    }

    // -- loading ------------------------------------------------------------

    /// Mark a load in flight and mint its liveness token.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.loading = true;
        LoadToken {
            generation: self.generation,
        }
    }

    /// Fetch every collection the session needs, concurrently. Each fetch
    /// degrades to empty at the repository boundary, so this never fails.
    pub async fn fetch<R: ContentRepository>(repo: &R, city_slug: &str) -> LoadedContent {
        let (stores, categories, neighborhoods, regions, city) = tokio::join!(
            repo.stores_by_city(city_slug),
            repo.all_categories(),
            repo.neighborhoods_by_city(city_slug),
            repo.regions_by_city(city_slug),
            repo.city(city_slug),
        );
        LoadedContent {
            stores,
            categories,
            neighborhoods,
            regions,
            city,
        }
    }

    /// Apply fetched content. Stale tokens (a newer `begin_load` happened
    /// since) are discarded without touching any state, including the loading
    /// flag, which now belongs to the newer load.
    pub fn apply_load(&mut self, token: LoadToken, content: LoadedContent) {
        if token.generation != self.generation {
            tracing::debug!(
                token = token.generation,
                current = self.generation,
                "discarding stale load"
            );
            return;
        }
        self.loading = false;
        self.stores = content.stores;
        self.categories = content.categories;
        self.neighborhoods = content.neighborhoods;
        self.regions = content.regions;
        self.city = content.city;

        self.markers.create_all(&mut self.view, &self.stores);
        self.index = build_index(
            &self.stores,
            &self.neighborhoods,
            &self.regions,
            &self.categories,
        );
        self.recompute();
    }

    /// Convenience wrapper: begin, fetch, apply.
    pub async fn load<R: ContentRepository>(&mut self, repo: &R) {
        let token = self.begin_load();
        let city_slug = self.city_slug.clone();
        let content = Self::fetch(repo, &city_slug).await;
        self.apply_load(token, content);
    }

    // -- filter mutations ---------------------------------------------------

    pub fn add_category(&mut self, slug: &str) {
        self.spec.add_category(slug);
        self.recompute();
    }

    pub fn remove_category(&mut self, slug: &str) {
        self.spec.remove_category(slug);
        self.recompute();
    }

    pub fn add_neighborhood(&mut self, slug: &str) {
        self.spec.add_neighborhood(slug);
        self.recompute();
    }

    pub fn remove_neighborhood(&mut self, slug: &str) {
        self.spec.remove_neighborhood(slug);
        self.recompute();
    }

    pub fn add_region(&mut self, slug: &str) {
        self.spec.add_region(slug);
        self.recompute();
    }

    pub fn remove_region(&mut self, slug: &str) {
        self.spec.remove_region(slug);
        self.recompute();
    }

    pub fn set_query(&mut self, query: &str) {
        self.spec.query = query.to_string();
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.spec.sort = sort;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.spec.clear();
        self.recompute();
    }

    /// Re-derive the visible subset and reconcile the map against it.
    ///
    /// Safe to call repeatedly: the engine is pure and the marker diff is
    /// idempotent. A live selection takes camera precedence, so bounds
    /// fitting only happens while nothing is selected.
    pub fn recompute(&mut self) {
        self.visible = apply_from(&self.stores, &self.spec, self.distance_origin());
        let visible_ids: HashSet<String> = self.visible.iter().map(|s| s.id.clone()).collect();
        self.markers.sync_visible(&mut self.view, &visible_ids);
        if self.selected.is_none() {
            self.markers.fit_visible(&mut self.view, &self.visible);
        }
    }

    // -- selection / hover --------------------------------------------------

    /// Select a store by id (focus + popup) or clear the selection (revert to
    /// fitting the visible subset). Unknown ids clear the selection.
    pub fn select_store(&mut self, store_id: Option<&str>) {
        match store_id.and_then(|id| self.stores.iter().find(|s| s.id == id)) {
            Some(store) => {
                self.selected = Some(store.id.clone());
                self.markers.focus(&mut self.view, store);
            }
            None => {
                self.selected = None;
                self.markers.fit_visible(&mut self.view, &self.visible);
            }
        }
    }

    pub fn hover_store(&mut self, store_id: Option<&str>) {
        self.markers.set_hover(&mut self.view, store_id);
    }

    /// Route a view notification; markers raise ids, the session resolves
    /// them against the current collection.
    pub fn handle_event(&mut self, event: &MapEvent) {
        match event {
            MapEvent::MarkerClicked(id) => self.select_store(Some(id)),
            MapEvent::MarkerHovered(id) => self.hover_store(id.as_deref()),
        }
    }

    // -- autocomplete -------------------------------------------------------

    /// Suggestions for the current input, capped at the engine's limit.
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<&AutocompleteOption> {
        search_index(&self.index, query)
    }

    /// Apply the kind-dependent selection side effect: structured entities
    /// mutate filter state (and switch the visible tab), store types mutate
    /// the search query, stores become the selection.
    ///
    /// Takes the option by value — it usually comes out of
    /// [`Self::suggestions`], which borrows the session.
    pub fn choose_suggestion(&mut self, option: AutocompleteOption) {
        match option.kind {
            OptionKind::Store => {
                let id = self
                    .stores
                    .iter()
                    .find(|s| s.slug == option.value)
                    .map(|s| s.id.clone());
                self.select_store(id.as_deref());
            }
            OptionKind::Neighborhood => {
                self.active_tab = FilterTab::Regions;
                self.add_neighborhood(&option.value);
            }
            OptionKind::Region => {
                self.active_tab = FilterTab::Regions;
                self.add_region(&option.value);
            }
            OptionKind::Category => {
                self.active_tab = FilterTab::Categories;
                self.add_category(&option.value);
            }
            OptionKind::StoreType => {
                self.set_query(&option.label);
            }
        }
    }

    // -- URL sync -----------------------------------------------------------

    /// Current structural selection as a URL query string (state → URL).
    #[must_use]
    pub fn query_string(&self) -> String {
        crate::url::query_string(&self.spec)
    }

    /// Ingest URL parameters on page entry (URL → state, once).
    pub fn apply_query_pairs(&mut self, pairs: &[(String, String)]) {
        crate::url::apply_query_pairs(&mut self.spec, pairs);
        self.recompute();
    }

    // -- read surface -------------------------------------------------------

    #[must_use]
    pub fn visible(&self) -> &[Store] {
        &self.visible
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Size of the full loaded collection; with [`Self::has_active_filters`]
    /// this lets the page tell "nothing loaded" from "everything filtered
    /// out".
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.spec.is_active()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn filter_spec(&self) -> &FilterSpec {
        &self.spec
    }

    #[must_use]
    pub fn active_tab(&self) -> FilterTab {
        self.active_tab
    }

    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        let id = self.selected.as_deref()?;
        self.stores.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    /// Starting camera for the host's map view: the loaded city's center and
    /// zoom, or the NYC defaults before (or without) a city document.
    #[must_use]
    pub fn initial_camera(&self) -> (Coordinate, f64) {
        let center = self.distance_origin();
        let zoom = self
            .city
            .as_ref()
            .and_then(|c| c.default_zoom)
            .unwrap_or(DEFAULT_ZOOM);
        (center, zoom)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Miles from the city center for the list row's "x mi" tag; `None` for
    /// stores without a usable coordinate. Measures from the same origin the
    /// distance sort uses, so the displayed values agree with the ordering.
    #[must_use]
    pub fn row_distance(&self, store: &Store) -> Option<f64> {
        let coord = store.location.filter(Coordinate::is_valid)?;
        Some(distance_miles(self.distance_origin(), coord))
    }

    /// Reference point for distance sorting and per-row distances: the
    /// loaded city's center when one is known, else the NYC default.
    fn distance_origin(&self) -> Coordinate {
        self.city
            .as_ref()
            .and_then(|c| c.center)
            .filter(Coordinate::is_valid)
            .unwrap_or(NYC_CENTER)
    }

    /// Release every marker handle; the view itself is dropped with the
    /// session.
    pub fn teardown(&mut self) {
        self.markers.teardown(&mut self.view);
        self.selected = None;
    }
}
