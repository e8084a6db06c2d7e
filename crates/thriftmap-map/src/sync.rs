//! Marker lifecycle and camera reconciliation.
//!
//! Each store's marker moves through Uncreated → Created-Detached ⇄
//! Created-Attached. Creation happens once per full-collection load;
//! filter changes only flip the attached flag, so markers keep their
//! identity (and hover continuity) across rapid refiltering. Destruction
//! happens only at teardown.
//!
//! Every view operation is fallible in isolation: a bad coordinate or a
//! failed attach is warned and skipped without touching the rest of the
//! batch.

use std::collections::{HashMap, HashSet};

use thriftmap_core::{classify_store, Coordinate, Store};

use crate::view::{MapView, MarkerContent, MarkerHandle, MarkerSize, ZTier};

/// Camera zoom when focusing a single selected store.
pub const FOCUS_ZOOM: f64 = 15.0;
/// Fly-to animation length for a selection focus.
pub const FOCUS_DURATION_MS: u64 = 1000;
/// Viewport padding when fitting the visible subset.
pub const FIT_PADDING_PX: u32 = 50;
/// Bounds-fit animation length.
pub const FIT_DURATION_MS: u64 = 500;

#[derive(Debug)]
struct MarkerEntry {
    handle: MarkerHandle,
    attached: bool,
}

/// Reconciles the marker registry against the visible subset and drives the
/// camera. Presentation state (hover emphasis) is keyed by store id and
/// independent of the attach/detach machine.
#[derive(Debug, Default)]
pub struct MarkerSynchronizer {
    markers: HashMap<String, MarkerEntry>,
    hovered: Option<String>,
}

impl MarkerSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of created markers, attached or not.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Whether the store's marker is currently attached to the live view.
    #[must_use]
    pub fn is_attached(&self, store_id: &str) -> bool {
        self.markers.get(store_id).is_some_and(|m| m.attached)
    }

    /// Create a detached marker for every store with a usable coordinate.
    ///
    /// Runs once per full-collection load: stores whose markers already exist
    /// are left alone, stores without a valid coordinate are silently
    /// skipped, and per-store creation failures are warned and skipped.
    pub fn create_all(&mut self, view: &mut dyn MapView, stores: &[Store]) {
        for store in stores {
            if self.markers.contains_key(&store.id) {
                continue;
            }
            let Some(coord) = store.location.filter(Coordinate::is_valid) else {
                continue;
            };
            match view.create_marker(coord, marker_content(store)) {
                Ok(handle) => {
                    self.markers.insert(
                        store.id.clone(),
                        MarkerEntry {
                            handle,
                            attached: false,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!(store = %store.id, error = %e, "marker creation failed, skipping");
                }
            }
        }
    }

    /// Attach markers for ids in the visible set, detach the rest.
    ///
    /// Idempotent: re-running with the same set issues zero view calls. Ids
    /// that never got a marker (unknown, or invalid coordinates at load) are
    /// ignored.
    pub fn sync_visible(&mut self, view: &mut dyn MapView, visible_ids: &HashSet<String>) {
        for (id, entry) in &mut self.markers {
            let should_attach = visible_ids.contains(id);
            if should_attach == entry.attached {
                continue;
            }
            let result = if should_attach {
                view.attach(entry.handle)
            } else {
                view.detach(entry.handle)
            };
            match result {
                Ok(()) => entry.attached = should_attach,
                Err(e) => {
                    tracing::warn!(store = %id, error = %e, "marker visibility update failed");
                }
            }
        }
    }

    /// Fit the camera around every visible store with a valid coordinate.
    ///
    /// An empty subset is a no-op, not an error; a failed fit is warned and
    /// swallowed.
    pub fn fit_visible(&self, view: &mut dyn MapView, visible: &[Store]) {
        let coords: Vec<Coordinate> = visible
            .iter()
            .filter_map(|s| s.location.filter(Coordinate::is_valid))
            .collect();
        if coords.is_empty() {
            return;
        }
        if let Err(e) = view.fit_bounds(&coords, FIT_PADDING_PX, FIT_DURATION_MS) {
            tracing::warn!(error = %e, "bounds fit failed");
        }
    }

    /// Focus a single selected store: fly the camera in and open its popup.
    ///
    /// Stores without a valid coordinate are ignored. Takes precedence over
    /// bounds fitting; the caller reverts to [`Self::fit_visible`] on
    /// de-selection.
    pub fn focus(&self, view: &mut dyn MapView, store: &Store) {
        let Some(coord) = store.location.filter(Coordinate::is_valid) else {
            return;
        };
        if let Err(e) = view.fly_to(coord, FOCUS_ZOOM, FOCUS_DURATION_MS) {
            tracing::warn!(store = %store.id, error = %e, "fly-to failed");
        }
        if let Some(entry) = self.markers.get(&store.id) {
            if let Err(e) = view.toggle_popup(entry.handle) {
                tracing::warn!(store = %store.id, error = %e, "popup toggle failed");
            }
        }
    }

    /// Update hover emphasis: enlarge and raise the hovered marker, restore
    /// the previous one. Idempotent for an unchanged hover target.
    pub fn set_hover(&mut self, view: &mut dyn MapView, store_id: Option<&str>) {
        if self.hovered.as_deref() == store_id {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            if let Some(entry) = self.markers.get(&prev) {
                apply_emphasis(view, &prev, entry.handle, MarkerSize::Medium, ZTier::Base);
            }
        }
        if let Some(id) = store_id {
            if let Some(entry) = self.markers.get(id) {
                apply_emphasis(view, id, entry.handle, MarkerSize::Large, ZTier::Raised);
                self.hovered = Some(id.to_string());
            }
        }
    }

    /// Release every marker handle and clear the registry. Runs on view
    /// unmount; afterwards the synchronizer can be reused for a fresh load.
    pub fn teardown(&mut self, view: &mut dyn MapView) {
        for (id, entry) in self.markers.drain() {
            if let Err(e) = view.remove(entry.handle) {
                tracing::warn!(store = %id, error = %e, "marker removal failed");
            }
        }
        self.hovered = None;
    }
}

fn apply_emphasis(
    view: &mut dyn MapView,
    id: &str,
    handle: MarkerHandle,
    size: MarkerSize,
    tier: ZTier,
) {
    if let Err(e) = view.set_size(handle, size) {
        tracing::warn!(store = %id, error = %e, "marker resize failed");
    }
    if let Err(e) = view.set_z(handle, tier) {
        tracing::warn!(store = %id, error = %e, "marker restack failed");
    }
}

/// Marker content derived from the store record and the classifier.
#[must_use]
pub fn marker_content(store: &Store) -> MarkerContent {
    MarkerContent {
        title: store.name.clone(),
        subtitle: store.neighborhood.name.clone(),
        category_label: store.primary_category.name.clone(),
        kind: classify_store(&store.name, store.card_description.as_deref()),
    }
}
