//! The Map View collaborator interface.
//!
//! A narrow, synchronous, imperative surface over whatever tile engine hosts
//! the map. Implementations mint opaque [`MarkerHandle`]s; the synchronizer
//! never inspects them, only hands them back.

use thiserror::Error;
use thriftmap_core::{Coordinate, StoreKind};

/// Opaque marker identity issued by a [`MapView`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Errors a view operation can raise. Callers treat every one as
/// per-operation: log, skip, continue with the rest of the batch.
#[derive(Debug, Error)]
pub enum MapViewError {
    #[error("marker operation failed: {0}")]
    Marker(String),
    #[error("camera operation failed: {0}")]
    Camera(String),
}

/// Rendered marker size; hover promotes to `Large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSize {
    Small,
    Medium,
    Large,
}

/// Stacking tier; hovered markers render above their neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZTier {
    Base,
    Raised,
}

/// What a marker displays: pin styling from the classifier kind, popup text
/// from the store record.
#[derive(Debug, Clone)]
pub struct MarkerContent {
    pub title: String,
    /// Neighborhood name shown under the title in the popup.
    pub subtitle: String,
    /// Primary category display name.
    pub category_label: String,
    pub kind: StoreKind,
}

/// Notifications the view raises back at the session. Events carry store ids,
/// not store values: the session resolves the id against its always-current
/// collection, so a reloaded collection never leaves stale captures behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(String),
    /// `None` means the pointer left whatever marker it was over.
    MarkerHovered(Option<String>),
}

/// Imperative operations the synchronizer drives.
///
/// All methods are synchronous and fallible; attach/detach move an existing
/// marker in and out of the live view without destroying it.
pub trait MapView {
    /// Create a marker at the coordinate. The marker starts detached.
    ///
    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the view cannot construct it.
    fn create_marker(
        &mut self,
        coord: Coordinate,
        content: MarkerContent,
    ) -> Result<MarkerHandle, MapViewError>;

    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn attach(&mut self, handle: MarkerHandle) -> Result<(), MapViewError>;

    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn detach(&mut self, handle: MarkerHandle) -> Result<(), MapViewError>;

    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn set_size(&mut self, handle: MarkerHandle, size: MarkerSize) -> Result<(), MapViewError>;

    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn set_z(&mut self, handle: MarkerHandle, tier: ZTier) -> Result<(), MapViewError>;

    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn toggle_popup(&mut self, handle: MarkerHandle) -> Result<(), MapViewError>;

    /// Destroy the marker and release its handle.
    ///
    /// # Errors
    ///
    /// Returns [`MapViewError::Marker`] if the handle is unknown to the view.
    fn remove(&mut self, handle: MarkerHandle) -> Result<(), MapViewError>;

    /// Move the camera center to the coordinate at the given zoom.
    ///
    /// # Errors
    ///
    /// Returns [`MapViewError::Camera`] if the move cannot be applied.
    fn fly_to(&mut self, coord: Coordinate, zoom: f64, duration_ms: u64)
        -> Result<(), MapViewError>;

    /// Frame the viewport to contain every coordinate, padded.
    ///
    /// # Errors
    ///
    /// Returns [`MapViewError::Camera`] if the bounds cannot be applied.
    fn fit_bounds(
        &mut self,
        coords: &[Coordinate],
        padding_px: u32,
        duration_ms: u64,
    ) -> Result<(), MapViewError>;
}
