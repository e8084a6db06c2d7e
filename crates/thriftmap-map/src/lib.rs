//! Map collaborator boundary and the marker/viewport synchronizer.
//!
//! The rendering engine sits behind the [`MapView`] trait; this crate owns
//! the marker lifecycle (create once, attach/detach per filter change, never
//! recreate) and the camera policy (focus a selected store, otherwise fit the
//! visible subset).

pub mod sync;
pub mod view;

pub use sync::{
    MarkerSynchronizer, FIT_DURATION_MS, FIT_PADDING_PX, FOCUS_DURATION_MS, FOCUS_ZOOM,
};
pub use view::{MapEvent, MapView, MapViewError, MarkerContent, MarkerHandle, MarkerSize, ZTier};
