//! Discovery session orchestration.
//!
//! Owns the loaded collections and the filter state, and replaces the
//! original page's implicit reactive recomputation with explicit calls:
//! every mutation runs the pure engine once, reconciles markers, and drives
//! the camera. The map lives behind [`thriftmap_map::MapView`], created on
//! session start and released on teardown.

pub mod session;
pub mod url;

pub use session::{DiscoverySession, FilterTab, LoadToken, LoadedContent};
