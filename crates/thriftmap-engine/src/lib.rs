//! Pure store-discovery computations.
//!
//! Filtering, searching, and sorting of the loaded store collection, plus the
//! derived autocomplete index. Everything here is a deterministic function of
//! its inputs with no side effects, so the session can recompute freely on
//! every keystroke.

pub mod autocomplete;
pub mod filter;

pub use autocomplete::{build_index, search_index, AutocompleteOption, OptionKind, SUGGESTION_LIMIT};
pub use filter::{apply, apply_from, FilterSpec, SortKey};
