//! Content Repository collaborator.
//!
//! Typed access to the CMS content API. Raw documents arrive in the CMS wire
//! shape (`wire`), are normalized into `thriftmap-core` records (`normalize`),
//! and are served through the [`ContentRepository`] trait by either the HTTP
//! client or the in-memory fixture repository. Failures degrade to empty
//! collections at this boundary — the engine and session never see them.

pub mod client;
pub mod error;
pub mod memory;
pub mod normalize;
pub mod repository;
pub mod wire;

pub use client::HttpContentClient;
pub use error::ContentError;
pub use memory::InMemoryRepository;
pub use repository::ContentRepository;
