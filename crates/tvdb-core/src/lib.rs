//! TheTVDB Catalog Client Library
//!
//! This crate provides a read-through client for TheTVDB's XML API.
//!
//! # Features
//! - Search for TV series by name, with per-session memoization
//! - Get series by native, IMDB or zap2it id
//! - Lazily populated shows with full season and episode data
//! - Episode lookup by id, broadcast/DVD/absolute order or air date
//! - Random mirror selection by capability mask
//! - Optional on-disk response cache

pub mod api;
pub mod attrs;
pub mod error;
pub mod language;
pub mod loader;
pub mod mirror;
pub mod model;
pub mod urls;
pub mod xml;

// Re-export main types for convenience
pub use api::{ClientConfig, EpisodeQuery, SeriesId, Tvdb};
pub use attrs::{AttributeMap, Value};
pub use error::{Error, Result};
pub use language::{Language, LANGUAGES};
pub use loader::{HttpLoader, Loader};
pub use mirror::{Mirror, MirrorList};
pub use model::{Actor, Banner, Episode, Search, Season, Show};
