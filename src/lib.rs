//! fa-search - FontAwesome icon search for keyboard-driven launchers.
//!
//! Type part of an icon name, get ranked matches, copy them as HTML, class
//! names, unicode references or raw SVG. Icon artwork is recolored on disk to
//! match the user's preferred color.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`catalog`] - Icon catalog loading (read-only once loaded)
//! - [`core`] - Ranked search and re-exports of the core services
//! - [`services`] - Payload generation with its LRU cache, SVG recoloring
//! - [`engine`] - Query and preference-event handling on top of the above
//! - [`config`] - Configuration loading and management
//!
//! # Example
//!
//! ```ignore
//! use fa_search::{Config, SearchEngine};
//!
//! let config = Config::load();
//! let mut engine = SearchEngine::new(&config);
//!
//! for result in engine.query("home") {
//!     println!("{} - {}", result.name, result.description);
//! }
//! ```

pub mod assets;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod executor;
pub mod services;

mod error;

pub use assets::AssetPaths;
pub use catalog::{Catalog, IconRecord};
pub use config::Config;
pub use core::search::{rank, MatchResult, Tier};
pub use engine::{Preferences, SearchEngine, SearchResult};
pub use error::{IconError, IconResult};
pub use executor::ExecutionAction;
pub use services::format::{ContentGenerator, CopyFormat};
pub use services::recolor::{recolor, recolor_all, RecolorReport};
