//! Core engine module - host-agnostic business logic.
//!
//! This module contains the functionality that doesn't depend on the
//! launcher hosting the extension:
//! - Ranked icon search
//! - Copy payload generation
//! - SVG recoloring

pub mod search;

pub use crate::services::format::{self, ContentGenerator, CopyFormat, FormatRequest, StyleCode};
pub use crate::services::recolor::{self, RecolorReport};
pub use search::{rank, rank_matches, MatchResult, Tier};
