//! Icon catalog.
//!
//! The catalog is loaded once and never mutated afterwards. It is handed
//! around as `Arc<Catalog>` and replaced wholesale if it is ever reloaded.
//! Iteration order is the order of the source document, which the ranker
//! relies on to break ties between equally relevant icons.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{IconError, IconResult};

/// Style used when an icon lists no styles at all
pub const DEFAULT_STYLE: &str = "solid";

/// A single icon entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRecord {
    /// Unique human-readable name (the catalog key)
    #[serde(skip)]
    pub name: String,

    /// Filename-safe identifier of the SVG asset
    pub id: String,

    pub styles: Vec<String>,

    /// Codepoint in hex text form, empty when unknown
    pub unicode: String,

    pub search_terms: Vec<String>,
}

impl IconRecord {
    /// First listed style, or `solid` if none are listed
    pub fn primary_style(&self) -> &str {
        self.styles
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_STYLE)
    }
}

/// Record shape as stored in `fontawesome.json`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredRecord {
    id: Option<String>,
    styles: Vec<String>,
    unicode: String,
    search_terms: Vec<String>,
}

impl StoredRecord {
    fn into_record(self, name: String) -> IconRecord {
        IconRecord {
            id: self.id.unwrap_or_else(|| name.clone()),
            name,
            styles: self.styles,
            unicode: self.unicode,
            search_terms: self.search_terms,
        }
    }
}

/// Record shape of the upstream FontAwesome `icons.json` metadata.
///
/// Entries without a `label` are assumed to already be in stored form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpstreamRecord {
    label: Option<String>,
    id: Option<String>,
    styles: Vec<String>,
    unicode: String,
    search: UpstreamSearch,
    search_terms: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpstreamSearch {
    terms: Vec<String>,
}

impl UpstreamRecord {
    fn into_record(self, name: String) -> IconRecord {
        if self.label.is_some() {
            IconRecord {
                id: name.clone(),
                name,
                styles: self.styles,
                unicode: self.unicode,
                search_terms: self.search.terms,
            }
        } else {
            StoredRecord {
                id: self.id,
                styles: self.styles,
                unicode: self.unicode,
                search_terms: self.search_terms,
            }
            .into_record(name)
        }
    }
}

/// Read-only mapping from icon name to record, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    icons: IndexMap<String, IconRecord>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from records, keeping the given order.
    /// A later record with a duplicate name replaces the earlier one in place.
    pub fn from_records(records: impl IntoIterator<Item = IconRecord>) -> Self {
        let icons = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self { icons }
    }

    /// Parse the stored `fontawesome.json` layout
    pub fn from_json_str(json: &str) -> IconResult<Self> {
        let raw: IndexMap<String, StoredRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(
            raw.into_iter().map(|(name, stored)| stored.into_record(name)),
        ))
    }

    /// Convert upstream FontAwesome metadata into a catalog
    pub fn from_upstream_metadata(json: &str) -> IconResult<Self> {
        let raw: IndexMap<String, UpstreamRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(
            raw.into_iter()
                .map(|(name, upstream)| upstream.into_record(name)),
        ))
    }

    fn try_load(path: &Path) -> IconResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| IconError::asset(path, e))?;
        Self::from_json_str(&content)
            .map_err(|e| IconError::Catalog(format!("{}: {}", path.display(), e)))
    }

    /// Load the catalog file, degrading to an empty catalog on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                debug!("Loaded {} FontAwesome icons", catalog.len());
                catalog
            }
            Err(e) => {
                error!("Error loading FontAwesome icons: {}", e);
                Self::empty()
            }
        }
    }

    /// Write the catalog in the stored `fontawesome.json` layout
    pub fn write_json(&self, path: &Path) -> IconResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.icons)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Small dataset of common icons, used when no upstream metadata is available
    pub fn builtin() -> Self {
        const COMMON_ICONS: &[(&str, &[&str])] = &[
            ("address-book", &["contact", "directory", "index", "little black book"]),
            ("bell", &["alarm", "alert", "chime", "notification", "reminder"]),
            ("calendar", &["date", "event", "schedule", "time", "when"]),
            ("heart", &["favorite", "like", "love", "relationship", "valentine"]),
            ("home", &["abode", "building", "house", "main"]),
            ("search", &["find", "lookup", "magnifying glass", "explore"]),
            ("user", &["account", "avatar", "head", "human", "profile", "person"]),
            ("cog", &["gear", "mechanical", "settings", "sprocket", "wheel"]),
            ("envelope", &["e-mail", "email", "letter", "mail", "message"]),
            ("star", &["award", "favorite", "rating", "score"]),
            ("code", &["brackets", "development", "html", "programming"]),
            ("github", &["octocat", "social network", "version control"]),
            ("twitter", &["social network", "tweet", "bird"]),
            ("facebook", &["social network", "facebook-official"]),
            ("google", &["search", "search engine"]),
        ];
        const BRANDS: &[&str] = &["github", "twitter", "facebook", "google"];
        const WITH_REGULAR: &[&str] = &["address-book", "bell", "heart", "user", "envelope", "star"];

        Self::from_records(COMMON_ICONS.iter().map(|(name, terms)| {
            let styles: &[&str] = if BRANDS.contains(name) {
                &["brands"]
            } else if WITH_REGULAR.contains(name) {
                &["solid", "regular"]
            } else {
                &["solid"]
            };
            IconRecord {
                name: name.to_string(),
                id: name.to_string(),
                styles: styles.iter().map(|s| s.to_string()).collect(),
                unicode: String::new(),
                search_terms: terms.iter().map(|t| t.to_string()).collect(),
            }
        }))
    }

    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        self.icons.get(name)
    }

    /// Records in load order
    pub fn iter(&self) -> impl Iterator<Item = &IconRecord> {
        self.icons.values()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
