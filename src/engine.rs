//! Search engine - the state behind the launcher keyword.
//!
//! Holds the loaded catalog, the current preferences and the payload
//! generator, and turns queries and preference events into result lists and
//! recolor passes. Dispatching events from the host launcher is left to the
//! caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::assets::AssetPaths;
use crate::catalog::{Catalog, IconRecord};
use crate::config::{clamp_max_results, is_valid_color, Config, PreferencesConfig, DEFAULT_COPY_FORMAT, DEFAULT_ICON_COLOR};
use crate::core::search::{rank, DEFAULT_LIMIT};
use crate::executor::ExecutionAction;
use crate::services::format::{AssetReader, ContentGenerator, CopyFormat, FormatRequest, FsAssetReader};
use crate::services::recolor::{recolor_all, RecolorReport};

/// Number of search terms shown in a result description
const MAX_DESCRIPTION_TERMS: usize = 5;

/// User-facing preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub copy_format: CopyFormat,
    pub icon_color: String,
    pub max_results: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            copy_format: CopyFormat::parse(DEFAULT_COPY_FORMAT),
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            max_results: DEFAULT_LIMIT,
        }
    }
}

impl From<&PreferencesConfig> for Preferences {
    fn from(config: &PreferencesConfig) -> Self {
        Self {
            copy_format: CopyFormat::parse(&config.copy_format),
            icon_color: config.icon_color.clone(),
            max_results: clamp_max_results(config.max_results as usize),
        }
    }
}

/// One row in the launcher's result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub name: String,
    pub description: String,
    /// SVG shown next to the row
    pub icon: PathBuf,
    pub action: ExecutionAction,
}

/// `solid` -> `Solid`
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn describe(icon: &IconRecord) -> String {
    let mut description = format!("FontAwesome {} icon", capitalize(icon.primary_style()));
    if !icon.search_terms.is_empty() {
        let terms: Vec<&str> = icon
            .search_terms
            .iter()
            .take(MAX_DESCRIPTION_TERMS)
            .map(String::as_str)
            .collect();
        description.push_str(" - ");
        description.push_str(&terms.join(", "));
    }
    description
}

pub struct SearchEngine<R: AssetReader = FsAssetReader> {
    catalog: Arc<Catalog>,
    preferences: Preferences,
    generator: ContentGenerator<R>,
    assets: AssetPaths,
}

impl SearchEngine<FsAssetReader> {
    /// Load the catalog from the asset root and run the startup recolor pass
    pub fn new(config: &Config) -> Self {
        let assets = AssetPaths::new(&config.paths.base_dir);
        let catalog = Arc::new(Catalog::load(&assets.catalog_file()));
        let mut engine = Self::with_parts(
            catalog,
            Preferences::from(&config.preferences),
            ContentGenerator::new(),
            assets.base_dir(),
        );
        engine.recolor();
        engine
    }
}

impl<R: AssetReader> SearchEngine<R> {
    /// Assemble an engine without touching the filesystem
    pub fn with_parts(
        catalog: Arc<Catalog>,
        preferences: Preferences,
        generator: ContentGenerator<R>,
        base_dir: &Path,
    ) -> Self {
        Self {
            catalog,
            preferences,
            generator,
            assets: AssetPaths::new(base_dir),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    /// Swap in a freshly loaded catalog from the asset root
    pub fn reload_catalog(&mut self) {
        self.catalog = Arc::new(Catalog::load(&self.assets.catalog_file()));
    }

    fn hint(&self, name: &str, description: String) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            description,
            icon: self.assets.fallback_icon(),
            action: ExecutionAction::HideWindow,
        }
    }

    /// Clipboard payload for `icon` in the given format
    pub fn copy_content(&mut self, icon: &IconRecord, format: CopyFormat) -> String {
        self.generator.generate_request(FormatRequest::new(
            format,
            &icon.name,
            &icon.id,
            &icon.unicode,
            icon.primary_style(),
            self.assets.base_dir(),
        ))
    }

    /// Results for the text typed after the keyword
    pub fn query(&mut self, text: &str) -> Vec<SearchResult> {
        let query = text.trim();
        if query.is_empty() {
            return vec![self.hint(
                "Search FontAwesome Icons",
                "Type to search FontAwesome icons by name".to_string(),
            )];
        }

        let catalog = Arc::clone(&self.catalog);
        let matches = rank(query, &catalog, self.preferences.max_results);
        debug!("Query {:?} matched {} icons", query, matches.len());

        if matches.is_empty() {
            return vec![self.hint(
                "No matching icons found",
                format!("No FontAwesome icons match '{}'", query),
            )];
        }

        let format = self.preferences.copy_format;
        matches
            .into_iter()
            .map(|icon| SearchResult {
                name: icon.name.clone(),
                description: describe(icon),
                icon: self.assets.display_icon(&icon.id),
                action: ExecutionAction::copy(self.copy_content(icon, format)),
            })
            .collect()
    }

    /// Recolor every asset with the current icon color
    pub fn recolor(&self) -> RecolorReport {
        recolor_all(&self.preferences.icon_color, self.assets.base_dir())
    }

    fn set_icon_color(&mut self, color: &str) -> bool {
        if is_valid_color(color) {
            self.preferences.icon_color = color.trim().to_string();
            true
        } else {
            warn!("Ignoring invalid icon color {:?}", color);
            false
        }
    }

    /// Full preference snapshot from the host; always followed by a recolor pass
    pub fn on_preferences(&mut self, preferences: &HashMap<String, String>) -> RecolorReport {
        self.preferences.copy_format = preferences
            .get("copy_format")
            .map(|f| CopyFormat::parse(f))
            .unwrap_or_default();

        let color = preferences
            .get("icon_color")
            .map(String::as_str)
            .unwrap_or(DEFAULT_ICON_COLOR);
        if !self.set_icon_color(color) {
            self.preferences.icon_color = DEFAULT_ICON_COLOR.to_string();
        }

        self.preferences.max_results = clamp_max_results(
            preferences
                .get("max_results")
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or(DEFAULT_LIMIT),
        );

        info!("Preferences loaded, icon color {}", self.preferences.icon_color);
        self.recolor()
    }

    /// A single preference changed. Returns the recolor report when the
    /// change triggered a recolor pass.
    pub fn on_preference_update(&mut self, id: &str, value: &str) -> Option<RecolorReport> {
        match id {
            "copy_format" => {
                self.preferences.copy_format = CopyFormat::parse(value);
                None
            }
            "icon_color" => {
                if self.set_icon_color(value) {
                    Some(self.recolor())
                } else {
                    None
                }
            }
            "max_results" => {
                match value.trim().parse() {
                    Ok(n) => self.preferences.max_results = clamp_max_results(n),
                    Err(_) => warn!("Ignoring invalid max_results {:?}", value),
                }
                None
            }
            other => {
                debug!("Ignoring unknown preference {:?}", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn engine_in(dir: &Path) -> SearchEngine {
        SearchEngine::with_parts(
            Arc::new(Catalog::builtin()),
            Preferences::default(),
            ContentGenerator::new(),
            dir,
        )
    }

    #[test]
    fn test_empty_query_hint() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());

        let results = engine.query("   ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Search FontAwesome Icons");
        assert_eq!(results[0].action, ExecutionAction::HideWindow);
        assert_eq!(results[0].icon, engine.assets().fallback_icon());
    }

    #[test]
    fn test_no_match_hint() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());

        let results = engine.query("qwerty");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "No matching icons found");
        assert_eq!(results[0].description, "No FontAwesome icons match 'qwerty'");
    }

    #[test]
    fn test_result_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());

        let results = engine.query("home");
        assert_eq!(results[0].name, "home");
        assert_eq!(
            results[0].description,
            "FontAwesome Solid icon - abode, building, house, main"
        );
        assert_eq!(
            results[0].action.clipboard_text(),
            Some(r#"<i class="fas fa-home"></i>"#)
        );
        assert_eq!(results[0].icon, engine.assets().fallback_icon());
    }

    #[test]
    fn test_description_caps_terms() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());

        let user = engine.query("user").remove(0);
        assert_eq!(
            user.description,
            "FontAwesome Solid icon - account, avatar, head, human, profile"
        );
        let github = engine.query("github").remove(0);
        assert!(github.description.starts_with("FontAwesome Brands icon"));
    }

    #[test]
    fn test_uses_icon_asset_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        fs::create_dir_all(engine.assets().icons_dir()).unwrap();
        fs::write(engine.assets().icon_svg("bell"), "<svg></svg>").unwrap();

        let bell = engine.query("bell").remove(0);
        assert_eq!(bell.icon, engine.assets().icon_svg("bell"));
    }

    #[test]
    fn test_max_results_respected() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        engine.on_preference_update("max_results", "2");

        assert_eq!(engine.query("e").len(), 2);
    }

    #[test]
    fn test_zero_max_results_still_matches() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        engine.on_preference_update("max_results", "0");

        assert_eq!(engine.preferences().max_results, 1);
        let results = engine.query("home");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "home");
    }

    #[test]
    fn test_snapshot_max_results_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        let prefs: HashMap<String, String> =
            [("max_results".to_string(), "999".to_string())].into_iter().collect();

        engine.on_preferences(&prefs);
        assert_eq!(engine.preferences().max_results, 50);
    }

    #[test]
    fn test_copy_format_update() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        assert!(engine.on_preference_update("copy_format", "class").is_none());

        let star = engine.query("star").remove(0);
        assert_eq!(star.action.clipboard_text(), Some("fas fa-star"));
    }

    #[test]
    fn test_color_update_recolors_assets() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        let assets = engine.assets().clone();
        fs::create_dir_all(assets.icons_dir()).unwrap();
        fs::write(assets.fallback_icon(), "<svg></svg>").unwrap();
        fs::write(assets.icon_svg("home"), r##"<svg fill="#000000"></svg>"##).unwrap();

        let report = engine.on_preference_update("icon_color", "#ff0000").unwrap();
        assert!(report.is_clean());
        assert_eq!(engine.preferences().icon_color, "#ff0000");
        assert_eq!(
            fs::read_to_string(assets.icon_svg("home")).unwrap(),
            r##"<svg fill="#ff0000"></svg>"##
        );
        assert_eq!(
            fs::read_to_string(assets.fallback_icon()).unwrap(),
            r##"<svg fill="#ff0000"></svg>"##
        );
    }

    #[test]
    fn test_invalid_color_update_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        assert!(engine.on_preference_update("icon_color", "\"><").is_none());
        assert_eq!(engine.preferences().icon_color, DEFAULT_ICON_COLOR);
    }

    #[test]
    fn test_full_preferences_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        let prefs: HashMap<String, String> = [
            ("copy_format", "unicode"),
            ("icon_color", "#00ff00"),
            ("max_results", "not a number"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        engine.on_preferences(&prefs);
        assert_eq!(
            engine.preferences(),
            &Preferences {
                copy_format: CopyFormat::Unicode,
                icon_color: "#00ff00".to_string(),
                max_results: DEFAULT_LIMIT,
            }
        );
    }

    #[test]
    fn test_new_loads_catalog_and_recolors() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetPaths::new(dir.path());
        Catalog::builtin().write_json(&assets.catalog_file()).unwrap();
        fs::create_dir_all(assets.icons_dir()).unwrap();
        fs::write(assets.fallback_icon(), "<svg></svg>").unwrap();

        let mut config = Config::default();
        config.paths.base_dir = dir.path().to_path_buf();
        let mut engine = SearchEngine::new(&config);

        assert_eq!(engine.catalog().len(), 15);
        assert_eq!(
            fs::read_to_string(assets.fallback_icon()).unwrap(),
            format!(r#"<svg fill="{}"></svg>"#, DEFAULT_ICON_COLOR)
        );
        assert_eq!(engine.query("cog")[0].name, "cog");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("solid"), "Solid");
        assert_eq!(capitalize("BRANDS"), "Brands");
        assert_eq!(capitalize(""), "");
    }
}
