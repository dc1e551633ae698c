//! SVG recoloring.
//!
//! Rewrites the `fill` color of icon assets in place. The rewrite is plain
//! text substitution:
//! - no `fill=` anywhere: a `fill` attribute is inserted right after the
//!   first `<svg`
//! - otherwise: every `fill="..."` in the document is replaced, not only the
//!   one on the root element
//!
//! Applying the same color twice yields byte-identical output.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::assets::AssetPaths;
use crate::error::{IconError, IconResult};

static FILL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"fill="[^"]*""#).expect("fill pattern is valid"));

/// Recolor SVG text in memory. Returns `None` when there is no `<svg` tag.
pub fn recolor_svg_text(svg: &str, color: &str) -> Option<String> {
    if !svg.contains("<svg") {
        return None;
    }

    let fill = format!(r#"fill="{}""#, color);
    let recolored = if svg.contains("fill=") {
        FILL_ATTR.replace_all(svg, NoExpand(&fill)).into_owned()
    } else {
        svg.replacen("<svg", &format!("<svg {}", fill), 1)
    };
    Some(recolored)
}

fn try_recolor(path: &Path, color: &str) -> IconResult<()> {
    if !path.exists() {
        return Err(IconError::MissingAsset(path.to_path_buf()));
    }

    let svg = fs::read_to_string(path).map_err(|e| IconError::asset(path, e))?;
    let recolored =
        recolor_svg_text(&svg, color).ok_or_else(|| IconError::InvalidSvg(path.to_path_buf()))?;
    fs::write(path, recolored).map_err(|e| IconError::asset(path, e))?;

    Ok(())
}

/// Recolor one SVG file in place. Never fails loudly: problems are logged and
/// reported as `false`, and nothing is written.
pub fn recolor(path: &Path, color: &str) -> bool {
    match try_recolor(path, color) {
        Ok(()) => true,
        Err(IconError::MissingAsset(path)) => {
            warn!("SVG file does not exist: {}", path.display());
            false
        }
        Err(IconError::InvalidSvg(path)) => {
            warn!("Invalid SVG file: {}", path.display());
            false
        }
        Err(e) => {
            error!("Error modifying SVG color: {}", e);
            false
        }
    }
}

/// Outcome of a full recolor pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecolorReport {
    pub recolored: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl RecolorReport {
    fn record(&mut self, path: PathBuf, ok: bool) {
        if ok {
            self.recolored.push(path);
        } else {
            self.failed.push(path);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// SVG files directly inside `dir`, sorted by file name
fn svg_files(dir: &Path) -> IconResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IconError::asset(dir, e))?;
        let path = entry.path();
        // `Path::is_file` follows symlinks, so linked assets are included
        if path.is_file() && path.extension().is_some_and(|ext| ext == "svg") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Recolor the fallback icon and every SVG in the icons directory.
///
/// Each file is handled independently; a failure is recorded in the report
/// and the pass moves on.
pub fn recolor_all(color: &str, base_dir: &Path) -> RecolorReport {
    let paths = AssetPaths::new(base_dir);
    let mut report = RecolorReport::default();

    let fallback = paths.fallback_icon();
    let ok = recolor(&fallback, color);
    report.record(fallback, ok);

    match svg_files(&paths.icons_dir()) {
        Ok(files) => {
            for path in files {
                let ok = recolor(&path, color);
                report.record(path, ok);
            }
        }
        Err(e) => error!("Error updating SVG colors: {}", e),
    }

    info!(
        "Recolored {} SVG files to {} ({} failed)",
        report.recolored.len(),
        color,
        report.failed.len()
    );
    report
}

/// Icon copied to `images/icon.svg` when no fallback icon exists yet
pub const FALLBACK_SOURCE_ID: &str = "font-awesome";

/// Create the fallback icon from the `font-awesome` icon asset and color it.
///
/// Returns `Ok(false)` when the fallback already exists or there is no
/// source asset to copy.
pub fn install_fallback_icon(base_dir: &Path, color: &str) -> IconResult<bool> {
    let paths = AssetPaths::new(base_dir);
    let fallback = paths.fallback_icon();
    if fallback.exists() {
        return Ok(false);
    }

    let source = paths.icon_svg(FALLBACK_SOURCE_ID);
    if !source.is_file() {
        warn!("No {} to use as default icon", source.display());
        return Ok(false);
    }

    fs::create_dir_all(paths.images_dir())?;
    fs::copy(&source, &fallback).map_err(|e| IconError::asset(&fallback, e))?;
    if !recolor(&fallback, color) {
        return Err(IconError::InvalidSvg(fallback));
    }

    info!("Created default icon at {}", fallback.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512"><path d="M0 0h512v512H0z"/></svg>"#;
    const FILLED: &str = r##"<svg fill="#000000" viewBox="0 0 10 10"><path fill="#000000" d="M0 0"/><path fill="none" d="M1 1"/></svg>"##;

    #[test]
    fn test_inserts_single_fill() {
        let out = recolor_svg_text(PLAIN, "#ff0000").unwrap();
        assert!(out.starts_with(r##"<svg fill="#ff0000" xmlns="##));
        assert_eq!(out.matches("fill=").count(), 1);
    }

    #[test]
    fn test_replaces_every_fill() {
        let out = recolor_svg_text(FILLED, "#7dcfff").unwrap();
        assert_eq!(out.matches(r##"fill="#7dcfff""##).count(), 3);
        assert!(!out.contains("#000000"));
        assert!(!out.contains(r#"fill="none""#));
    }

    #[test]
    fn test_rejects_non_svg() {
        assert_eq!(recolor_svg_text("<html></html>", "#fff"), None);
    }

    #[test]
    fn test_color_with_dollar_is_literal() {
        let out = recolor_svg_text(FILLED, "$1").unwrap();
        assert!(out.contains(r#"fill="$1""#));
    }

    #[test]
    fn test_recolor_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.svg");
        fs::write(&path, PLAIN).unwrap();

        assert!(recolor(&path, "#ff0000"));
        let first = fs::read_to_string(&path).unwrap();
        assert!(recolor(&path, "#ff0000"));
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_recolor_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.svg");
        assert!(!recolor(&path, "#ff0000"));
        assert!(!path.exists());
    }

    #[test]
    fn test_recolor_invalid_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.svg");
        fs::write(&path, "not an image").unwrap();

        assert!(!recolor(&path, "#ff0000"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not an image");
    }

    #[test]
    fn test_recolor_all_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::new(dir.path());
        fs::create_dir_all(paths.icons_dir()).unwrap();
        fs::write(paths.fallback_icon(), PLAIN).unwrap();
        fs::write(paths.icon_svg("a"), FILLED).unwrap();
        fs::write(paths.icon_svg("b"), "corrupted").unwrap();
        fs::write(paths.icon_svg("c"), PLAIN).unwrap();
        fs::write(paths.icons_dir().join("notes.txt"), "<svg>").unwrap();

        let report = recolor_all("#123456", dir.path());

        assert_eq!(report.failed, vec![paths.icon_svg("b")]);
        assert_eq!(
            report.recolored,
            vec![paths.fallback_icon(), paths.icon_svg("a"), paths.icon_svg("c")]
        );
        for id in ["a", "c"] {
            let svg = fs::read_to_string(paths.icon_svg(id)).unwrap();
            assert!(svg.contains(r##"fill="#123456""##));
        }
        assert_eq!(
            fs::read_to_string(paths.icons_dir().join("notes.txt")).unwrap(),
            "<svg>"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_recolor_all_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::new(dir.path());
        fs::create_dir_all(paths.icons_dir()).unwrap();
        let target = dir.path().join("shared.svg");
        fs::write(&target, PLAIN).unwrap();
        std::os::unix::fs::symlink(&target, paths.icon_svg("linked")).unwrap();

        let report = recolor_all("#abcdef", dir.path());

        assert!(report.recolored.contains(&paths.icon_svg("linked")));
        assert!(fs::read_to_string(&target).unwrap().contains(r##"fill="#abcdef""##));
    }

    #[test]
    fn test_install_fallback_icon() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::new(dir.path());
        fs::create_dir_all(paths.icons_dir()).unwrap();
        fs::write(paths.icon_svg(FALLBACK_SOURCE_ID), PLAIN).unwrap();

        assert!(install_fallback_icon(dir.path(), "#7dcfff").unwrap());
        let fallback = fs::read_to_string(paths.fallback_icon()).unwrap();
        assert!(fallback.starts_with(r##"<svg fill="#7dcfff""##));

        // Existing fallback is left alone
        assert!(!install_fallback_icon(dir.path(), "#000000").unwrap());
        assert_eq!(fs::read_to_string(paths.fallback_icon()).unwrap(), fallback);

        let report = recolor_all("#7dcfff", dir.path());
        assert!(report.is_clean());
    }

    #[test]
    fn test_install_fallback_icon_without_source() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!install_fallback_icon(dir.path(), "#7dcfff").unwrap());
        assert!(!AssetPaths::new(dir.path()).fallback_icon().exists());
    }

    #[test]
    fn test_recolor_all_without_icons_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = recolor_all("#123456", dir.path());
        assert!(report.recolored.is_empty());
        assert_eq!(report.failed, vec![AssetPaths::new(dir.path()).fallback_icon()]);
    }
}
