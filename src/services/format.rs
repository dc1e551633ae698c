//! Copy payload generation.
//!
//! Every format except `svg` is a pure string transform. `svg` reads the
//! icon's asset file and falls back to the `html` snippet when the file is
//! missing or unreadable.
//!
//! Results are memoized per [`FormatRequest`] in a bounded LRU cache. The
//! recolor pass rewrites the same SVG files without touching this cache, so
//! a cached `svg` payload can carry an old fill color until it is evicted or
//! [`ContentGenerator::clear_cache`] is called.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::assets::AssetPaths;
use crate::error::{IconError, IconResult};
use crate::services::cache::LruCache;

/// Number of payloads kept by [`ContentGenerator::new`]
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// What ends up on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CopyFormat {
    #[default]
    Html,
    Class,
    Unicode,
    Svg,
}

impl CopyFormat {
    /// Parse a format name. Only the exact lower-case names are recognized,
    /// anything else is treated as `html`.
    pub fn parse(format: &str) -> Self {
        match format {
            "class" => CopyFormat::Class,
            "unicode" => CopyFormat::Unicode,
            "svg" => CopyFormat::Svg,
            _ => CopyFormat::Html,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyFormat::Html => "html",
            CopyFormat::Class => "class",
            CopyFormat::Unicode => "unicode",
            CopyFormat::Svg => "svg",
        }
    }
}

impl From<&str> for CopyFormat {
    fn from(format: &str) -> Self {
        Self::parse(format)
    }
}

impl fmt::Display for CopyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-letter style prefix used in FontAwesome class names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCode {
    Solid,
    Regular,
    Brands,
}

impl StyleCode {
    /// `solid` and `regular` map to themselves, everything else is `brands`
    pub fn from_style(style: &str) -> Self {
        match style {
            "solid" => StyleCode::Solid,
            "regular" => StyleCode::Regular,
            _ => StyleCode::Brands,
        }
    }

    pub fn code(&self) -> char {
        match self {
            StyleCode::Solid => 's',
            StyleCode::Regular => 'r',
            StyleCode::Brands => 'b',
        }
    }
}

/// Cache key: the full set of inputs that determine a payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatRequest {
    pub format: CopyFormat,
    pub icon_name: String,
    pub icon_id: String,
    pub unicode: String,
    pub style: String,
    pub asset_root: PathBuf,
}

impl FormatRequest {
    pub fn new(
        format: impl Into<CopyFormat>,
        icon_name: &str,
        icon_id: &str,
        unicode: &str,
        style: &str,
        asset_root: &Path,
    ) -> Self {
        Self {
            format: format.into(),
            icon_name: icon_name.to_string(),
            icon_id: icon_id.to_string(),
            unicode: unicode.to_string(),
            style: style.to_string(),
            asset_root: asset_root.to_path_buf(),
        }
    }

    fn class(&self) -> String {
        format!(
            "fa{} fa-{}",
            StyleCode::from_style(&self.style).code(),
            self.icon_name
        )
    }

    fn html(&self) -> String {
        format!(r#"<i class="{}"></i>"#, self.class())
    }
}

/// Source of SVG text for the `svg` format
pub trait AssetReader {
    fn read_svg(&self, path: &Path) -> IconResult<String>;
}

/// Reads assets straight from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetReader;

impl AssetReader for FsAssetReader {
    fn read_svg(&self, path: &Path) -> IconResult<String> {
        if !path.exists() {
            return Err(IconError::MissingAsset(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| IconError::asset(path, e))
    }
}

/// Build a payload without caching
pub fn render(request: &FormatRequest, reader: &impl AssetReader) -> String {
    match request.format {
        CopyFormat::Html => request.html(),
        CopyFormat::Class => request.class(),
        CopyFormat::Unicode => {
            if request.unicode.is_empty() {
                request.class()
            } else {
                format!("&#{};", request.unicode)
            }
        }
        CopyFormat::Svg => {
            let path = AssetPaths::new(&request.asset_root).icon_svg(&request.icon_id);
            match reader.read_svg(&path) {
                Ok(svg) => svg,
                Err(IconError::MissingAsset(path)) => {
                    debug!("No SVG asset at {}, copying HTML instead", path.display());
                    request.html()
                }
                Err(e) => {
                    error!("Error reading SVG file: {}", e);
                    request.html()
                }
            }
        }
    }
}

/// Memoizing payload generator
#[derive(Debug)]
pub struct ContentGenerator<R: AssetReader = FsAssetReader> {
    reader: R,
    cache: LruCache<FormatRequest, String>,
}

impl ContentGenerator<FsAssetReader> {
    pub fn new() -> Self {
        Self::with_reader(FsAssetReader, DEFAULT_CACHE_CAPACITY)
    }
}

impl Default for ContentGenerator<FsAssetReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AssetReader> ContentGenerator<R> {
    pub fn with_reader(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            cache: LruCache::new(capacity),
        }
    }

    /// Payload for `request`, served from cache when the same request was seen
    pub fn generate_request(&mut self, request: FormatRequest) -> String {
        if let Some(cached) = self.cache.get(&request) {
            return cached.clone();
        }

        let content = render(&request, &self.reader);
        self.cache.put(request, content.clone());
        content
    }

    pub fn generate(
        &mut self,
        format: &str,
        icon_name: &str,
        icon_id: &str,
        unicode: &str,
        style: &str,
        asset_root: &Path,
    ) -> String {
        self.generate_request(FormatRequest::new(
            format, icon_name, icon_id, unicode, style, asset_root,
        ))
    }

    /// Drop every memoized payload, e.g. to pick up freshly recolored SVGs
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}
