pub mod cache;
pub mod format;
pub mod recolor;

pub use cache::LruCache;
pub use format::{AssetReader, ContentGenerator, CopyFormat, FormatRequest, FsAssetReader, StyleCode};
pub use recolor::{recolor, recolor_all, RecolorReport};
