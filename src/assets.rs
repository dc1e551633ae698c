//! On-disk layout of the icon assets.

use std::path::{Path, PathBuf};

/// Paths derived from the asset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    base_dir: PathBuf,
}

impl AssetPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn images_dir(&self) -> PathBuf {
        self.base_dir.join("images")
    }

    /// Icon shown when an icon has no asset of its own
    pub fn fallback_icon(&self) -> PathBuf {
        self.images_dir().join("icon.svg")
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.images_dir().join("icons")
    }

    /// `images/icons/{id}.svg`
    pub fn icon_svg(&self, icon_id: &str) -> PathBuf {
        self.icons_dir().join(format!("{}.svg", icon_id))
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.base_dir.join("data").join("fontawesome.json")
    }

    /// Icon to display for a result: its own SVG when present, else the fallback
    pub fn display_icon(&self, icon_id: &str) -> PathBuf {
        let path = self.icon_svg(icon_id);
        if path.exists() {
            path
        } else {
            self.fallback_icon()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = AssetPaths::new("/opt/fa");
        assert_eq!(paths.fallback_icon(), PathBuf::from("/opt/fa/images/icon.svg"));
        assert_eq!(
            paths.icon_svg("home"),
            PathBuf::from("/opt/fa/images/icons/home.svg")
        );
        assert_eq!(
            paths.catalog_file(),
            PathBuf::from("/opt/fa/data/fontawesome.json")
        );
    }

    #[test]
    fn test_display_icon_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::new(dir.path());
        assert_eq!(paths.display_icon("home"), paths.fallback_icon());

        std::fs::create_dir_all(paths.icons_dir()).unwrap();
        std::fs::write(paths.icon_svg("home"), "<svg></svg>").unwrap();
        assert_eq!(paths.display_icon("home"), paths.icon_svg("home"));
    }
}
