use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::book::Cover;
use crate::error::{Error, Result};

/// Site build configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "content_root": "pages", "cover": { "title": "Field Notes" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory scanned for content files.
    pub content_root: PathBuf,
    /// Directory the static site is written to.
    pub output_dir: PathBuf,
    pub cover: Cover,
    /// Page size handed to the page-flip widget, in CSS pixels.
    pub page_width: u32,
    pub page_height: u32,
    /// Local storage key holding the reading position.
    pub storage_key: String,
    /// Render worker threads (None = rayon's global pool).
    pub jobs: Option<usize>,
    /// Static files copied verbatim into the output, such as the cover
    /// image. Skipped when the directory does not exist.
    pub assets_dir: Option<PathBuf>,
    /// URL of the page-flip widget's browser bundle.
    pub pageflip_script: String,
    /// Module path of the `wasm` build's JS glue, relative to `index.html`.
    pub wasm_module: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("codex"),
            output_dir: PathBuf::from("dist"),
            cover: Cover::default(),
            page_width: 550,
            page_height: 730,
            storage_key: "codex.page".to_string(),
            jobs: None,
            assets_dir: Some(PathBuf::from("public")),
            pageflip_script: "https://cdn.jsdelivr.net/npm/page-flip@2.0.7/dist/js/page-flip.browser.js"
                .to_string(),
            wasm_module: "./pkg/codex.js".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Set the static assets directory; `None` copies nothing.
    pub fn with_assets_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.assets_dir = dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.content_root, PathBuf::from("codex"));
        assert_eq!(config.storage_key, "codex.page");
        assert_eq!(config.cover.title, "The Codex");
        assert_eq!((config.page_width, config.page_height), (550, 730));
        assert_eq!(config.assets_dir, Some(PathBuf::from("public")));
        assert_eq!(config.wasm_module, "./pkg/codex.js");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(
            &path,
            r#"{ "content_root": "pages", "cover": { "title": "Field Notes" }, "jobs": 2 }"#,
        )
        .unwrap();

        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.content_root, PathBuf::from("pages"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.cover.title, "Field Notes");
        assert_eq!(config.cover.image, "/cover.jpg");
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.assets_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_null_assets_dir_disables_copying() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{ "assets_dir": null }"#).unwrap();

        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.assets_dir, None);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            SiteConfig::from_file(&path).unwrap_err(),
            Error::Config { .. }
        ));
        assert!(matches!(
            SiteConfig::from_file(dir.path().join("missing.json")).unwrap_err(),
            Error::ConfigIo { .. }
        ));
    }

    #[test]
    fn test_builder() {
        let config = SiteConfig::new()
            .with_content_root("content")
            .with_output_dir("public")
            .with_cover(Cover::new("Notes"))
            .with_jobs(4)
            .with_assets_dir(None);
        assert_eq!(config.content_root, PathBuf::from("content"));
        assert_eq!(config.assets_dir, None);
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.cover.title, "Notes");
        assert_eq!(config.jobs, Some(4));
    }
}
