//! Configuration management for docuscan.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::{OutputFormat, ScanOptions};

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory where captured pages are written.
    pub output_dir: PathBuf,
    /// Scan defaults applied when a request leaves fields unset.
    pub scan_defaults: ScanOptions,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/Documents/docuscan/ for captured pages
        // Falls back gracefully: Documents dir -> Home dir -> Current dir
        let output_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docuscan");

        Self {
            output_dir,
            scan_defaults: ScanOptions::default(),
        }
    }
}

impl Settings {
    /// Create settings with a custom output directory.
    pub fn with_output_dir(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Default::default()
        }
    }

    /// Ensure the output directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output directory for captured pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// Default page limit for scan requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    /// Whether gallery import is allowed by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_gallery_import: Option<bool>,
    /// Default output image format ("jpg" or "png").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    /// Default JPEG compression quality in [0.0, 1.0].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_quality: Option<f64>,

    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a specific file path.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref output_dir) = self.output_dir {
            settings.output_dir = self.resolve_path(output_dir, base_dir);
        }
        if let Some(max_pages) = self.max_pages {
            settings.scan_defaults.max_pages = max_pages;
        }
        if let Some(allow) = self.allow_gallery_import {
            settings.scan_defaults.allow_gallery_import = allow;
        }
        if let Some(ref format) = self.output_format {
            settings.scan_defaults.output_format = OutputFormat::parse_or_default(format);
        }
        if let Some(quality) = self.compression_quality {
            settings.scan_defaults.compression_quality = quality;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path.
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Override output directory (--output-dir flag).
    pub output_dir: Option<PathBuf>,
}

/// Load settings with explicit options.
pub async fn load_settings_with_options(options: LoadOptions) -> Settings {
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path).await.unwrap_or_default(),
        None => Config::default(),
    };

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let base_dir = if options.use_cwd {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };

    config.apply_to_settings(&mut settings, &base_dir);

    // --output-dir override takes precedence
    if let Some(output_dir) = options.output_dir {
        settings.output_dir = output_dir;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_settings_overrides_scan_defaults() {
        let config = Config {
            output_dir: Some("/var/scans".to_string()),
            max_pages: Some(5),
            allow_gallery_import: Some(true),
            output_format: Some("jpg".to_string()),
            compression_quality: Some(0.8),
            source_path: None,
        };

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc"));

        assert_eq!(settings.output_dir, PathBuf::from("/var/scans"));
        assert_eq!(settings.scan_defaults.max_pages, 5);
        assert!(settings.scan_defaults.allow_gallery_import);
        assert_eq!(settings.scan_defaults.output_format, OutputFormat::Jpg);
        assert_eq!(settings.scan_defaults.compression_quality, 0.8);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = Config::default();
        let mut settings = Settings::default();
        let defaults = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc"));

        assert_eq!(settings.output_dir, defaults.output_dir);
        assert_eq!(settings.scan_defaults, defaults.scan_defaults);
    }

    #[test]
    fn test_resolve_path_relative_and_absolute() {
        let config = Config::default();
        assert_eq!(
            config.resolve_path("/abs/scans", Path::new("/base")),
            PathBuf::from("/abs/scans")
        );
        assert_eq!(
            config.resolve_path("scans", Path::new("/base")),
            PathBuf::from("/base/scans")
        );
    }
}
