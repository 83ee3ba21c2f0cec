//! Scan request options and argument decoding.

use serde::{Deserialize, Serialize};

/// Page limit applied when the caller does not specify one.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Compression quality applied when the caller does not specify one.
/// 1.0 keeps full quality.
pub const DEFAULT_COMPRESSION_QUALITY: f64 = 1.0;

/// Output image format for captured pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG output; honors the request's compression quality.
    Jpg,
    /// Lossless PNG output.
    #[default]
    Png,
}

impl OutputFormat {
    /// File extension used for pages written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Parse a format name, falling back to PNG for unknown values.
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => OutputFormat::Jpg,
            _ => OutputFormat::Png,
        }
    }
}

/// Options for a single scan request. Immutable once a request starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    /// Maximum number of pages the capture flow may produce.
    pub max_pages: u32,
    /// Whether the capture flow may import existing images from the gallery.
    pub allow_gallery_import: bool,
    /// Output image format for captured pages. Consumed by the image-encoding
    /// collaborator, not by the orchestration core.
    pub output_format: OutputFormat,
    /// JPEG compression quality in `[0.0, 1.0]`.
    pub compression_quality: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            allow_gallery_import: false,
            output_format: OutputFormat::default(),
            compression_quality: DEFAULT_COMPRESSION_QUALITY,
        }
    }
}

impl ScanOptions {
    /// Decode options from a loosely-typed argument map.
    ///
    /// Every field is optional. Missing or malformed fields fall back to
    /// their defaults; decoding never fails the call.
    pub fn from_args(args: Option<&serde_json::Value>) -> Self {
        let map = match args.and_then(|value| value.as_object()) {
            Some(map) => map,
            None => return Self::default(),
        };

        let mut options = Self::default();
        if let Some(max_pages) = map.get("maxPages").and_then(|v| v.as_u64()) {
            options.max_pages = max_pages as u32;
        }
        if let Some(allow) = map.get("allowGalleryImport").and_then(|v| v.as_bool()) {
            options.allow_gallery_import = allow;
        }
        if let Some(format) = map.get("outputFormat").and_then(|v| v.as_str()) {
            options.output_format = OutputFormat::parse_or_default(format);
        }
        if let Some(quality) = map.get("compressionQuality").and_then(|v| v.as_f64()) {
            options.compression_quality = quality;
        }
        options
    }
}
