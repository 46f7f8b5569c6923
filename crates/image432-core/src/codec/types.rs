//! Encoder configuration.

use std::path::Path;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// Lossy JPEG at [`EncodeOptions::jpeg_quality`].
    Jpeg,
}

impl OutputFormat {
    /// Infer the format from a path's extension (`png`, `jpg`, `jpeg`, any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        ImageFormat::from_path(path)
            .ok()
            .and_then(Self::from_image_format)
    }

    /// Map an `image` crate format onto a supported output format.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(OutputFormat::Png),
            ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Options controlling how a buffer is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Output format. `None` infers it from the destination's extension.
    pub format: Option<OutputFormat>,
    /// JPEG quality (1-100). Out-of-range values are clamped.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncodeOptions {
    /// Options that always write `format`, regardless of extension.
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    /// Format to write to `path`: the configured one, else inferred.
    pub fn resolve_format(&self, path: &Path) -> Option<OutputFormat> {
        self.format.or_else(|| OutputFormat::from_path(path))
    }
}
