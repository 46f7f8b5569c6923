//! Error types shared by every pixel buffer operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by pixel buffer loading, transforms and saving.
#[derive(Debug, Error)]
pub enum PixelBufferError {
    /// The load path does not refer to an existing file.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but the codec cannot interpret it as an image.
    #[error("Unrecognized image format: {}", path.display())]
    UnrecognizedFormat { path: PathBuf },

    /// The file is a valid image but exceeds the decoder's size or memory limits.
    #[error("Image exceeds decoding limits: {}: {reason}", path.display())]
    ImageTooLarge { path: PathBuf, reason: String },

    /// An operation that needs pixel data was called on an empty buffer.
    #[error("Pixel buffer is uninitialized; load an image first")]
    UninitializedBuffer,

    /// The kernel is not a rectangular matrix of finite weights.
    #[error("Invalid kernel type: {0}")]
    InvalidKernelType(String),

    /// The kernel has an even number of rows or columns.
    #[error("Kernel dimensions must be odd, got {rows}x{cols}")]
    NonOddKernelDimensions { rows: usize, cols: usize },

    /// The kernel has a different number of rows and columns.
    #[error("Kernel must be square, got {rows}x{cols}")]
    NonSquareKernel { rows: usize, cols: usize },

    /// The kernel weights sum to zero, so the weighted mean is undefined.
    #[error("Degenerate kernel: weights sum to zero")]
    DegenerateKernel,

    /// `save` was called without a path on a buffer that was never loaded from one.
    #[error("No destination specified for save")]
    NoDestinationSpecified,

    /// Pixelation block size must be at least one pixel.
    #[error("Invalid block size: must be greater than zero")]
    InvalidBlockSize,

    /// Planes or raw samples disagree with the declared dimensions.
    #[error("Plane dimension mismatch: expected {expected}, got {actual}")]
    PlaneDimensionMismatch { expected: String, actual: String },

    /// The save destination has no encoder available.
    #[error("Unsupported output format: {}", path.display())]
    UnsupportedOutputFormat { path: PathBuf },

    /// Filesystem failure while reading or writing `path`.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The codec failed while encoding pixel data.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
