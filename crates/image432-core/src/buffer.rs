//! The pixel buffer: an image held as three planes plus the path it came from.
//!
//! A buffer is either empty (no planes) or populated (three planes with
//! identical dimensions). Only construction and loading populate a buffer;
//! every transform and `save` requires a populated buffer.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::adjust::{apply_channel_offsets, apply_grayscale};
use crate::codec::{decode_file, encode_file, EncodeOptions};
use crate::convolve::convolve_plane;
use crate::kernel::Kernel;
use crate::pixelate::pixelate_plane;
use crate::plane::RgbPlanes;
use crate::PixelBufferError;

/// An RGB image stored as separate red, green and blue planes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    planes: Option<RgbPlanes>,
    /// Default destination for [`PixelBuffer::save`].
    source_path: Option<PathBuf>,
}

impl PixelBuffer {
    /// Create an empty buffer with no planes and no source path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image file into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::FileNotFound` if `path` is not an existing file.
    /// Returns `PixelBufferError::UnrecognizedFormat` if the file cannot be decoded.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PixelBufferError> {
        let mut buffer = Self::new();
        buffer.load(path)?;
        Ok(buffer)
    }

    /// Replace this buffer's contents with the image at `path`.
    ///
    /// On success `path` becomes the default save destination. On failure the
    /// buffer is left unchanged.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), PixelBufferError> {
        let path = path.as_ref();
        let planes = decode_file(path)?;
        let (width, height) = planes.dimensions();
        debug!(width, height, "Image loaded");

        self.planes = Some(planes);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Wrap already-split planes. The buffer has no source path.
    pub fn from_planes(planes: RgbPlanes) -> Self {
        Self {
            planes: Some(planes),
            source_path: None,
        }
    }

    /// Build a buffer from an interleaved RGB image.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        Self::from_planes(RgbPlanes::from_rgb_image(img))
    }

    /// Interleave the planes into an RGB image.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, PixelBufferError> {
        Ok(self.require_planes()?.to_rgb_image())
    }

    /// Populate the buffer explicitly, keeping any source path.
    pub fn set_planes(&mut self, planes: RgbPlanes) {
        self.planes = Some(planes);
    }

    /// Set the default save destination.
    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    pub fn planes(&self) -> Option<&RgbPlanes> {
        self.planes.as_ref()
    }

    /// `(width, height)` of the planes, or `None` for an empty buffer.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.planes.as_ref().map(RgbPlanes::dimensions)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// True until the buffer has been populated.
    pub fn is_empty(&self) -> bool {
        self.planes.is_none()
    }

    /// Pixelate every plane with `block_size`x`block_size` blocks.
    ///
    /// All three planes share the same block grid. Edge blocks are clipped to
    /// the image, and a block size larger than the image averages the whole
    /// image.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::InvalidBlockSize` if `block_size` is zero.
    /// Returns `PixelBufferError::UninitializedBuffer` on an empty buffer.
    pub fn pixelate(&mut self, block_size: u32) -> Result<(), PixelBufferError> {
        let block = NonZeroU32::new(block_size).ok_or(PixelBufferError::InvalidBlockSize)?;
        let planes = self.require_planes_mut()?;

        for plane in planes.each_mut() {
            pixelate_plane(plane, block);
        }

        debug!(block_size, "Pixelated image");
        Ok(())
    }

    /// Convolve every plane with `kernel`, leaving a border of
    /// `(size - 1) / 2` pixels untouched.
    ///
    /// # Errors
    ///
    /// Kernel checks come first, in order:
    /// - `PixelBufferError::NonOddKernelDimensions`
    /// - `PixelBufferError::NonSquareKernel`
    /// - `PixelBufferError::DegenerateKernel`
    ///
    /// then `PixelBufferError::UninitializedBuffer` on an empty buffer.
    pub fn convolve(&mut self, kernel: &Kernel) -> Result<(), PixelBufferError> {
        let weight_sum = kernel.convolution_weight_sum()?;
        let planes = self.require_planes_mut()?;

        for plane in planes.each_mut() {
            convolve_plane(plane, kernel, weight_sum);
        }

        debug!(kernel_size = kernel.rows(), weight_sum, "Convolved image");
        Ok(())
    }

    /// Convert to grayscale (BT.709 luma), keeping three planes.
    pub fn grayscale(&mut self) -> Result<(), PixelBufferError> {
        apply_grayscale(self.require_planes_mut()?);
        debug!("Converted image to grayscale");
        Ok(())
    }

    /// Add `delta` to every sample of every plane, saturating.
    pub fn adjust_brightness(&mut self, delta: i16) -> Result<(), PixelBufferError> {
        apply_channel_offsets(self.require_planes_mut()?, [delta; 3]);
        debug!(delta, "Adjusted brightness");
        Ok(())
    }

    /// Add a separate offset to each of the red, green and blue planes, saturating.
    pub fn color_shift(&mut self, red: i16, green: i16, blue: i16) -> Result<(), PixelBufferError> {
        apply_channel_offsets(self.require_planes_mut()?, [red, green, blue]);
        debug!(red, green, blue, "Shifted colors");
        Ok(())
    }

    /// Write the image back to the path it was loaded from.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::UninitializedBuffer` on an empty buffer.
    /// Returns `PixelBufferError::NoDestinationSpecified` if no source path is known.
    pub fn save(&self) -> Result<PathBuf, PixelBufferError> {
        self.save_with(None, &EncodeOptions::default())
    }

    /// Write the image to `path`, inferring the format from its extension.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<PathBuf, PixelBufferError> {
        self.save_with(Some(path.as_ref()), &EncodeOptions::default())
    }

    /// Write the image to `path`, or to the source path when `path` is `None`.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::UninitializedBuffer` on an empty buffer.
    /// Returns `PixelBufferError::NoDestinationSpecified` if `path` is `None`
    /// and no source path is known.
    /// Otherwise propagates errors from [`encode_file`].
    #[instrument(skip_all, fields(path = ?path))]
    pub fn save_with(
        &self,
        path: Option<&Path>,
        options: &EncodeOptions,
    ) -> Result<PathBuf, PixelBufferError> {
        let planes = self.require_planes()?;
        let destination = path
            .or(self.source_path.as_deref())
            .ok_or(PixelBufferError::NoDestinationSpecified)?;

        encode_file(planes, destination, options)?;

        let (width, height) = planes.dimensions();
        debug!(destination = %destination.display(), width, height, "Image saved");
        Ok(destination.to_path_buf())
    }

    fn require_planes(&self) -> Result<&RgbPlanes, PixelBufferError> {
        self.planes
            .as_ref()
            .ok_or(PixelBufferError::UninitializedBuffer)
    }

    fn require_planes_mut(&mut self) -> Result<&mut RgbPlanes, PixelBufferError> {
        self.planes
            .as_mut()
            .ok_or(PixelBufferError::UninitializedBuffer)
    }
}
