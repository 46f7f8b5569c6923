//! Image432 Core - pixelation and convolution over RGB planes
//!
//! This crate holds an image as three equally shaped planes (red, green,
//! blue) inside a [`PixelBuffer`] and transforms them in place:
//!
//! - [`PixelBuffer::pixelate`] - block averaging on a shared block grid
//! - [`PixelBuffer::convolve`] - weighted-mean kernel filtering, borders skipped
//! - grayscale, brightness and per-channel color shift adjustments
//!
//! Decoding and encoding (PNG, JPEG) go through the `image` crate.
//!
//! # Example
//!
//! ```ignore
//! use image432_core::{Kernel, PixelBuffer};
//!
//! let mut img = PixelBuffer::open("image.jpg")?;
//! img.pixelate(3)?;
//! img.convolve(&Kernel::gaussian_3x3())?;
//! img.save_as("new_image.jpg")?;
//! ```

pub mod adjust;
pub mod buffer;
pub mod codec;
pub mod convolve;
pub mod kernel;
pub mod pixelate;
pub mod plane;
pub mod types;

pub use buffer::PixelBuffer;
pub use codec::{EncodeOptions, OutputFormat};
pub use kernel::Kernel;
pub use plane::{Plane, RgbPlanes};
pub use types::PixelBufferError;
