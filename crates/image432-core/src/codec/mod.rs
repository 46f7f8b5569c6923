//! File-level decoding and encoding through the `image` crate.
//!
//! This module provides functionality for:
//! - Decoding a PNG or JPEG file into RGB planes
//! - Encoding RGB planes to PNG or JPEG, with configurable JPEG quality
//!
//! Any pixel layout the codec can decode (grayscale, RGBA, 16-bit) is
//! converted to 8-bit RGB on load; alpha is dropped.
//!
//! # Examples
//!
//! ```ignore
//! use image432_core::codec::{decode_file, encode_file, EncodeOptions};
//!
//! let planes = decode_file("photo.png".as_ref())?;
//! encode_file(&planes, "copy.jpg".as_ref(), &EncodeOptions::default())?;
//! ```

mod decode;
mod encode;
mod types;

pub use decode::decode_file;
pub use encode::encode_file;
pub use types::{EncodeOptions, OutputFormat, DEFAULT_JPEG_QUALITY};
