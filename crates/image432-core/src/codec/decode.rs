//! Decoding image files into planes.

use std::io::ErrorKind;
use std::path::Path;

use image::{ImageReader, Limits};

use crate::plane::RgbPlanes;
use crate::PixelBufferError;

/// Decode the image file at `path` into RGB planes.
///
/// The format is guessed from the file's contents, falling back to its
/// extension.
///
/// # Errors
///
/// Returns `PixelBufferError::FileNotFound` if `path` is not an existing file.
/// Returns `PixelBufferError::UnrecognizedFormat` if the file cannot be decoded.
/// Returns `PixelBufferError::Io` for other filesystem failures (permissions).
/// Returns `PixelBufferError::ImageTooLarge` if the image exceeds the codec's
/// default allocation limits.
pub fn decode_file(path: &Path) -> Result<RgbPlanes, PixelBufferError> {
    decode_file_with_limits(path, Limits::default())
}

pub(crate) fn decode_file_with_limits(
    path: &Path,
    limits: Limits,
) -> Result<RgbPlanes, PixelBufferError> {
    if !path.is_file() {
        return Err(PixelBufferError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let io_error = |source: std::io::Error| PixelBufferError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;
    reader.limits(limits);

    let img = reader.decode().map_err(|err| match err {
        // Truncated or malformed streams surface as I/O errors from the codec.
        image::ImageError::IoError(source)
            if !matches!(source.kind(), ErrorKind::UnexpectedEof | ErrorKind::InvalidData) =>
        {
            io_error(source)
        }
        image::ImageError::Limits(limit) => PixelBufferError::ImageTooLarge {
            path: path.to_path_buf(),
            reason: limit.to_string(),
        },
        _ => PixelBufferError::UnrecognizedFormat {
            path: path.to_path_buf(),
        },
    })?;

    Ok(RgbPlanes::from_rgb_image(&img.into_rgb8()))
}
