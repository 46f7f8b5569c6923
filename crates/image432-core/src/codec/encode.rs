//! Encoding planes to image files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeOptions, OutputFormat};
use crate::plane::RgbPlanes;
use crate::PixelBufferError;

/// Encode RGB planes and write them to `path`.
///
/// # Arguments
///
/// * `planes` - Pixel data to write
/// * `path` - Destination file, created or truncated
/// * `options` - Output format and JPEG quality
///
/// # Errors
///
/// Returns `PixelBufferError::UnsupportedOutputFormat` if no format is
/// configured and none can be inferred from the extension.
/// Returns `PixelBufferError::Io` if the file cannot be created or written.
/// Returns `PixelBufferError::EncodingFailed` if the codec rejects the data.
pub fn encode_file(
    planes: &RgbPlanes,
    path: &Path,
    options: &EncodeOptions,
) -> Result<(), PixelBufferError> {
    let format = options
        .resolve_format(path)
        .ok_or_else(|| PixelBufferError::UnsupportedOutputFormat {
            path: path.to_path_buf(),
        })?;

    let io_error = |source: std::io::Error| PixelBufferError::Io {
        path: path.to_path_buf(),
        source,
    };

    let img = planes.to_rgb_image();
    let (width, height) = img.dimensions();

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut writer).write_image(
            img.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut writer, quality).write_image(
                img.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };

    result.map_err(|err| match err {
        image::ImageError::IoError(source) => io_error(source),
        other => PixelBufferError::EncodingFailed(other.to_string()),
    })?;

    writer.flush().map_err(io_error)
}
