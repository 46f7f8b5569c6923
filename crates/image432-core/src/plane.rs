//! Planar channel storage.
//!
//! An image is held as three independent planes (red, green, blue), each a
//! row-major grid of 8-bit samples. Keeping channels apart lets block
//! averaging and kernel filtering work on one channel at a time without a
//! channel stride.

use crate::PixelBufferError;

/// One color channel of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    /// Samples in row-major order. Length is `width * height`.
    samples: Vec<u8>,
}

impl Plane {
    /// Create a plane with every sample set to zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Create a plane with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major samples.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::PlaneDimensionMismatch` if `samples` does not
    /// hold exactly `width * height` values.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(PixelBufferError::PlaneDimensionMismatch {
                expected: format!("{expected} samples ({width}x{height})"),
                actual: format!("{} samples", samples.len()),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[self.index(x as usize, y as usize)])
    }

    /// Overwrite the sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} plane",
            self.width,
            self.height
        );
        let idx = self.index(x as usize, y as usize);
        self.samples[idx] = value;
    }

    /// Row `y` as a slice of `width` samples.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width as usize;
        &self.samples[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let width = self.width as usize;
        let start = y * width;
        &mut self.samples[start..start + width]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }
}

/// The red, green and blue planes of one image.
///
/// All three planes always share the same dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPlanes {
    red: Plane,
    green: Plane,
    blue: Plane,
}

impl RgbPlanes {
    /// Group three planes into an image.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::PlaneDimensionMismatch` if the planes do not
    /// all have the same width and height.
    pub fn new(red: Plane, green: Plane, blue: Plane) -> Result<Self, PixelBufferError> {
        let expected = red.dimensions();
        for other in [&green, &blue] {
            if other.dimensions() != expected {
                return Err(PixelBufferError::PlaneDimensionMismatch {
                    expected: format!("{}x{}", expected.0, expected.1),
                    actual: format!("{}x{}", other.width(), other.height()),
                });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Split an interleaved RGB image into planes.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let len = width as usize * height as usize;
        let mut red = Vec::with_capacity(len);
        let mut green = Vec::with_capacity(len);
        let mut blue = Vec::with_capacity(len);

        // `pixels()` stops at width * height even when the container is longer.
        for image::Rgb([r, g, b]) in img.pixels() {
            red.push(*r);
            green.push(*g);
            blue.push(*b);
        }

        Self {
            red: Plane {
                width,
                height,
                samples: red,
            },
            green: Plane {
                width,
                height,
                samples: green,
            },
            blue: Plane {
                width,
                height,
                samples: blue,
            },
        }
    }

    /// Interleave the planes back into the codec's RGB layout.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let (width, height) = self.dimensions();
        image::RgbImage::from_fn(width, height, |x, y| {
            let idx = self.red.index(x as usize, y as usize);
            image::Rgb([
                self.red.samples[idx],
                self.green.samples[idx],
                self.blue.samples[idx],
            ])
        })
    }

    /// Shared `(width, height)` of the three planes.
    pub fn dimensions(&self) -> (u32, u32) {
        self.red.dimensions()
    }

    pub fn red(&self) -> &Plane {
        &self.red
    }

    pub fn green(&self) -> &Plane {
        &self.green
    }

    pub fn blue(&self) -> &Plane {
        &self.blue
    }

    /// Borrow the planes in red, green, blue order.
    pub fn each(&self) -> [&Plane; 3] {
        [&self.red, &self.green, &self.blue]
    }

    /// Mutable access for shape-preserving transforms inside the crate.
    pub(crate) fn each_mut(&mut self) -> [&mut Plane; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }
}
