//! Block-averaging (pixelation) of a single plane.

use std::num::NonZeroU32;

use crate::plane::Plane;

/// Replace each block of a plane with the mean of its samples.
///
/// Blocks have their top-left corners at multiples of `block_size`. Blocks on
/// the right and bottom edges are clipped to the plane rather than padded, so
/// their mean is taken over only the samples actually present. A block size
/// larger than the plane yields a single block covering the whole plane.
///
/// The mean is computed in floating point and truncated when stored.
///
/// # Arguments
/// * `plane` - Plane to pixelate in place
/// * `block_size` - Edge length of each block in pixels
pub fn pixelate_plane(plane: &mut Plane, block_size: NonZeroU32) {
    let width = plane.width() as usize;
    let height = plane.height() as usize;
    let block = block_size.get() as usize;

    for top in (0..height).step_by(block) {
        let bottom = (top + block).min(height);
        for left in (0..width).step_by(block) {
            let right = (left + block).min(width);

            let sum: u64 = (top..bottom)
                .map(|y| {
                    plane.row(y)[left..right]
                        .iter()
                        .map(|&v| u64::from(v))
                        .sum::<u64>()
                })
                .sum();
            let count = ((bottom - top) * (right - left)) as f64;
            let mean = (sum as f64 / count) as u8;

            for y in top..bottom {
                plane.row_mut(y)[left..right].fill(mean);
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
