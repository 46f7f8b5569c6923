//! Per-pixel tonal adjustments over RGB planes.
//!
//! These operate sample by sample and never change plane dimensions.

use crate::plane::RgbPlanes;

/// BT.709 luma weights for red, green and blue.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    (wr * f32::from(r) + wg * f32::from(g) + wb * f32::from(b))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Replace every pixel with its luminance in all three planes.
pub fn apply_grayscale(planes: &mut RgbPlanes) {
    let [red, green, blue] = planes.each_mut();
    for ((r, g), b) in red
        .as_mut_slice()
        .iter_mut()
        .zip(green.as_mut_slice().iter_mut())
        .zip(blue.as_mut_slice().iter_mut())
    {
        let lum = luma(*r, *g, *b);
        *r = lum;
        *g = lum;
        *b = lum;
    }
}

/// Add a signed offset to each plane, saturating at 0 and 255.
///
/// # Arguments
/// * `planes` - Planes to adjust in place
/// * `offsets` - Offsets for the red, green and blue planes
pub fn apply_channel_offsets(planes: &mut RgbPlanes, offsets: [i16; 3]) {
    for (plane, offset) in planes.each_mut().into_iter().zip(offsets) {
        if offset == 0 {
            continue;
        }
        for sample in plane.as_mut_slice() {
            *sample = offset_sample(*sample, offset);
        }
    }
}

#[inline]
fn offset_sample(sample: u8, offset: i16) -> u8 {
    (i32::from(sample) + i32::from(offset)).clamp(0, 255) as u8
}
