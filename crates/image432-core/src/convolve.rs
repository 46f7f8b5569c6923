//! Kernel filtering of a single plane.
//!
//! Each interior pixel becomes the weighted mean of its neighborhood:
//! `floor(sum(neighborhood * kernel) / sum(kernel))`, clamped to `0..=255`.
//! Pixels closer than `half = (size - 1) / 2` to any edge are left untouched.
//!
//! Neighborhoods are always read from a snapshot of the plane taken before
//! the pass, so the result does not depend on scan order.

use crate::kernel::Kernel;
use crate::plane::Plane;

/// Convolve a plane in place with a square, odd-sized kernel.
///
/// # Arguments
/// * `plane` - Plane to filter in place
/// * `kernel` - Square kernel with odd side length
/// * `weight_sum` - Non-zero sum of the kernel weights
///
/// Callers are expected to have validated the kernel with
/// [`Kernel::convolution_weight_sum`], which also supplies `weight_sum`.
pub fn convolve_plane(plane: &mut Plane, kernel: &Kernel, weight_sum: f64) {
    debug_assert_eq!(kernel.rows(), kernel.cols(), "kernel must be square");
    debug_assert!(kernel.rows() % 2 == 1, "kernel size must be odd");

    let size = kernel.rows();
    let half = size / 2;
    let width = plane.width() as usize;
    let height = plane.height() as usize;

    // Planes narrower than the kernel have no interior.
    if width < size || height < size {
        return;
    }

    let source = plane.clone();

    for y in half..height - half {
        for x in half..width - half {
            let mut acc = 0.0f64;
            for ky in 0..size {
                let src_row = &source.row(y + ky - half)[x - half..x - half + size];
                acc += src_row
                    .iter()
                    .zip(kernel.row(ky))
                    .map(|(&v, &w)| f64::from(v) * w)
                    .sum::<f64>();
            }
            plane.row_mut(y)[x] = (acc / weight_sum).floor().clamp(0.0, 255.0) as u8;
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plane_strategy() -> impl Strategy<Value = Plane> {
        (1u32..=20, 1u32..=20).prop_flat_map(|(width, height)| {
            let len = (width * height) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |samples| Plane::from_raw(width, height, samples).unwrap())
        })
    }

    proptest! {
        /// Property: The 1x1 identity kernel leaves every sample unchanged.
        #[test]
        fn prop_identity_kernel_is_noop(plane in plane_strategy()) {
            let mut out = plane.clone();
            convolve_plane(&mut out, &Kernel::identity(), 1.0);
            prop_assert_eq!(out, plane);
        }

        /// Property: Box-blur output stays within the neighborhood's min and max.
        #[test]
        fn prop_box_blur_bounded_by_neighborhood(
            plane in plane_strategy(),
            size in prop::sample::select(vec![1usize, 3, 5]),
        ) {
            let kernel = Kernel::box_blur(size).unwrap();
            let mut out = plane.clone();
            convolve_plane(&mut out, &kernel, kernel.sum());

            let half = (size / 2) as u32;
            let (width, height) = plane.dimensions();
            if width as usize >= size && height as usize >= size {
                for y in half..height - half {
                    for x in half..width - half {
                        let mut lo = u8::MAX;
                        let mut hi = u8::MIN;
                        for ny in y - half..=y + half {
                            for nx in x - half..=x + half {
                                let v = plane.get(nx, ny).unwrap();
                                lo = lo.min(v);
                                hi = hi.max(v);
                            }
                        }
                        let v = out.get(x, y).unwrap();
                        prop_assert!(v >= lo && v <= hi, "({}, {}) = {} not in {}..={}", x, y, v, lo, hi);
                    }
                }
            }
        }

        /// Property: Convolution never changes plane dimensions.
        #[test]
        fn prop_convolve_preserves_shape(plane in plane_strategy()) {
            let dims = plane.dimensions();
            let mut out = plane;
            convolve_plane(&mut out, &Kernel::gaussian_3x3(), 16.0);
            prop_assert_eq!(out.dimensions(), dims);
        }
    }
}
