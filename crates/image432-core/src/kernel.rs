//! Convolution kernels.
//!
//! A [`Kernel`] is a rectangular matrix of finite weights. Construction only
//! guarantees the matrix shape; the stricter requirements of convolution (odd
//! side lengths, square, non-zero weight sum) are checked by
//! [`Kernel::convolution_weight_sum`] so that each failure surfaces as its own
//! error, in a fixed order.

use crate::PixelBufferError;

/// A 2D matrix of convolution weights in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::InvalidKernelType` if the matrix is empty,
    /// `weights` does not hold `rows * cols` values, or any weight is NaN or
    /// infinite.
    pub fn new(rows: usize, cols: usize, weights: Vec<f64>) -> Result<Self, PixelBufferError> {
        if rows == 0 || cols == 0 {
            return Err(PixelBufferError::InvalidKernelType(format!(
                "expected a non-empty matrix, got {rows}x{cols}"
            )));
        }
        if weights.len() != rows * cols {
            return Err(PixelBufferError::InvalidKernelType(format!(
                "{rows}x{cols} matrix needs {} weights, got {}",
                rows * cols,
                weights.len()
            )));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite()) {
            return Err(PixelBufferError::InvalidKernelType(format!(
                "weights must be finite numbers, found {bad}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    /// Create a kernel from a slice of rows.
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::InvalidKernelType` for an empty or ragged
    /// input, or for non-finite weights.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, PixelBufferError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(ragged) = rows.iter().position(|r| r.as_ref().len() != cols) {
            return Err(PixelBufferError::InvalidKernelType(format!(
                "row {ragged} has {} weights, expected {cols}",
                rows[ragged].as_ref().len()
            )));
        }
        let weights = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(rows.len(), cols, weights)
    }

    /// The 1x1 kernel `[[1]]`.
    pub fn identity() -> Self {
        Self {
            rows: 1,
            cols: 1,
            weights: vec![1.0],
        }
    }

    /// A `size`x`size` kernel of equal weights (mean filter).
    ///
    /// # Errors
    ///
    /// Returns `PixelBufferError::InvalidKernelType` if `size` is zero.
    pub fn box_blur(size: usize) -> Result<Self, PixelBufferError> {
        Self::new(size, size, vec![1.0; size * size])
    }

    /// 3x3 binomial approximation of a Gaussian blur.
    pub fn gaussian_3x3() -> Self {
        Self {
            rows: 3,
            cols: 3,
            weights: vec![1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0],
        }
    }

    /// 3x3 sharpening kernel (weights sum to one).
    pub fn sharpen_3x3() -> Self {
        Self {
            rows: 3,
            cols: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Weight at row `row`, column `col`.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.cols + col]
    }

    /// Row `row` of the kernel.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.weights[row * self.cols..(row + 1) * self.cols]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Check the kernel can drive a convolution and return its weight sum.
    ///
    /// Checks run in order and the first failure wins: odd dimensions, then
    /// squareness, then a non-zero weight sum.
    ///
    /// # Errors
    ///
    /// - `PixelBufferError::NonOddKernelDimensions` if either side is even
    /// - `PixelBufferError::NonSquareKernel` if rows != cols
    /// - `PixelBufferError::DegenerateKernel` if the weights sum to zero
    pub fn convolution_weight_sum(&self) -> Result<f64, PixelBufferError> {
        if self.rows % 2 == 0 || self.cols % 2 == 0 {
            return Err(PixelBufferError::NonOddKernelDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows != self.cols {
            return Err(PixelBufferError::NonSquareKernel {
                rows: self.rows,
                cols: self.cols,
            });
        }
        // Zero up to the rounding error of summing these weights, so small but
        // valid kernels pass and cancelling ones like [0.1, 0.2, -0.3] do not.
        let sum = self.sum();
        let magnitude: f64 = self.weights.iter().map(|w| w.abs()).sum();
        if sum.abs() <= self.weights.len() as f64 * f64::EPSILON * magnitude {
            return Err(PixelBufferError::DegenerateKernel);
        }
        Ok(sum)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Kernel {
    type Error = PixelBufferError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let kernel = Kernel::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(kernel.rows(), 2);
        assert_eq!(kernel.cols(), 3);
        assert_eq!(kernel.weight(1, 2), 6.0);
        assert_eq!(kernel.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(kernel.sum(), 21.0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Kernel::try_from(vec![vec![1.0_f64, 1.0, 1.0], vec![1.0, 1.0]]);
        assert!(matches!(result, Err(PixelBufferError::InvalidKernelType(_))));
    }

    #[test]
    fn test_empty_kernel_rejected() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            Kernel::try_from(empty),
            Err(PixelBufferError::InvalidKernelType(_))
        ));
        assert!(matches!(
            Kernel::try_from(vec![Vec::<f64>::new()]),
            Err(PixelBufferError::InvalidKernelType(_))
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let result = Kernel::new(1, 1, vec![f64::NAN]);
        assert!(matches!(result, Err(PixelBufferError::InvalidKernelType(_))));

        let result = Kernel::new(1, 1, vec![f64::INFINITY]);
        assert!(matches!(result, Err(PixelBufferError::InvalidKernelType(_))));
    }

    #[test]
    fn test_weight_count_mismatch_rejected() {
        let result = Kernel::new(3, 3, vec![1.0; 8]);
        assert!(matches!(result, Err(PixelBufferError::InvalidKernelType(_))));
    }

    #[test]
    fn test_even_rows_rejected() {
        let kernel = Kernel::from_rows(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]).unwrap();
        assert!(matches!(
            kernel.convolution_weight_sum(),
            Err(PixelBufferError::NonOddKernelDimensions { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_non_square_rejected() {
        let kernel = Kernel::new(3, 5, vec![1.0; 15]).unwrap();
        assert!(matches!(
            kernel.convolution_weight_sum(),
            Err(PixelBufferError::NonSquareKernel { rows: 3, cols: 5 })
        ));
    }

    #[test]
    fn test_odd_check_precedes_square_check() {
        // 2x3 is both even and non-square; the odd check wins.
        let kernel = Kernel::new(2, 3, vec![1.0; 6]).unwrap();
        assert!(matches!(
            kernel.convolution_weight_sum(),
            Err(PixelBufferError::NonOddKernelDimensions { .. })
        ));
    }

    #[test]
    fn test_zero_sum_rejected() {
        let kernel = Kernel::from_rows(&[[-1.0, 2.0, -1.0], [-1.0, 2.0, -1.0], [-1.0, 2.0, -1.0]])
            .unwrap();
        assert!(matches!(
            kernel.convolution_weight_sum(),
            Err(PixelBufferError::DegenerateKernel)
        ));
    }

    #[test]
    fn test_small_weights_are_not_degenerate() {
        let kernel = Kernel::new(1, 1, vec![1e-17]).unwrap();
        assert_eq!(kernel.convolution_weight_sum().unwrap(), 1e-17);

        let tiny = 2f64.powi(-60);
        let kernel = Kernel::new(3, 3, vec![tiny; 9]).unwrap();
        assert_eq!(kernel.convolution_weight_sum().unwrap(), 9.0 * tiny);
    }

    #[test]
    fn test_cancelling_weights_are_degenerate() {
        let kernel = Kernel::from_rows(&[[0.1, 0.2, -0.3], [0.1, 0.2, -0.3], [0.1, 0.2, -0.3]])
            .unwrap();
        // Floating-point sum is a few ulps off zero.
        assert_ne!(kernel.sum(), 0.0);
        assert!(matches!(
            kernel.convolution_weight_sum(),
            Err(PixelBufferError::DegenerateKernel)
        ));

        let zeros = Kernel::new(3, 3, vec![0.0; 9]).unwrap();
        assert!(matches!(
            zeros.convolution_weight_sum(),
            Err(PixelBufferError::DegenerateKernel)
        ));
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(Kernel::identity().convolution_weight_sum().unwrap(), 1.0);
        assert_eq!(Kernel::box_blur(5).unwrap().convolution_weight_sum().unwrap(), 25.0);
        assert_eq!(Kernel::gaussian_3x3().convolution_weight_sum().unwrap(), 16.0);
        assert_eq!(Kernel::sharpen_3x3().convolution_weight_sum().unwrap(), 1.0);
        assert!(Kernel::box_blur(0).is_err());
    }
}
