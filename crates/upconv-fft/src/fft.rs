// SPDX-License-Identifier: LGPL-3.0-or-later

//! In-place radix-2 decimation-in-time FFT over power-of-two sizes.

use num_complex::Complex;
use num_traits::Float;

use crate::bitrev::{apply_bitrev, make_bitrev};
use crate::twiddles::make_twiddles;

/// Transform direction.
///
/// Forward uses the `exp(-2πik/N)` kernel, backward its conjugate.
/// Neither direction scales the output; an `ifft(fft(x))` round trip
/// yields `N·x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign of the exponent in the transform kernel.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}

/// Reusable complex-to-complex FFT plan for transforms of size `2^order`.
///
/// Construction precomputes the forward and backward twiddle tables and
/// the bit-reversal permutation; [`process`](Self::process) then runs
/// entirely on those tables with no allocation, so a plan can be driven
/// from a real-time thread.
///
/// # Examples
/// ```
/// use num_complex::Complex;
/// use upconv_fft::{Direction, FftPlan};
///
/// let plan = FftPlan::<f32>::new(2); // 4-point transform
/// let mut x = [Complex::new(1.0f32, 0.0); 4];
/// x[1..].fill(Complex::new(0.0, 0.0));
/// plan.process(&mut x, Direction::Forward);
/// // An impulse transforms to a flat spectrum of ones.
/// ```
#[derive(Debug, Clone)]
pub struct FftPlan<T> {
    order: usize,
    size: usize,
    forward: Vec<Complex<T>>,
    backward: Vec<Complex<T>>,
    bitrev: Vec<usize>,
}

impl<T: Float> FftPlan<T> {
    /// Create a plan for transforms of size `2^order`.
    ///
    /// # Panics
    /// Panics if `order` is zero.
    pub fn new(order: usize) -> Self {
        assert!(order >= 1, "transform order must be at least 1");
        let size = 1usize << order;
        Self {
            order,
            size,
            forward: make_twiddles(size, Direction::Forward),
            backward: make_twiddles(size, Direction::Backward),
            bitrev: make_bitrev(size),
        }
    }

    /// Return the order (log2 of the transform size).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Return the transform size `N = 2^order`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `x` in place.
    ///
    /// Runs the bit-reversal pass, then `order` butterfly stages in
    /// ascending stride order. No normalization is applied in either
    /// direction.
    ///
    /// # Panics
    /// Panics if `x.len() != self.size()`.
    pub fn process(&self, x: &mut [Complex<T>], direction: Direction) {
        assert_eq!(x.len(), self.size, "buffer length must match the transform size");

        let twiddles = match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        };

        apply_bitrev(x, &self.bitrev);

        for stage in 0..self.order {
            let half = 1usize << stage;
            let stride = half << 1;
            let twiddle_step = 1usize << (self.order - stage - 1);

            for group in (0..self.size).step_by(stride) {
                for pair in 0..half {
                    let i1 = group + pair;
                    let i2 = i1 + half;
                    let rotated = x[i2] * twiddles[pair * twiddle_step];
                    let kept = x[i1];
                    x[i1] = kept + rotated;
                    x[i2] = kept - rotated;
                }
            }
        }
    }
}
