// SPDX-License-Identifier: LGPL-3.0-or-later

//! Real-to-complex FFT plan over the Hermitian half spectrum.
//!
//! For a real input of length `N` the forward transform keeps only the
//! `N/2 + 1` non-redundant bins; the backward transform reconstructs the
//! upper half by conjugate reflection before inverting. Like
//! [`FftPlan`], neither direction normalizes.

use num_complex::Complex;
use num_traits::Float;

use crate::fft::{Direction, FftPlan};

/// Reusable R2C/C2R transform plan for real signals of length `2^order`.
///
/// Owns an inner complex plan and a workspace, so the conversion between
/// the real signal and the packed complex buffer never allocates.
///
/// # Examples
/// ```
/// use num_complex::Complex;
/// use upconv_fft::RealFftPlan;
///
/// let mut plan = RealFftPlan::<f32>::new(3); // 8 samples, 5 bins
/// let signal = [1.0f32, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// let mut spectrum = [Complex::new(0.0f32, 0.0); 5];
/// plan.r2c(&signal, &mut spectrum);
/// ```
#[derive(Debug, Clone)]
pub struct RealFftPlan<T> {
    fft: FftPlan<T>,
    workspace: Vec<Complex<T>>,
}

impl<T: Float> RealFftPlan<T> {
    /// Create a plan for real signals of length `2^order`.
    ///
    /// # Panics
    /// Panics if `order` is zero.
    pub fn new(order: usize) -> Self {
        let fft = FftPlan::new(order);
        let workspace = vec![Complex::new(T::zero(), T::zero()); fft.size()];
        Self { fft, workspace }
    }

    /// Return the time-domain length `N = 2^order`.
    pub fn size(&self) -> usize {
        self.fft.size()
    }

    /// Return the order (log2 of the time-domain length).
    pub fn order(&self) -> usize {
        self.fft.order()
    }

    /// Return the spectrum length `N/2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.fft.size() / 2 + 1
    }

    /// Forward transform: real signal to the lower `N/2 + 1` bins.
    ///
    /// # Panics
    /// Panics if `input.len() != size()` or `output.len() != num_bins()`.
    pub fn r2c(&mut self, input: &[T], output: &mut [Complex<T>]) {
        assert_eq!(input.len(), self.size(), "input length must match the transform size");
        assert_eq!(output.len(), self.num_bins(), "output length must match the bin count");

        for (slot, &sample) in self.workspace.iter_mut().zip(input.iter()) {
            *slot = Complex::new(sample, T::zero());
        }
        self.fft.process(&mut self.workspace, Direction::Forward);
        output.copy_from_slice(&self.workspace[..output.len()]);
    }

    /// Backward transform: `N/2 + 1` bins to a real signal.
    ///
    /// The upper half of the internal buffer is rebuilt as
    /// `ws[i] = conj(ws[N - i])`, which is exact for spectra of real
    /// signals; imaginary residue after the inverse is discarded.
    ///
    /// # Panics
    /// Panics if `input.len() != num_bins()` or `output.len() != size()`.
    pub fn c2r(&mut self, input: &[Complex<T>], output: &mut [T]) {
        assert_eq!(input.len(), self.num_bins(), "input length must match the bin count");
        assert_eq!(output.len(), self.size(), "output length must match the transform size");

        let n = self.size();
        self.workspace[..input.len()].copy_from_slice(input);
        for i in input.len()..n {
            self.workspace[i] = self.workspace[n - i].conj();
        }

        self.fft.process(&mut self.workspace, Direction::Backward);
        for (sample, slot) in output.iter_mut().zip(self.workspace.iter()) {
            *sample = slot.re;
        }
    }
}
