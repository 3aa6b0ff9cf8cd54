// SPDX-License-Identifier: LGPL-3.0-or-later

//! Overlap-Save and Overlap-Add block assembly.
//!
//! Both strategies share one shape: accept a block of `B` time-domain
//! samples, run a forward real FFT over a `transform_size()`-point
//! analysis window, hand the normalized spectrum to a caller-supplied
//! callback, invert the (possibly modified) spectrum, and write `B`
//! output samples back into the caller's block. They differ only in how
//! the analysis window is formed and how the inverse is folded into the
//! output:
//!
//! - **Overlap-Save** keeps a sliding window of input history and emits
//!   the valid ("save") half of the inverse.
//! - **Overlap-Add** zero-pads each block in isolation and accumulates
//!   the inverse tails across blocks.
//!
//! The transform size is the smallest power of two covering
//! `block_size + filter_size - 1`, so a trivial callback reproduces the
//! input exactly and a spectrum multiply realizes linear (not circular)
//! convolution. The `1/N` normalization is applied here, on the forward
//! spectrum, and nowhere else.

use num_complex::Complex;
use num_traits::Float;

use upconv_fft::{copy, kernels, RealFftPlan};

/// Number of transform passes whose combined length covers
/// `block_size + filter_len - 1` samples, i.e. `⌈(L + B - 1) / B⌉`.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn num_overlaps(block_size: usize, filter_len: usize) -> usize {
    assert!(block_size > 0, "block size must be non-zero");
    (filter_len + block_size - 1).div_ceil(block_size)
}

/// Block-to-spectrum assembly strategy.
///
/// The partitioned convolver is generic over this trait; it never
/// touches the time domain itself.
pub trait Overlap<T> {
    /// Create a strategy for `block_size`-sample blocks against a
    /// `filter_size`-sample filter.
    fn new(block_size: usize, filter_size: usize) -> Self
    where
        Self: Sized;

    /// Samples per block.
    fn block_size(&self) -> usize;

    /// Filter length this strategy was sized for.
    fn filter_size(&self) -> usize;

    /// FFT length: the smallest power of two `>= block_size + filter_size - 1`.
    fn transform_size(&self) -> usize;

    /// Spectrum length handed to the callback: `transform_size()/2 + 1`.
    fn num_bins(&self) -> usize;

    /// Run one block through the strategy.
    ///
    /// The callback receives the normalized input spectrum and may
    /// rewrite it; whatever it leaves behind is inverted and written
    /// back into `block`.
    fn process(&mut self, block: &mut [T], callback: impl FnMut(&mut [Complex<T>]));

    /// Clear all retained history (window, tails); sizes are kept.
    fn reset(&mut self);
}

/// Overlap-Save assembly: sliding input history, discard-the-aliased-half
/// output.
#[derive(Debug, Clone)]
pub struct OverlapSave<T> {
    block_size: usize,
    filter_size: usize,
    rfft: RealFftPlan<T>,
    window: Vec<T>,
    spectrum: Vec<Complex<T>>,
    inverse: Vec<T>,
}

impl<T: Float> Overlap<T> for OverlapSave<T> {
    fn new(block_size: usize, filter_size: usize) -> Self {
        let (rfft, spectrum) = make_plan(block_size, filter_size);
        let transform = rfft.size();
        Self {
            block_size,
            filter_size,
            rfft,
            window: vec![T::zero(); transform],
            spectrum,
            inverse: vec![T::zero(); transform],
        }
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn filter_size(&self) -> usize {
        self.filter_size
    }

    fn transform_size(&self) -> usize {
        self.rfft.size()
    }

    fn num_bins(&self) -> usize {
        self.rfft.num_bins()
    }

    fn process(&mut self, block: &mut [T], mut callback: impl FnMut(&mut [Complex<T>])) {
        let b = self.block_size;
        let n = self.rfft.size();
        assert_eq!(block.len(), b, "block length must match the configured block size");

        // Slide the analysis window: drop the oldest B samples, append
        // the caller's block.
        copy::shift_left(&mut self.window, b);
        self.window[n - b..].copy_from_slice(block);

        self.rfft.r2c(&self.window, &mut self.spectrum);
        kernels::scale_spectrum(&mut self.spectrum, recip(n));
        callback(&mut self.spectrum);
        self.rfft.c2r(&self.spectrum, &mut self.inverse);

        // Only the trailing B samples are free of circular aliasing.
        block.copy_from_slice(&self.inverse[n - b..]);
    }

    fn reset(&mut self) {
        copy::fill_zero(&mut self.window);
    }
}

/// Overlap-Add assembly: zero-padded isolated blocks, accumulated
/// inverse tails.
#[derive(Debug, Clone)]
pub struct OverlapAdd<T> {
    block_size: usize,
    filter_size: usize,
    rfft: RealFftPlan<T>,
    window: Vec<T>,
    spectrum: Vec<Complex<T>>,
    inverse: Vec<T>,
    tail: Vec<T>,
}

impl<T: Float> OverlapAdd<T> {
    /// Transform passes needed to cover this strategy's configuration;
    /// see [`num_overlaps`].
    pub fn num_overlaps(&self) -> usize {
        num_overlaps(self.block_size, self.filter_size)
    }
}

impl<T: Float> Overlap<T> for OverlapAdd<T> {
    fn new(block_size: usize, filter_size: usize) -> Self {
        let (rfft, spectrum) = make_plan(block_size, filter_size);
        let transform = rfft.size();
        Self {
            block_size,
            filter_size,
            rfft,
            window: vec![T::zero(); transform],
            spectrum,
            inverse: vec![T::zero(); transform],
            tail: vec![T::zero(); transform - block_size],
        }
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn filter_size(&self) -> usize {
        self.filter_size
    }

    fn transform_size(&self) -> usize {
        self.rfft.size()
    }

    fn num_bins(&self) -> usize {
        self.rfft.num_bins()
    }

    fn process(&mut self, block: &mut [T], mut callback: impl FnMut(&mut [Complex<T>])) {
        let b = self.block_size;
        let n = self.rfft.size();
        assert_eq!(block.len(), b, "block length must match the configured block size");

        // The analysis window is the current block alone; the zero pad
        // beyond it is never written after construction.
        self.window[..b].copy_from_slice(block);

        self.rfft.r2c(&self.window, &mut self.spectrum);
        kernels::scale_spectrum(&mut self.spectrum, recip(n));
        callback(&mut self.spectrum);
        self.rfft.c2r(&self.spectrum, &mut self.inverse);

        // Emit the head plus the carried tail, then roll the remaining
        // inverse samples into the tail for the following blocks.
        let tail_len = self.tail.len();
        for (i, out) in block.iter_mut().enumerate() {
            let carried = if i < tail_len { self.tail[i] } else { T::zero() };
            *out = self.inverse[i] + carried;
        }
        for i in 0..tail_len {
            let carried = if i + b < tail_len { self.tail[i + b] } else { T::zero() };
            self.tail[i] = self.inverse[i + b] + carried;
        }
    }

    fn reset(&mut self) {
        copy::fill_zero(&mut self.tail);
    }
}

fn make_plan<T: Float>(
    block_size: usize,
    filter_size: usize,
) -> (RealFftPlan<T>, Vec<Complex<T>>) {
    assert!(block_size > 0, "block size must be non-zero");
    assert!(filter_size > 0, "filter size must be non-zero");

    let transform = (block_size + filter_size - 1).next_power_of_two().max(2);
    let order = transform.trailing_zeros() as usize;
    let rfft = RealFftPlan::new(order);
    let bins = rfft.num_bins();
    (rfft, vec![Complex::new(T::zero(), T::zero()); bins])
}

fn recip<T: Float>(n: usize) -> T {
    T::from(n).expect("transform size must fit in the scalar type").recip()
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn noise(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect()
    }

    /// Stream a noise signal through an overlap strategy with a trivial
    /// callback and require the output to reproduce the input.
    fn assert_identity<O: Overlap<f32>>(block_size: usize, filter_size: usize) {
        let mut overlap = O::new(block_size, filter_size);
        assert_eq!(overlap.block_size(), block_size);
        assert_eq!(overlap.filter_size(), filter_size);
        assert!(overlap.transform_size() >= block_size + filter_size - 1);
        assert_eq!(overlap.num_bins(), overlap.transform_size() / 2 + 1);

        let signal = noise(block_size * 8, 0xC0FFEE ^ (filter_size as u64));
        let mut output = signal.clone();
        let bins = overlap.num_bins();

        for block in output.chunks_exact_mut(block_size) {
            overlap.process(block, |spectrum| {
                assert_eq!(spectrum.len(), bins);
            });
        }

        for (i, (&got, &want)) in output.iter().zip(signal.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-5,
                "B={} L={} sample {}: got {}, want {}",
                block_size,
                filter_size,
                i,
                got,
                want
            );
        }
    }

    #[test]
    fn test_num_overlaps() {
        assert_eq!(num_overlaps(128, 127), 2);
        assert_eq!(num_overlaps(128, 128), 2);
        assert_eq!(num_overlaps(128, 129), 2);
        assert_eq!(num_overlaps(128, 130), 3);

        assert_eq!(num_overlaps(128, 255), 3);
        assert_eq!(num_overlaps(128, 256), 3);
        assert_eq!(num_overlaps(128, 257), 3);
        assert_eq!(num_overlaps(128, 258), 4);

        assert_eq!(num_overlaps(128, 511), 5);
        assert_eq!(num_overlaps(128, 512), 5);
        assert_eq!(num_overlaps(128, 513), 5);
        assert_eq!(num_overlaps(128, 514), 6);
    }

    #[test]
    fn test_overlap_save_identity() {
        for &block_size in &[128usize, 256] {
            for &filter_size in &[8usize, 9, 13, 17, 127, 128, 129, 130, 512, 1024] {
                assert_identity::<OverlapSave<f32>>(block_size, filter_size);
            }
        }
    }

    #[test]
    fn test_overlap_add_identity() {
        for &block_size in &[128usize, 256] {
            for &filter_size in &[8usize, 9, 13, 17, 127, 128, 129, 130, 512, 1024] {
                assert_identity::<OverlapAdd<f32>>(block_size, filter_size);
            }
        }
    }

    #[test]
    fn test_transform_size_doubles_matched_sizes() {
        let overlap = OverlapSave::<f32>::new(128, 128);
        assert_eq!(overlap.transform_size(), 256);
        assert_eq!(overlap.num_bins(), 129);
    }

    #[test]
    fn test_ola_num_overlaps_method() {
        let overlap = OverlapAdd::<f32>::new(128, 514);
        assert_eq!(overlap.num_overlaps(), 6);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut overlap = OverlapSave::<f32>::new(64, 64);
        let signal = noise(64, 3);

        let mut first = signal.clone();
        overlap.process(&mut first, |_| {});

        overlap.reset();
        let mut second = signal.clone();
        overlap.process(&mut second, |_| {});

        for (a, b) in first.iter().zip(second.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "match the configured block size")]
    fn test_rejects_wrong_block_length() {
        let mut overlap = OverlapSave::<f32>::new(64, 64);
        let mut block = vec![0.0f32; 32];
        overlap.process(&mut block, |_| {});
    }
}
