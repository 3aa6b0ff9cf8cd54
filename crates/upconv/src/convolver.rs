// SPDX-License-Identifier: LGPL-3.0-or-later

//! Uniformly-partitioned frequency-domain convolver.
//!
//! The filter's impulse response is split into `P` partitions of `B`
//! samples, each transformed once into `K = B + 1` bins. Per block the
//! engine runs one forward and one backward transform of size `2B` plus
//! a multiply-accumulate over all `P` partitions, so the per-block cost
//! stays bounded no matter how long the impulse response grows:
//!
//! 1. The overlap layer assembles the analysis window and produces the
//!    normalized input spectrum.
//! 2. The spectrum is pushed into the frequency-domain delay line.
//! 3. The delay line is multiplied columnwise against the partition
//!    spectra and summed into the accumulator; the newest input pairs
//!    with the earliest filter partition.
//! 4. The accumulator goes back through the overlap layer, which emits
//!    `B` output samples.

use num_complex::Complex;
use num_traits::Float;

use upconv_fft::{copy, kernels, RealFftPlan};

use crate::fdl::Fdl;
use crate::overlap::{Overlap, OverlapAdd, OverlapSave};

/// Partitioned convolver over the Overlap-Save strategy.
///
/// The usual choice: one fewer buffer to carry, and the output of each
/// block is exact from the first block on.
pub type OlsConvolver<T> = Convolver<T, OverlapSave<T>>;

/// Partitioned convolver over the Overlap-Add strategy.
pub type OlaConvolver<T> = Convolver<T, OverlapAdd<T>>;

/// Streaming block convolver with a uniformly-partitioned filter.
///
/// Generic over the scalar (`f32` or `f64`) and the overlap strategy.
/// All state is allocated by [`load_filter`](Self::load_filter);
/// [`process`](Self::process) is allocation-free.
///
/// # Examples
/// ```
/// use upconv::{uniform_partition, OlsConvolver};
///
/// let impulse = vec![0.0f32, 0.0, 1.0]; // two samples of delay
/// let mut convolver = OlsConvolver::<f32>::new();
/// convolver.load_filter(&uniform_partition(&impulse, 16));
///
/// let mut block = vec![0.0f32; 16];
/// block[0] = 1.0;
/// convolver.process(&mut block);
/// assert!(block[2] > 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct Convolver<T, O> {
    overlap: Option<O>,
    filter: Vec<Vec<Complex<T>>>,
    fdl: Option<Fdl<T>>,
    accumulator: Vec<Complex<T>>,
}

impl<T: Float, O: Overlap<T>> Convolver<T, O> {
    /// Create a convolver with no filter loaded.
    ///
    /// Until [`load_filter`](Self::load_filter) is called,
    /// [`process`](Self::process) emits silence.
    pub fn new() -> Self {
        Self {
            overlap: None,
            filter: Vec::new(),
            fdl: None,
            accumulator: Vec::new(),
        }
    }

    /// Load a partitioned filter from its time-domain partition matrix.
    ///
    /// `partitions` holds `P` rows of `B` samples each, as produced by
    /// [`uniform_partition`](crate::uniform_partition). Each row is
    /// zero-padded to `2B` and transformed into its `B + 1`-bin
    /// spectrum; the partition spectra stay unnormalized because the
    /// overlap layer folds the single `1/2B` into the input side. All
    /// processing state (delay line, accumulator, overlap history) is
    /// sized here and zeroed.
    ///
    /// # Panics
    /// Panics if `partitions` is empty, rows differ in length, or the
    /// row length is not a power of two.
    pub fn load_filter(&mut self, partitions: &[Vec<T>]) {
        assert!(!partitions.is_empty(), "filter needs at least one partition");
        let block_size = partitions[0].len();
        assert!(block_size.is_power_of_two(), "partition length must be a power of two");
        assert!(
            partitions.iter().all(|p| p.len() == block_size),
            "all partitions must have the same length"
        );

        let transform = block_size * 2;
        let mut rfft = RealFftPlan::new(transform.trailing_zeros() as usize);
        let bins = rfft.num_bins();

        let mut padded = vec![T::zero(); transform];
        self.filter = partitions
            .iter()
            .map(|partition| {
                padded[..block_size].copy_from_slice(partition);
                let mut spectrum = vec![Complex::new(T::zero(), T::zero()); bins];
                rfft.r2c(&padded, &mut spectrum);
                spectrum
            })
            .collect();

        self.overlap = Some(O::new(block_size, block_size));
        self.fdl = Some(Fdl::new(partitions.len(), bins));
        self.accumulator = vec![Complex::new(T::zero(), T::zero()); bins];
    }

    /// Convolve one block in place.
    ///
    /// The block's samples are replaced by the next `B` output samples
    /// of the running convolution. Runs to completion with no
    /// allocation, locking, or I/O.
    ///
    /// # Panics
    /// Panics if a filter is loaded and `block.len()` differs from the
    /// partition length.
    pub fn process(&mut self, block: &mut [T]) {
        let (Some(overlap), Some(fdl)) = (self.overlap.as_mut(), self.fdl.as_mut()) else {
            copy::fill_zero(block);
            return;
        };

        let filter = &self.filter;
        let accumulator = &mut self.accumulator;

        overlap.process(block, |spectrum| {
            fdl.advance(spectrum);
            kernels::clear_spectrum(accumulator);
            fdl.multiply_sum_columns(filter, accumulator);
            spectrum.copy_from_slice(accumulator);
        });
    }

    /// Samples per block, or zero before a filter is loaded.
    pub fn block_size(&self) -> usize {
        self.overlap.as_ref().map_or(0, |o| o.block_size())
    }

    /// Number of filter partitions, or zero before a filter is loaded.
    pub fn partitions(&self) -> usize {
        self.filter.len()
    }

    /// Clear all processing state; the loaded filter is kept.
    pub fn reset(&mut self) {
        if let Some(overlap) = self.overlap.as_mut() {
            overlap.reset();
        }
        if let Some(fdl) = self.fdl.as_mut() {
            fdl.reset();
        }
        kernels::clear_spectrum(&mut self.accumulator);
    }
}

impl<T: Float, O: Overlap<T>> Default for Convolver<T, O> {
    fn default() -> Self {
        Self::new()
    }
}
