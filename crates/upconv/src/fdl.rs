// SPDX-License-Identifier: LGPL-3.0-or-later

//! Frequency-domain delay line: a ring of the most recent input spectra.
//!
//! The matrix itself never rotates. A head index names the slot the
//! next spectrum overwrites, and readers walk the ring with index
//! arithmetic, so advancing costs one row copy regardless of the
//! partition count.

use num_complex::Complex;
use num_traits::Float;

use upconv_fft::kernels;

/// Ring buffer of the last `P` input spectra, each `K` bins wide.
#[derive(Debug, Clone)]
pub struct Fdl<T> {
    rows: Vec<Vec<Complex<T>>>,
    head: usize,
}

impl<T: Float> Fdl<T> {
    /// Create a zeroed delay line of `partitions` rows by `bins` columns.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(partitions: usize, bins: usize) -> Self {
        assert!(partitions >= 1, "delay line needs at least one partition");
        assert!(bins >= 1, "delay line needs at least one bin");
        Self {
            rows: vec![vec![Complex::new(T::zero(), T::zero()); bins]; partitions],
            head: 0,
        }
    }

    /// Number of partitions (rows).
    pub fn partitions(&self) -> usize {
        self.rows.len()
    }

    /// Bins per spectrum (columns).
    pub fn bins(&self) -> usize {
        self.rows[0].len()
    }

    /// Index of the slot the next [`advance`](Self::advance) overwrites.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index of the most recently written slot.
    pub fn newest(&self) -> usize {
        (self.head + self.rows.len() - 1) % self.rows.len()
    }

    /// Borrow one row of the ring.
    pub fn row(&self, index: usize) -> &[Complex<T>] {
        &self.rows[index]
    }

    /// Push a new spectrum: write it into the head slot, then advance
    /// the head. The previous newest row becomes one block old.
    ///
    /// # Panics
    /// Panics if `spectrum.len() != bins()`.
    pub fn advance(&mut self, spectrum: &[Complex<T>]) {
        assert_eq!(spectrum.len(), self.bins(), "spectrum length must match the bin count");
        self.rows[self.head].copy_from_slice(spectrum);
        self.head = (self.head + 1) % self.rows.len();
    }

    /// Multiply-accumulate the ring against a partitioned filter:
    /// `acc[k] += Σ_r ring[newest - r][k] * filter[r][k]`.
    ///
    /// The newest spectrum pairs with the first filter partition, and
    /// rows are summed in that fixed order, which pins the rounding.
    ///
    /// # Panics
    /// Panics if the filter's shape differs from the ring's.
    pub fn multiply_sum_columns(&self, filter: &[Vec<Complex<T>>], acc: &mut [Complex<T>]) {
        let partitions = self.rows.len();
        assert_eq!(filter.len(), partitions, "filter partition count must match the ring");
        assert_eq!(acc.len(), self.bins(), "accumulator length must match the bin count");

        let newest = self.newest();
        for (r, partition) in filter.iter().enumerate() {
            let slot = (newest + partitions - r) % partitions;
            kernels::complex_mul_add(acc, &self.rows[slot], partition);
        }
    }

    /// Zero every slot and rewind the head without reallocating.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            kernels::clear_spectrum(row);
        }
        self.head = 0;
    }
}
