// SPDX-License-Identifier: LGPL-3.0-or-later

//! # upconv-fft
//!
//! Power-of-two FFT plans and elementwise spectrum kernels — the
//! transform substrate underneath the [`upconv`] partitioned convolver.
//!
//! This crate provides:
//!
//! - **Bit-reversal tables**: the input permutation for decimation-in-time
//! - **Twiddle tables**: precomputed complex exponentials, forward and backward
//! - **Complex FFT plan**: in-place radix-2 DIT transform
//! - **Real FFT plan**: R2C/C2R wrapper with the `N/2+1` Hermitian bin layout
//! - **Spectrum kernels**: complex multiply-accumulate and scaling
//! - **Buffer operations**: copy, fill, shift
//!
//! ## Design
//!
//! Transforms are *plans*: a plan owns its twiddle and permutation tables
//! plus a scratch buffer, so repeated transforms on the hot path never
//! allocate. Plans are generic over the scalar (`f32` or `f64`) via
//! `num-traits`; spectra use [`num_complex::Complex`]. Neither direction
//! normalizes — callers apply the single `1/N` where their algorithm
//! needs it. Elementwise kernels use runtime SIMD dispatch via the
//! `multiversion` crate (AVX2+FMA, AVX, SSE4.1, and NEON targets).
//!
//! [`upconv`]: https://docs.rs/upconv

pub mod bitrev;
pub mod copy;
pub mod fft;
pub mod kernels;
pub mod rfft;
pub mod twiddles;

pub use fft::{Direction, FftPlan};
pub use rfft::RealFftPlan;
