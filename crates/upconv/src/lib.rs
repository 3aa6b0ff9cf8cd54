// SPDX-License-Identifier: LGPL-3.0-or-later

//! # upconv
//!
//! Uniformly-partitioned frequency-domain convolution for streaming
//! audio. Long impulse responses (tens to hundreds of thousands of
//! samples) are convolved against a block-based signal with bounded
//! per-block work and no dropped tail.
//!
//! The engine is built from:
//!
//! - **Overlap assembly**: [`OverlapSave`] and [`OverlapAdd`] couple
//!   time-domain blocks to the frequency-domain workspace
//! - **FDL**: a ring of the most recent input spectra ([`Fdl`])
//! - **Partitioner**: [`uniform_partition`] slices an impulse response
//!   into fixed-size blocks
//! - **Convolver**: [`Convolver`] orchestrates the above, one
//!   multiply-accumulate pass over all partitions per block
//!
//! ## Real-time discipline
//!
//! All buffers are sized in [`Convolver::load_filter`];
//! [`Convolver::process`] performs only arithmetic and fixed-size
//! copies — no allocation, locking, or I/O — so it is safe to call from
//! an audio callback. Separate convolver instances share no state and
//! may run on disjoint threads; channels are processed as independent
//! convolvers.
//!
//! ## Example
//!
//! ```
//! use upconv::{uniform_partition, OlsConvolver};
//!
//! let impulse = vec![1.0f32, 0.5, 0.25];
//! let partitions = uniform_partition(&impulse, 64);
//!
//! let mut convolver = OlsConvolver::<f32>::new();
//! convolver.load_filter(&partitions);
//!
//! let mut block = vec![0.0f32; 64];
//! block[0] = 1.0;
//! convolver.process(&mut block);
//! // block now holds the first 64 samples of the convolution.
//! ```

pub mod convolver;
pub mod fdl;
pub mod overlap;
pub mod partition;

pub use convolver::{Convolver, OlaConvolver, OlsConvolver};
pub use fdl::Fdl;
pub use overlap::{num_overlaps, Overlap, OverlapAdd, OverlapSave};
pub use partition::{uniform_partition, uniform_partition_channels};
