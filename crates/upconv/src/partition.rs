// SPDX-License-Identifier: LGPL-3.0-or-later

//! Impulse response partitioning.

use num_traits::Float;

/// Slice an impulse response into `⌈L / block_size⌉` contiguous
/// partitions of `block_size` samples, zero-padding the last.
///
/// The result feeds [`Convolver::load_filter`](crate::Convolver::load_filter),
/// which transforms each partition into its spectrum. An empty impulse
/// yields no partitions.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn uniform_partition<T: Float>(impulse: &[T], block_size: usize) -> Vec<Vec<T>> {
    assert!(block_size > 0, "block size must be non-zero");

    impulse
        .chunks(block_size)
        .map(|chunk| {
            let mut row = vec![T::zero(); block_size];
            row[..chunk.len()].copy_from_slice(chunk);
            row
        })
        .collect()
}

/// Partition a multi-channel impulse response, one partition matrix per
/// channel.
///
/// Channels stay independent: each matrix drives its own convolver
/// instance, with no state shared across channels.
pub fn uniform_partition_channels<T: Float>(
    channels: &[Vec<T>],
    block_size: usize,
) -> Vec<Vec<Vec<T>>> {
    channels
        .iter()
        .map(|channel| uniform_partition(channel, block_size))
        .collect()
}
