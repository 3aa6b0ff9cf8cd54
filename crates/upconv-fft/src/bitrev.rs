// SPDX-License-Identifier: LGPL-3.0-or-later

//! Bit-reversal permutation tables for decimation-in-time ordering.
//!
//! A radix-2 DIT FFT consumes its input in bit-reversed index order.
//! [`make_bitrev`] precomputes the permutation once per plan;
//! [`apply_bitrev`] replays it with one swap per transposition.

/// Build the bit-reversal table for a transform of length `n`.
///
/// Entry `i` holds the integer whose `log2(n)`-bit binary representation
/// is the reverse of `i`'s. The table is involutive: `table[table[i]] == i`.
///
/// # Panics
/// Panics if `n` is not a power of two or is less than 2.
pub fn make_bitrev(n: usize) -> Vec<usize> {
    assert!(n.is_power_of_two() && n >= 2, "table length must be a power of two >= 2");
    let bits = n.trailing_zeros();
    let shift = usize::BITS - bits;
    (0..n).map(|i| i.reverse_bits() >> shift).collect()
}

/// Permute `x` into bit-reversed order using a precomputed table.
///
/// Swaps only where `i < table[i]`, so each transposition is performed
/// exactly once and applying the permutation twice restores the input.
///
/// # Panics
/// Panics if `x` and `table` differ in length.
pub fn apply_bitrev<T>(x: &mut [T], table: &[usize]) {
    assert_eq!(x.len(), table.len(), "buffer length must match the table");
    for (i, &rev) in table.iter().enumerate() {
        if i < rev {
            x.swap(i, rev);
        }
    }
}
