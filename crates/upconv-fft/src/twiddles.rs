// SPDX-License-Identifier: LGPL-3.0-or-later

//! Twiddle factor tables — the complex exponentials of a radix-2 FFT.

use num_complex::Complex;
use num_traits::Float;

use crate::fft::Direction;

/// Build the twiddle table for a transform of length `n`.
///
/// Returns `n/2` factors `T[k] = exp(sign * 2πik/n)` with `sign = -1`
/// for [`Direction::Forward`] and `+1` for [`Direction::Backward`]; the
/// backward table is therefore the elementwise conjugate of the forward
/// table. Angles are evaluated in `f64` and converted once, so `f32`
/// tables carry correctly-rounded entries.
///
/// # Panics
/// Panics if `n` is not a power of two or is less than 2.
pub fn make_twiddles<T: Float>(n: usize, direction: Direction) -> Vec<Complex<T>> {
    assert!(n.is_power_of_two() && n >= 2, "transform length must be a power of two >= 2");
    let step = direction.sign() * 2.0 * std::f64::consts::PI / n as f64;
    (0..n / 2)
        .map(|k| {
            let theta = step * k as f64;
            Complex::new(cast(theta.cos()), cast(theta.sin()))
        })
        .collect()
}

fn cast<T: Float>(value: f64) -> T {
    T::from(value).expect("scalar type must represent f64 constants")
}
