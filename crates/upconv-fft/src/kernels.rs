// SPDX-License-Identifier: LGPL-3.0-or-later

//! Elementwise spectrum kernels.
//!
//! These are the inner loops of the partitioned convolver's
//! multiply-accumulate pass. Each function is compiled for several SIMD
//! targets via `multiversion`; the generic scalar keeps them usable for
//! both `f32` and `f64` spectra.

use multiversion::multiversion;
use num_complex::Complex;
use num_traits::Float;

/// Complex multiply-accumulate: `acc[k] += a[k] * b[k]`.
///
/// # Panics
/// Panics if the slices differ in length.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn complex_mul_add<T: Float>(acc: &mut [Complex<T>], a: &[Complex<T>], b: &[Complex<T>]) {
    assert!(a.len() == acc.len() && b.len() == acc.len(), "length mismatch");
    for ((d, &x), &y) in acc.iter_mut().zip(a.iter()).zip(b.iter()) {
        *d = *d + x * y;
    }
}

/// Complex multiply: `dst[k] = a[k] * b[k]`.
///
/// # Panics
/// Panics if the slices differ in length.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn complex_mul<T: Float>(dst: &mut [Complex<T>], a: &[Complex<T>], b: &[Complex<T>]) {
    assert!(a.len() == dst.len() && b.len() == dst.len(), "length mismatch");
    for ((d, &x), &y) in dst.iter_mut().zip(a.iter()).zip(b.iter()) {
        *d = x * y;
    }
}

/// Scale every bin in place: `buf[k] *= factor`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn scale_spectrum<T: Float>(buf: &mut [Complex<T>], factor: T) {
    for bin in buf.iter_mut() {
        *bin = Complex::new(bin.re * factor, bin.im * factor);
    }
}

/// Zero every bin in place.
pub fn clear_spectrum<T: Float>(buf: &mut [Complex<T>]) {
    buf.fill(Complex::new(T::zero(), T::zero()));
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_complex_mul() {
        let a = [Complex::new(1.0f32, 0.5), Complex::new(2.0, 1.0)];
        let b = [Complex::new(2.0f32, 0.0), Complex::new(1.0, -1.0)];
        let mut dst = [Complex::new(0.0f32, 0.0); 2];

        complex_mul(&mut dst, &a, &b);

        // (1+0.5i)(2+0i) = 2+1i
        assert_approx_eq!(f32, dst[0].re, 2.0, ulps = 2);
        assert_approx_eq!(f32, dst[0].im, 1.0, ulps = 2);
        // (2+1i)(1-1i) = 3-1i
        assert_approx_eq!(f32, dst[1].re, 3.0, ulps = 2);
        assert_approx_eq!(f32, dst[1].im, -1.0, ulps = 2);
    }

    #[test]
    fn test_complex_mul_add_accumulates() {
        let a = [Complex::new(1.0f64, 0.0)];
        let b = [Complex::new(2.0f64, 3.0)];
        let mut acc = [Complex::new(10.0f64, 20.0)];

        complex_mul_add(&mut acc, &a, &b);

        assert_approx_eq!(f64, acc[0].re, 12.0, ulps = 2);
        assert_approx_eq!(f64, acc[0].im, 23.0, ulps = 2);
    }

    #[test]
    fn test_scale_spectrum() {
        let mut buf = [Complex::new(2.0f32, -4.0), Complex::new(8.0, 16.0)];
        scale_spectrum(&mut buf, 0.5);
        assert_eq!(buf[0], Complex::new(1.0, -2.0));
        assert_eq!(buf[1], Complex::new(4.0, 8.0));
    }

    #[test]
    fn test_clear_spectrum() {
        let mut buf = [Complex::new(1.0f32, 2.0); 4];
        clear_spectrum(&mut buf);
        assert!(buf.iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_rejects_length_mismatch() {
        let a = [Complex::new(0.0f32, 0.0); 3];
        let b = [Complex::new(0.0f32, 0.0); 4];
        let mut acc = [Complex::new(0.0f32, 0.0); 3];
        complex_mul_add(&mut acc, &a, &b);
    }
}
