// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Shared definitions for integration tests, textually included so both
// the f32 and f64 entry points run through the same generic checks.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};

use tilegemm::{dgemm, sgemm};

pub trait Float:
    Copy + PartialEq + Debug + Add<Output = Self> + Mul<Output = Self> + AddAssign
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from(x: i64) -> Self;
    fn nan() -> Self;
    fn is_nan(self) -> bool;
    /// Relative comparison with the accuracy this type is tested to.
    fn close_to(self, other: Self) -> bool;
}

impl Float for f32 {
    fn zero() -> Self { 0. }
    fn one() -> Self { 1. }
    fn from(x: i64) -> Self { x as Self }
    fn nan() -> Self { f32::NAN }
    fn is_nan(self) -> bool { self.is_nan() }
    fn close_to(self, other: Self) -> bool {
        approx::relative_eq!(self, other, max_relative = 1e-3, epsilon = 1e-5)
    }
}

impl Float for f64 {
    fn zero() -> Self { 0. }
    fn one() -> Self { 1. }
    fn from(x: i64) -> Self { x as Self }
    fn nan() -> Self { f64::NAN }
    fn is_nan(self) -> bool { self.is_nan() }
    fn close_to(self, other: Self) -> bool {
        approx::relative_eq!(self, other, max_relative = 1e-7, epsilon = 1e-9)
    }
}

pub trait Gemm: Float {
    unsafe fn gemm(
        m: usize, n: usize, k: usize,
        alpha: Self,
        a: *const Self, lda: usize,
        b: *const Self, ldb: usize,
        beta: Self,
        c: *mut Self, ldc: usize,
    );
}

impl Gemm for f32 {
    unsafe fn gemm(
        m: usize, n: usize, k: usize,
        alpha: Self,
        a: *const Self, lda: usize,
        b: *const Self, ldb: usize,
        beta: Self,
        c: *mut Self, ldc: usize,
    ) {
        sgemm(m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
    }
}

impl Gemm for f64 {
    unsafe fn gemm(
        m: usize, n: usize, k: usize,
        alpha: Self,
        a: *const Self, lda: usize,
        b: *const Self, ldb: usize,
        beta: Self,
        c: *mut Self, ldc: usize,
    ) {
        dgemm(m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
    }
}

/// Scalar triple-loop oracle. Like the library, it never reads C when
/// beta is zero.
pub fn reference_gemm<F: Float>(
    m: usize, n: usize, k: usize,
    alpha: F,
    a: &[F], lda: usize,
    b: &[F], ldb: usize,
    beta: F,
    c: &mut [F], ldc: usize,
) {
    for i in 0..m {
        for j in 0..n {
            let mut dot = F::zero();
            for kk in 0..k {
                dot += a[i * lda + kk] * b[kk * ldb + j];
            }
            let elt = &mut c[i * ldc + j];
            if beta == F::zero() {
                *elt = alpha * dot;
            } else {
                *elt = alpha * dot + beta * *elt;
            }
        }
    }
}
