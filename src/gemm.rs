// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Entry points and the small/large routing decision.

use crate::aligned_alloc::Alloc;
use crate::archparam::{SMALL_THRESHOLD, TILE_HEIGHT, TILE_WIDTH};
use crate::combine;
use crate::kernel::Element;
use crate::packed;
use crate::small;
use crate::util::round_up_to;

/// General matrix multiplication (f32)
///
/// C ← α A B + β C
///
/// + m, k, n: dimensions
/// + a, b, c: pointers to the first element of the matrix
/// + A: m by k matrix
/// + B: k by n matrix
/// + C: m by n matrix
/// + lda, ldb, ldc: leading dimension (stride in elements between rows);
///   must satisfy `lda >= k`, `ldb >= n`, `ldc >= n`
///
/// If β is zero, C does not need to be initialized and is never read.
///
/// # Safety
///
/// The pointers must be valid for the extent the dimensions and leading
/// dimensions describe, C must not alias A or B, and the leading dimension
/// bounds must hold. None of this is checked at runtime.
pub unsafe fn sgemm(
    m: usize, n: usize, k: usize,
    alpha: f32,
    a: *const f32, lda: usize,
    b: *const f32, ldb: usize,
    beta: f32,
    c: *mut f32, ldc: usize,
) {
    gemm_loop(m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
}

/// General matrix multiplication (f64)
///
/// C ← α A B + β C
///
/// + m, k, n: dimensions
/// + a, b, c: pointers to the first element of the matrix
/// + A: m by k matrix
/// + B: k by n matrix
/// + C: m by n matrix
/// + lda, ldb, ldc: leading dimension (stride in elements between rows);
///   must satisfy `lda >= k`, `ldb >= n`, `ldc >= n`
///
/// If β is zero, C does not need to be initialized and is never read.
///
/// # Safety
///
/// The pointers must be valid for the extent the dimensions and leading
/// dimensions describe, C must not alias A or B, and the leading dimension
/// bounds must hold. None of this is checked at runtime.
pub unsafe fn dgemm(
    m: usize, n: usize, k: usize,
    alpha: f64,
    a: *const f64, lda: usize,
    b: *const f64, ldb: usize,
    beta: f64,
    c: *mut f64, ldc: usize,
) {
    gemm_loop(m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
}

/// Route one gemm call to the composed-microkernel path or the packed
/// path, then fold the raw product into C.
unsafe fn gemm_loop<T: Element>(
    m: usize, n: usize, k: usize,
    alpha: T,
    a: *const T, lda: usize,
    b: *const T, ldb: usize,
    beta: T,
    c: *mut T, ldc: usize,
) {
    debug_assert!(lda >= k && ldb >= n && ldc >= n);

    if m == 0 || n == 0 {
        return;
    }
    // no product term: only beta remains
    if k == 0 || alpha.is_zero() {
        combine::scale(m, n, beta, c, ldc);
        return;
    }

    if m < SMALL_THRESHOLD && n < SMALL_THRESHOLD && k < SMALL_THRESHOLD {
        dprint!("gemm {}×{}×{} small path", m, k, n);
        let mut ab = Alloc::<T>::new(m * n, 32).init_with(T::zero());
        small::compose(m, n, k, a, lda, b, ldb, ab.ptr_mut(), n);
        combine::combine(m, n, alpha, ab.ptr_mut(), n, beta, c, ldc);
    } else {
        dprint!("gemm {}×{}×{} packed path", m, k, n);
        let rows = round_up_to(m, TILE_HEIGHT);
        let ldab = round_up_to(n, TILE_WIDTH);
        let mut ab = Alloc::<T>::new(rows * ldab, 32).init_with(T::zero());
        packed::multiply(m, n, k, a, lda, b, ldb, ab.ptr_mut(), ldab);
        combine::combine(m, n, alpha, ab.ptr_mut(), ldab, beta, c, ldc);
    }
}
