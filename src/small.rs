// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The small-operand composer: accumulate A·B for arbitrary (m, n, k) by
//! recursive decomposition into dispatch-table hits.
//!
//! An oversized axis is split into a head of `MAX_DIM` and the remainder;
//! when several axes are oversized, the most oversized one splits first,
//! with ties resolving to m, then n, then k (a fixed policy, so the
//! floating point summation order is deterministic). An axis that is in
//! range but has no exact kernel value splits at the largest kernel value
//! below it. Every split strictly shrinks one axis, so the recursion
//! terminates.
//!
//! The composer never allocates; for a supported shape it degrades to a
//! plain dispatch-table call.

use rawpointer::PointerExt;

use crate::dispatch::{self, MAX_DIM};
use crate::kernel::Element;

enum Axis {
    M,
    N,
    K,
}

/// True for the axis values the kernel set covers in K and N.
#[inline]
fn is_kernel_dim(d: usize) -> bool {
    d == 1 || d == 2 || d == 4 || d == 8
}

/// Largest kernel value strictly below `d` (for d in 2..=8).
#[inline]
fn head_below(d: usize) -> usize {
    if d > 4 {
        4
    } else if d > 2 {
        2
    } else {
        1
    }
}

/// C += A·B for any m, n, k ≥ 1.
///
/// All matrices are row major: A is m × k with leading dimension `lda`,
/// B is k × n with `ldb`, C is m × n with `ldc`. Accumulates into C like
/// the microkernels do; the caller zeroes or pre-loads C.
pub(crate) unsafe fn compose<T: Element>(
    m: usize, n: usize, k: usize,
    a: *const T, lda: usize,
    b: *const T, ldb: usize,
    c: *mut T, ldc: usize,
) {
    debug_assert!(m > 0 && n > 0 && k > 0);

    if let Some(kernel) = dispatch::lookup::<T>(m, n, k) {
        kernel(a, lda as isize, b, ldb as isize, c, ldc as isize);
        return;
    }

    let em = m.saturating_sub(MAX_DIM);
    let en = n.saturating_sub(MAX_DIM);
    let ek = k.saturating_sub(MAX_DIM);

    let (axis, head) = if em > 0 && em >= en && em >= ek {
        (Axis::M, MAX_DIM)
    } else if en > 0 && en >= ek {
        (Axis::N, MAX_DIM)
    } else if ek > 0 {
        (Axis::K, MAX_DIM)
    } else if m > 2 {
        // the deliberate dispatch gap: rows reduce to the M ∈ {1, 2} set
        (Axis::M, 2)
    } else if !is_kernel_dim(n) {
        (Axis::N, head_below(n))
    } else {
        debug_assert!(!is_kernel_dim(k));
        (Axis::K, head_below(k))
    };

    match axis {
        Axis::M => {
            compose(head, n, k, a, lda, b, ldb, c, ldc);
            compose(
                m - head, n, k,
                a.stride_offset(lda as isize, head), lda,
                b, ldb,
                c.stride_offset(ldc as isize, head), ldc,
            );
        }
        Axis::N => {
            compose(m, head, k, a, lda, b, ldb, c, ldc);
            compose(m, n - head, k, a, lda, b.add(head), ldb, c.add(head), ldc);
        }
        Axis::K => {
            compose(m, n, head, a, lda, b, ldb, c, ldc);
            compose(
                m, n, k - head,
                a.add(head), lda,
                b.stride_offset(ldb as isize, head), ldb,
                c, ldc,
            );
        }
    }
}
