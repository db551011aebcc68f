// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The kernel dispatch table.
//!
//! A shape (M, K, N) is encoded as the integer `100·M + 10·K + N` and
//! looked up in a single `match`, which the compiler lowers to a jump
//! table; the mapping is fixed at compile time and immutable.
//!
//! The table covers M ∈ {1, 2} with K, N ∈ {1, 2, 4, 8}. Shapes with
//! M ∈ {4, 8} are a deliberate gap: measurements did not justify another
//! 32 hand-written kernels, and the composer reduces those shapes to two
//! M ∈ {1, 2} rows each. Every lookup miss must go through decomposition;
//! calling with an unsupported shape is a caller bug, not a checked error.

use crate::kernel::{Element, MicroKernel};
use crate::microkernel::*;

/// Largest value a single microkernel covers along any axis.
pub(crate) const MAX_DIM: usize = 8;

/// Dispatch key for a shape triple.
#[inline]
pub(crate) fn encode(m: usize, k: usize, n: usize) -> usize {
    100 * m + 10 * k + n
}

/// Look up the microkernel for an exact (m, n, k) shape.
///
/// Returns `None` for any shape without a hand-written kernel; the caller
/// is expected to decompose further (see `small::compose`).
pub(crate) fn lookup<T: Element>(m: usize, n: usize, k: usize) -> Option<MicroKernel<T>> {
    let kernel: MicroKernel<T> = match encode(m, k, n) {
        111 => kernel_111,
        112 => kernel_112,
        114 => kernel_114,
        118 => kernel_118,
        121 => kernel_121,
        122 => kernel_122,
        124 => kernel_124,
        128 => kernel_128,
        141 => kernel_141,
        142 => kernel_142,
        144 => kernel_144,
        148 => kernel_148,
        181 => kernel_181,
        182 => kernel_182,
        184 => kernel_184,
        188 => kernel_188,
        211 => kernel_211,
        212 => kernel_212,
        214 => kernel_214,
        218 => kernel_218,
        221 => kernel_221,
        222 => kernel_222,
        224 => kernel_224,
        228 => kernel_228,
        241 => kernel_241,
        242 => kernel_242,
        244 => kernel_244,
        248 => kernel_248,
        281 => kernel_281,
        282 => kernel_282,
        284 => kernel_284,
        288 => kernel_288,
        _ => return None,
    };
    Some(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_DIMS: [usize; 4] = [1, 2, 4, 8];

    #[test]
    fn test_supported_shapes() {
        let mut hits = 0;
        for &m in &SMALL_DIMS {
            for &k in &SMALL_DIMS {
                for &n in &SMALL_DIMS {
                    let hit = lookup::<f64>(m, n, k).is_some();
                    assert_eq!(hit, m <= 2, "unexpected table entry for {}x{}x{}", m, k, n);
                    hits += hit as usize;
                }
            }
        }
        assert_eq!(hits, 32);
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(lookup::<f32>(3, 1, 1).is_none());
        assert!(lookup::<f32>(1, 3, 1).is_none());
        assert!(lookup::<f32>(1, 1, 3).is_none());
        assert!(lookup::<f32>(4, 4, 4).is_none());
        assert!(lookup::<f32>(8, 8, 8).is_none());
        assert!(lookup::<f32>(0, 1, 1).is_none());
    }

    // Run every kernel in the table against a scalar triple loop, with
    // leading dimensions wider than the blocks so stride handling is
    // exercised too. Inputs are small integers, so comparison is exact.
    #[test]
    fn test_every_kernel_matches_reference() {
        for &m in &[1usize, 2] {
            for &k in &SMALL_DIMS {
                for &n in &SMALL_DIMS {
                    check_kernel(m, n, k);
                }
            }
        }
    }

    fn check_kernel(m: usize, n: usize, k: usize) {
        let kernel = lookup::<f64>(m, n, k)
            .unwrap_or_else(|| panic!("missing kernel for {}x{}x{}", m, k, n));

        let lda = k + 3;
        let ldb = n + 1;
        let ldc = n + 2;
        let mut a = vec![0.0f64; m * lda];
        let mut b = vec![0.0f64; k * ldb];
        let mut c = vec![0.0f64; m * ldc];

        for i in 0..m {
            for kk in 0..k {
                a[i * lda + kk] = (1 + i * k + kk) as f64;
            }
        }
        for kk in 0..k {
            for j in 0..n {
                b[kk * ldb + j] = (2 + kk + 3 * j) as f64;
            }
        }
        for (i, elt) in c.iter_mut().enumerate() {
            *elt = i as f64; // nonzero start: kernels accumulate
        }
        let c0 = c.clone();

        unsafe {
            kernel(
                a.as_ptr(), lda as isize,
                b.as_ptr(), ldb as isize,
                c.as_mut_ptr(), ldc as isize,
            );
        }

        for i in 0..m {
            for j in 0..n {
                let mut expect = c0[i * ldc + j];
                for kk in 0..k {
                    expect += a[i * lda + kk] * b[kk * ldb + j];
                }
                assert_eq!(
                    c[i * ldc + j], expect,
                    "kernel {}x{}x{} mismatch at ({}, {})", m, k, n, i, j
                );
            }
        }
        // untouched elements stay untouched
        for i in 0..m {
            for j in n..ldc {
                assert_eq!(c[i * ldc + j], c0[i * ldc + j]);
            }
        }
    }
}
