// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The blocked, packed multiplier for large operands.
//!
//! Three blocking tiers:
//!
//! - L2 tier: the iteration space is cut into `BM` × `BK` × `BN` blocks,
//!   sized so one packed A panel and one packed B panel fit in the
//!   mid-level cache. Edge blocks shrink to `min(remaining, block)`.
//! - Packing: before the inner loops run, the current A panel is copied
//!   into contiguous scratch of row stride `kc` with the row count padded
//!   to the tile height, and the B panel into scratch of row stride
//!   `round_up(nc, TILE_WIDTH)` with each row's tail zeroed. The padding
//!   makes every inner-loop read valid and exact-zero past the true
//!   extent, so one loop body serves full and partial blocks alike.
//! - Register tier: `TILE_HEIGHT` × `TILE_WIDTH` accumulator tiles are
//!   loaded from AB, updated with one broadcast A scalar against one
//!   packed B row vector per contraction step, and stored back.
//!
//! This computes the raw product only. alpha and beta are applied later
//! by the affine combiner; keeping the accumulation scale-free lets the
//! same loops serve every alpha/beta combination.

use core::ptr::copy_nonoverlapping;

use rawpointer::PointerExt;

use crate::aligned_alloc::Alloc;
use crate::archparam::{BK, BM, BN, TILE_HEIGHT, TILE_WIDTH};
use crate::kernel::Element;
use crate::util::{range_chunk, round_up_to};

// the tile loops below are unrolled with loop4!/loop8! for exactly this
// geometry
const _: () = assert!(TILE_HEIGHT == 4);
const _: () = assert!(TILE_WIDTH == 8);

/// AB += A·B through packing and cache blocking.
///
/// A is m × k (leading dimension `lda`), B is k × n (`ldb`). The
/// accumulator AB uses the padded geometry: `ldab` must be at least
/// `round_up(n, TILE_WIDTH)` and at least `round_up(m, TILE_HEIGHT)` rows
/// must be addressable, all zero-initialized by the caller; the padding
/// rows and columns let the register tiles load and store full vectors at
/// every edge. Only the true m × n region is meaningful on return.
pub(crate) unsafe fn multiply<T: Element>(
    m: usize, n: usize, k: usize,
    a: *const T, lda: usize,
    b: *const T, ldb: usize,
    ab: *mut T, ldab: usize,
) {
    debug_assert!(ldab >= round_up_to(n, TILE_WIDTH));

    let (mut scratch, b_offset) = packing_buffer::<T>(m, k, n);
    let apack = scratch.ptr_mut();
    let bpack = apack.add(b_offset);

    // LOOP 3: column blocks of B and AB
    for (l3, nc) in range_chunk(n, BN) {
        dprint!("LOOP 3, {}, nc={}", l3, nc);
        let b = b.add(BN * l3);
        let ab = ab.add(BN * l3);

        // LOOP 2: contraction blocks; AB accumulates across these
        for (l2, kc) in range_chunk(k, BK) {
            dprint!("LOOP 2, {}, kc={}", l2, kc);
            let b = b.stride_offset(ldb as isize, BK * l2);
            let a = a.add(BK * l2);

            // Pack B panel -> B~
            pack_b(kc, nc, bpack, b, ldb);

            // LOOP 1: row blocks of A and AB
            for (l1, mc) in range_chunk(m, BM) {
                dprint!("LOOP 1, {}, mc={}", l1, mc);
                let a = a.stride_offset(lda as isize, BM * l1);
                let ab = ab.stride_offset(ldab as isize, BM * l1);

                // Pack A panel -> A~
                pack_a(mc, kc, apack, a, lda);

                block_mult(mc, nc, kc, apack, bpack, ab, ldab);
            }
        }
    }
}

/// One scratch allocation for both pack panels, sized for one block pair
/// (smaller when the matrix itself is smaller). Returns the buffer and
/// the element offset where the B panel starts.
unsafe fn packing_buffer<T: Element>(m: usize, k: usize, n: usize) -> (Alloc<T>, usize) {
    let mc = core::cmp::min(m, BM);
    let kc = core::cmp::min(k, BK);
    let nc = core::cmp::min(n, BN);
    let apack_size = round_up_to(mc, TILE_HEIGHT) * kc;
    let bpack_size = kc * round_up_to(nc, TILE_WIDTH);
    (Alloc::new(apack_size + bpack_size, 32), apack_size)
}

/// Pack an mc × kc panel of A into contiguous rows of stride `kc`,
/// zero-padding the row count up to a multiple of the tile height.
unsafe fn pack_a<T: Element>(mc: usize, kc: usize, pack: *mut T, a: *const T, lda: usize) {
    let mut p = pack;
    for i in 0..mc {
        copy_nonoverlapping(a.stride_offset(lda as isize, i), p, kc);
        p = p.add(kc);
    }
    let zero = T::zero();
    for _ in mc..round_up_to(mc, TILE_HEIGHT) {
        for _ in 0..kc {
            *p = zero;
            p = p.add(1);
        }
    }
}

/// Pack a kc × nc panel of B into contiguous rows of stride
/// `round_up(nc, TILE_WIDTH)`, zeroing each row's padded tail.
unsafe fn pack_b<T: Element>(kc: usize, nc: usize, pack: *mut T, b: *const T, ldb: usize) {
    let width = round_up_to(nc, TILE_WIDTH);
    let zero = T::zero();
    let mut p = pack;
    for kk in 0..kc {
        copy_nonoverlapping(b.stride_offset(ldb as isize, kk), p, nc);
        for j in nc..width {
            *p.add(j) = zero;
        }
        p = p.add(width);
    }
}

/// Multiply one packed A panel against one packed B panel, accumulating
/// into the AB block, one register tile at a time.
unsafe fn block_mult<T: Element>(
    mc: usize, nc: usize, kc: usize,
    apack: *const T,
    bpack: *const T,
    ab: *mut T, ldab: usize,
) {
    let tile_rows = round_up_to(mc, TILE_HEIGHT) / TILE_HEIGHT;
    let tile_cols = round_up_to(nc, TILE_WIDTH) / TILE_WIDTH;
    let bstride = round_up_to(nc, TILE_WIDTH);

    for it in 0..tile_rows {
        for jt in 0..tile_cols {
            let c = ab
                .stride_offset(ldab as isize, TILE_HEIGHT * it)
                .add(TILE_WIDTH * jt);

            // the accumulator tile: TILE_HEIGHT rows of one register each
            let mut acc = [[T::zero(); TILE_WIDTH]; TILE_HEIGHT];
            loop4!(i, loop8!(x, acc[i][x] = *c.stride_offset(ldab as isize, i).add(x)));

            let mut arow = apack.add(TILE_HEIGHT * it * kc);
            let mut brow = bpack.add(TILE_WIDTH * jt);
            unroll_by_4!(kc, {
                loop4!(i, {
                    let av = *arow.add(i * kc);
                    loop8!(x, acc[i][x] += av * *brow.add(x));
                });
                arow = arow.add(1);
                brow = brow.add(bstride);
            });

            loop4!(i, loop8!(x, *c.stride_offset(ldab as isize, i).add(x) = acc[i][x]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_a_pads_rows() {
        let lda = 5;
        let a: Vec<f32> = (0..3 * lda).map(|i| i as f32).collect();
        let (mc, kc) = (3, 5);
        let mut pack = vec![-1.0f32; round_up_to(mc, TILE_HEIGHT) * kc];
        unsafe {
            pack_a(mc, kc, pack.as_mut_ptr(), a.as_ptr(), lda);
        }
        assert_eq!(&pack[..3 * kc], &a[..3 * kc]);
        assert!(pack[3 * kc..].iter().all(|&x| x == 0.));
    }

    #[test]
    fn test_pack_b_pads_row_tails() {
        let ldb = 23;
        let b: Vec<f32> = (0..2 * ldb).map(|i| i as f32).collect();
        let (kc, nc) = (2, 13);
        let width = round_up_to(nc, TILE_WIDTH);
        let mut pack = vec![-1.0f32; kc * width];
        unsafe {
            pack_b(kc, nc, pack.as_mut_ptr(), b.as_ptr(), ldb);
        }
        for kk in 0..kc {
            let row = &pack[kk * width..(kk + 1) * width];
            assert_eq!(&row[..nc], &b[kk * ldb..kk * ldb + nc]);
            assert!(row[nc..].iter().all(|&x| x == 0.));
        }
    }

    fn check_multiply(m: usize, n: usize, k: usize) {
        let lda = k + 1;
        let ldb = n + 2;
        let mut a = vec![0.0f64; m * lda];
        let mut b = vec![0.0f64; k * ldb];
        for (i, elt) in a.iter_mut().enumerate() {
            *elt = (i % 11) as f64 - 4.;
        }
        for (i, elt) in b.iter_mut().enumerate() {
            *elt = (i % 5) as f64 - 2.;
        }

        let ldab = round_up_to(n, TILE_WIDTH);
        let rows = round_up_to(m, TILE_HEIGHT);
        let mut ab = vec![0.0f64; rows * ldab];
        unsafe {
            multiply(m, n, k, a.as_ptr(), lda, b.as_ptr(), ldb, ab.as_mut_ptr(), ldab);
        }

        for i in 0..m {
            for j in 0..n {
                let mut expect = 0.0f64;
                for kk in 0..k {
                    expect += a[i * lda + kk] * b[kk * ldb + j];
                }
                assert_eq!(
                    ab[i * ldab + j], expect,
                    "multiply mismatch for {}x{}x{} at ({}, {})", m, k, n, i, j
                );
            }
        }
    }

    #[test]
    fn test_multiply_block_sizes() {
        check_multiply(BM, BK, BK);
        check_multiply(BM + 1, 17, BK + 1);
    }

    #[test]
    fn test_multiply_edges() {
        check_multiply(1, 1, 1);
        check_multiply(3, 300, 5);
        check_multiply(300, 4, 9);
        check_multiply(9, 4, 300);
        check_multiply(65, 65, 65);
        check_multiply(70, 100, 130);
    }
}
