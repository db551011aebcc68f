// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The microkernel set: one multiply-accumulate routine per supported
//! (M, K, N) shape, M ∈ {1, 2}, K and N ∈ {1, 2, 4, 8}.
//!
//! Naming: `kernel_MKN`, digits in dispatch-encoding order. Each kernel
//! exploits its exact shape: K=1 kernels are rank-1 row updates, N=1
//! kernels are dot products with a horizontal reduction, and the rest keep
//! whole B rows live across the output row so every loaded lane is reused.
//!
//! The kernels are written portably with fixed-size lane arrays and the
//! straight-line loop macros; the shapes are chosen so the accumulators
//! fit in vector registers and the autovectorizer emits wide arithmetic.

use crate::kernel::Element;

#[inline(always)]
unsafe fn at<T: Element>(p: *const T, i: usize) -> T {
    *p.add(i)
}

#[inline(always)]
unsafe fn load2<T: Element>(p: *const T) -> [T; 2] {
    [at(p, 0), at(p, 1)]
}

#[inline(always)]
unsafe fn load4<T: Element>(p: *const T) -> [T; 4] {
    [at(p, 0), at(p, 1), at(p, 2), at(p, 3)]
}

#[inline(always)]
unsafe fn load8<T: Element>(p: *const T) -> [T; 8] {
    [at(p, 0), at(p, 1), at(p, 2), at(p, 3), at(p, 4), at(p, 5), at(p, 6), at(p, 7)]
}

/// Load one column of a strided block: p[0], p[s], p[2s], p[3s].
#[inline(always)]
unsafe fn gather4<T: Element>(p: *const T, stride: isize) -> [T; 4] {
    [*p, *p.offset(stride), *p.offset(2 * stride), *p.offset(3 * stride)]
}

#[inline(always)]
unsafe fn gather8<T: Element>(p: *const T, stride: isize) -> [T; 8] {
    [
        *p,
        *p.offset(stride),
        *p.offset(2 * stride),
        *p.offset(3 * stride),
        *p.offset(4 * stride),
        *p.offset(5 * stride),
        *p.offset(6 * stride),
        *p.offset(7 * stride),
    ]
}

/// Horizontal reduction of an elementwise product, paired for shorter
/// dependency chains.
#[inline(always)]
fn dot2<T: Element>(x: [T; 2], y: [T; 2]) -> T {
    x[0] * y[0] + x[1] * y[1]
}

#[inline(always)]
fn dot4<T: Element>(x: [T; 4], y: [T; 4]) -> T {
    (x[0] * y[0] + x[1] * y[1]) + (x[2] * y[2] + x[3] * y[3])
}

#[inline(always)]
fn dot8<T: Element>(x: [T; 8], y: [T; 8]) -> T {
    ((x[0] * y[0] + x[1] * y[1]) + (x[2] * y[2] + x[3] * y[3]))
        + ((x[4] * y[4] + x[5] * y[5]) + (x[6] * y[6] + x[7] * y[7]))
}

///////////////////////////////////////
//           M=1, K=1 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_111<T: Element>(
    a: *const T, _rsa: isize, b: *const T, _rsb: isize, c: *mut T, _rsc: isize,
) {
    *c += *a * *b;
}

pub(crate) unsafe fn kernel_112<T: Element>(
    a: *const T, _rsa: isize, b: *const T, _rsb: isize, c: *mut T, _rsc: isize,
) {
    loop2!(j, *c.add(j) += at(a, 0) * at(b, j));
}

pub(crate) unsafe fn kernel_114<T: Element>(
    a: *const T, _rsa: isize, b: *const T, _rsb: isize, c: *mut T, _rsc: isize,
) {
    loop4!(j, *c.add(j) += at(a, 0) * at(b, j));
}

pub(crate) unsafe fn kernel_118<T: Element>(
    a: *const T, _rsa: isize, b: *const T, _rsb: isize, c: *mut T, _rsc: isize,
) {
    loop8!(j, *c.add(j) += at(a, 0) * at(b, j));
}

///////////////////////////////////////
//           M=1, K=2 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_121<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    *c += dot2(load2(a), [*b, *b.offset(rsb)]);
}

pub(crate) unsafe fn kernel_122<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    loop2!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
}

pub(crate) unsafe fn kernel_124<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    loop4!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
}

pub(crate) unsafe fn kernel_128<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    loop8!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
}

///////////////////////////////////////
//           M=1, K=4 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_141<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    *c += dot4(load4(a), gather4(b, rsb));
}

pub(crate) unsafe fn kernel_142<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let wa = load4(a);
    *c.add(0) += dot4(wa, gather4(b, rsb));
    *c.add(1) += dot4(wa, gather4(b.add(1), rsb));
}

pub(crate) unsafe fn kernel_144<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    loop4!(j, *c.add(j) += (at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                         + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)));
}

pub(crate) unsafe fn kernel_148<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    loop8!(j, *c.add(j) += (at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                         + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)));
}

///////////////////////////////////////
//           M=1, K=8 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_181<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    *c += dot8(load8(a), gather8(b, rsb));
}

pub(crate) unsafe fn kernel_182<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let wa = load8(a);
    *c.add(0) += dot8(wa, gather8(b, rsb));
    *c.add(1) += dot8(wa, gather8(b.add(1), rsb));
}

pub(crate) unsafe fn kernel_184<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let b4 = b.offset(4 * rsb);
    let b5 = b.offset(5 * rsb);
    let b6 = b.offset(6 * rsb);
    let b7 = b.offset(7 * rsb);
    loop4!(j, *c.add(j) += ((at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                          + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)))
                         + ((at(a, 4) * at(b4, j) + at(a, 5) * at(b5, j))
                          + (at(a, 6) * at(b6, j) + at(a, 7) * at(b7, j))));
}

pub(crate) unsafe fn kernel_188<T: Element>(
    a: *const T, _rsa: isize, b: *const T, rsb: isize, c: *mut T, _rsc: isize,
) {
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let b4 = b.offset(4 * rsb);
    let b5 = b.offset(5 * rsb);
    let b6 = b.offset(6 * rsb);
    let b7 = b.offset(7 * rsb);
    loop8!(j, *c.add(j) += ((at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                          + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)))
                         + ((at(a, 4) * at(b4, j) + at(a, 5) * at(b5, j))
                          + (at(a, 6) * at(b6, j) + at(a, 7) * at(b7, j))));
}

///////////////////////////////////////
//           M=2, K=1 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_211<T: Element>(
    a: *const T, rsa: isize, b: *const T, _rsb: isize, c: *mut T, rsc: isize,
) {
    *c += *a * *b;
    *c.offset(rsc) += *a.offset(rsa) * *b;
}

pub(crate) unsafe fn kernel_212<T: Element>(
    a: *const T, rsa: isize, b: *const T, _rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let c1 = c.offset(rsc);
    loop2!(j, *c.add(j) += at(a, 0) * at(b, j));
    loop2!(j, *c1.add(j) += at(a1, 0) * at(b, j));
}

pub(crate) unsafe fn kernel_214<T: Element>(
    a: *const T, rsa: isize, b: *const T, _rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let c1 = c.offset(rsc);
    loop4!(j, *c.add(j) += at(a, 0) * at(b, j));
    loop4!(j, *c1.add(j) += at(a1, 0) * at(b, j));
}

pub(crate) unsafe fn kernel_218<T: Element>(
    a: *const T, rsa: isize, b: *const T, _rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let c1 = c.offset(rsc);
    loop8!(j, *c.add(j) += at(a, 0) * at(b, j));
    loop8!(j, *c1.add(j) += at(a1, 0) * at(b, j));
}

///////////////////////////////////////
//           M=2, K=2 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_221<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let wb = [*b, *b.offset(rsb)];
    *c += dot2(load2(a), wb);
    *c.offset(rsc) += dot2(load2(a.offset(rsa)), wb);
}

pub(crate) unsafe fn kernel_222<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let c1 = c.offset(rsc);
    loop2!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
    loop2!(j, *c1.add(j) += at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j));
}

pub(crate) unsafe fn kernel_224<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let c1 = c.offset(rsc);
    loop4!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
    loop4!(j, *c1.add(j) += at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j));
}

pub(crate) unsafe fn kernel_228<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let c1 = c.offset(rsc);
    loop8!(j, *c.add(j) += at(a, 0) * at(b, j) + at(a, 1) * at(b1, j));
    loop8!(j, *c1.add(j) += at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j));
}

///////////////////////////////////////
//           M=2, K=4 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_241<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let wb = gather4(b, rsb);
    *c += dot4(load4(a), wb);
    *c.offset(rsc) += dot4(load4(a.offset(rsa)), wb);
}

pub(crate) unsafe fn kernel_242<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let wa0 = load4(a);
    let wa1 = load4(a.offset(rsa));
    let wb0 = gather4(b, rsb);
    let wb1 = gather4(b.add(1), rsb);
    let c1 = c.offset(rsc);
    *c.add(0) += dot4(wa0, wb0);
    *c.add(1) += dot4(wa0, wb1);
    *c1.add(0) += dot4(wa1, wb0);
    *c1.add(1) += dot4(wa1, wb1);
}

pub(crate) unsafe fn kernel_244<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let c1 = c.offset(rsc);
    loop4!(j, *c.add(j) += (at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                         + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)));
    loop4!(j, *c1.add(j) += (at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j))
                          + (at(a1, 2) * at(b2, j) + at(a1, 3) * at(b3, j)));
}

pub(crate) unsafe fn kernel_248<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let c1 = c.offset(rsc);
    loop8!(j, *c.add(j) += (at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                         + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)));
    loop8!(j, *c1.add(j) += (at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j))
                          + (at(a1, 2) * at(b2, j) + at(a1, 3) * at(b3, j)));
}

///////////////////////////////////////
//           M=2, K=8 kernels        //
///////////////////////////////////////

pub(crate) unsafe fn kernel_281<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let wb = gather8(b, rsb);
    *c += dot8(load8(a), wb);
    *c.offset(rsc) += dot8(load8(a.offset(rsa)), wb);
}

pub(crate) unsafe fn kernel_282<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let wa0 = load8(a);
    let wa1 = load8(a.offset(rsa));
    let wb0 = gather8(b, rsb);
    let wb1 = gather8(b.add(1), rsb);
    let c1 = c.offset(rsc);
    *c.add(0) += dot8(wa0, wb0);
    *c.add(1) += dot8(wa0, wb1);
    *c1.add(0) += dot8(wa1, wb0);
    *c1.add(1) += dot8(wa1, wb1);
}

pub(crate) unsafe fn kernel_284<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let b4 = b.offset(4 * rsb);
    let b5 = b.offset(5 * rsb);
    let b6 = b.offset(6 * rsb);
    let b7 = b.offset(7 * rsb);
    let c1 = c.offset(rsc);
    loop4!(j, *c.add(j) += ((at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                          + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)))
                         + ((at(a, 4) * at(b4, j) + at(a, 5) * at(b5, j))
                          + (at(a, 6) * at(b6, j) + at(a, 7) * at(b7, j))));
    loop4!(j, *c1.add(j) += ((at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j))
                           + (at(a1, 2) * at(b2, j) + at(a1, 3) * at(b3, j)))
                          + ((at(a1, 4) * at(b4, j) + at(a1, 5) * at(b5, j))
                           + (at(a1, 6) * at(b6, j) + at(a1, 7) * at(b7, j))));
}

pub(crate) unsafe fn kernel_288<T: Element>(
    a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize,
) {
    let a1 = a.offset(rsa);
    let b1 = b.offset(rsb);
    let b2 = b.offset(2 * rsb);
    let b3 = b.offset(3 * rsb);
    let b4 = b.offset(4 * rsb);
    let b5 = b.offset(5 * rsb);
    let b6 = b.offset(6 * rsb);
    let b7 = b.offset(7 * rsb);
    let c1 = c.offset(rsc);
    loop8!(j, *c.add(j) += ((at(a, 0) * at(b, j) + at(a, 1) * at(b1, j))
                          + (at(a, 2) * at(b2, j) + at(a, 3) * at(b3, j)))
                         + ((at(a, 4) * at(b4, j) + at(a, 5) * at(b5, j))
                          + (at(a, 6) * at(b6, j) + at(a, 7) * at(b7, j))));
    loop8!(j, *c1.add(j) += ((at(a1, 0) * at(b, j) + at(a1, 1) * at(b1, j))
                           + (at(a1, 2) * at(b2, j) + at(a1, 3) * at(b3, j)))
                          + ((at(a1, 4) * at(b4, j) + at(a1, 5) * at(b5, j))
                           + (at(a1, 6) * at(b6, j) + at(a1, 7) * at(b7, j))));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Accumulation semantics: the kernel adds on top of what is in C.
    #[test]
    fn test_kernel_accumulates() {
        let a: [f64; 2] = [3., 4.];
        let b: [f64; 2] = [10., 20.];
        let mut c = [100.];
        unsafe {
            // 1×2 · 2×1: c += 3·10 + 4·20
            kernel_121(a.as_ptr(), 0, b.as_ptr(), 1, c.as_mut_ptr(), 0);
        }
        assert_eq!(c[0], 210.);
    }

    // Row strides larger than the block width must be respected.
    #[test]
    fn test_kernel_strided() {
        const LDA: usize = 11;
        const LDB: usize = 9;
        const LDC: usize = 10;
        let mut a = [0.0f32; 2 * LDA];
        let mut b = [0.0f32; 8 * LDB];
        let mut c = [0.0f32; 2 * LDC];
        for i in 0..2 {
            for kk in 0..8 {
                a[i * LDA + kk] = (1 + i * 8 + kk) as f32;
            }
        }
        for kk in 0..8 {
            for j in 0..8 {
                b[kk * LDB + j] = (1 + kk + j) as f32;
            }
        }
        unsafe {
            kernel_288(
                a.as_ptr(), LDA as isize,
                b.as_ptr(), LDB as isize,
                c.as_mut_ptr(), LDC as isize,
            );
        }
        for i in 0..2 {
            for j in 0..8 {
                let mut expect = 0.0f32;
                for kk in 0..8 {
                    expect += a[i * LDA + kk] * b[kk * LDB + j];
                }
                assert_eq!(c[i * LDC + j], expect, "mismatch at ({}, {})", i, j);
            }
        }
    }
}
