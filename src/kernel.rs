// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::ops::{Add, AddAssign, Mul, MulAssign};

/// The scalar element type of the multiplication.
///
/// The whole engine is generic over this; f32 and f64 are treated
/// uniformly by every algorithm.
pub(crate) trait Element:
    Copy
    + Send
    + Sync
    + Add<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + MulAssign
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;
}

impl Element for f32 {
    fn zero() -> Self { 0. }
    fn one() -> Self { 1. }
    fn is_zero(&self) -> bool { *self == 0. }
    fn is_one(&self) -> bool { *self == 1. }
}

impl Element for f64 {
    fn zero() -> Self { 0. }
    fn one() -> Self { 1. }
    fn is_zero(&self) -> bool { *self == 0. }
    fn is_one(&self) -> bool { *self == 1. }
}

/// A shape-specialized multiply-accumulate routine.
///
/// For its fixed (M, K, N) the kernel computes, for i ∈ [0, M), j ∈ [0, N),
///
/// C\[i\]\[j\] += Σ_k A\[i\]\[k\] · B\[k\]\[j\]
///
/// + `a`: M × K block, row stride `rsa`
/// + `b`: K × N block, row stride `rsb`
/// + `c`: M × N block, row stride `rsc`
///
/// Accumulation only; the caller zeroes or pre-loads the destination.
/// Strides for blocks with a single row are ignored. The caller guarantees
/// the shape: a kernel is only ever reached through a dispatch table hit.
pub(crate) type MicroKernel<T> =
    unsafe fn(a: *const T, rsa: isize, b: *const T, rsb: isize, c: *mut T, rsc: isize);
