// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//!
//! General matrix multiplication for f32, f64 matrices in row-major layout.
//!
//! The problem C ← α A B + β C is solved with one of two strategies picked
//! by operand size:
//!
//! - Small operands are decomposed recursively into calls of a fixed set of
//!   shape-specialized microkernels, selected through a dispatch table.
//!   No packing takes place; the data already fits in the cache.
//! - Large operands go through a packed, cache-blocked multiplier: panels
//!   of A and B are copied into contiguous zero-padded scratch buffers and
//!   multiplied register-tile by register-tile.
//!
//! Both strategies accumulate the raw product into a scratch accumulator;
//! α and β are applied in a single final combining pass over the true
//! output region.
//!
//! ## Matrix Representation
//!
//! Matrices are row major and described by a pointer, the dimensions, and a
//! *leading dimension*: the stride in elements between the start of
//! consecutive rows. The leading dimension may exceed the logical row
//! width, which allows operating on a sub-block of a larger allocation
//! without copying. For an m × k matrix `a`, element *(i, j)* lives at
//! `a[i * lda + j]` and `lda >= k` must hold.
//!
//! ## Scope
//!
//! Single-threaded and synchronous; all scratch is allocated per call and
//! released on return, so concurrent calls on distinct output matrices are
//! safe. No complex number support, no transposition flags.

extern crate rawpointer;

#[macro_use]
mod debugmacros;
#[macro_use]
mod loopmacros;
mod archparam;
mod constparse;
mod kernel;

mod aligned_alloc;
mod util;

mod combine;
mod dispatch;
mod gemm;
mod microkernel;
mod packed;
mod small;

pub use crate::gemm::dgemm;
pub use crate::gemm::sgemm;
