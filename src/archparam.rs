// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Blocking parameters for the packed multiplier and the small/large
//! routing threshold.
//!
//! These are cache tuning knobs, not semantic requirements; any positive
//! value produces correct results. The defaults target a common
//! 32K L1 / 512K-1M L2 configuration. Each `TILEGEMM_*` environment
//! variable, when set while compiling this crate, overrides the matching
//! constant.

use crate::constparse::env_or;

/// Rows of the packed A panel (L2 block height).
pub(crate) const BM: usize = env_or(option_env!("TILEGEMM_BM"), 64);

/// Shared contraction extent of the packed A and B panels.
pub(crate) const BK: usize = env_or(option_env!("TILEGEMM_BK"), 256);

/// Columns of the packed B panel (L2 block width).
pub(crate) const BN: usize = env_or(option_env!("TILEGEMM_BN"), 256);

/// If m, n and k are all below this, the composed-microkernel path is used
/// instead of packing. Packing overhead is pure waste for operands that
/// already fit in L1.
pub(crate) const SMALL_THRESHOLD: usize =
    env_or(option_env!("TILEGEMM_SMALL_THRESHOLD"), 64);

/// Rows of one register tile in the packed inner loop.
///
/// Not configurable: the inner loop is unrolled for exactly this geometry.
pub(crate) const TILE_HEIGHT: usize = 4;

/// Columns of one register tile; one vector register worth of elements.
pub(crate) const TILE_WIDTH: usize = 8;

// The packed accumulator is addressed in whole register tiles, so the L2
// blocks must tile evenly.
const _: () = assert!(BM % TILE_HEIGHT == 0);
const _: () = assert!(BN % TILE_WIDTH == 0);
const _: () = assert!(BK > 0);
const _: () = assert!(SMALL_THRESHOLD > 0);
