// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::cmp::min;

#[derive(Copy, Clone)]
pub(crate) struct RangeChunk {
    i: usize,
    n: usize,
    chunk: usize,
}

/// Create an iterator that splits `n` in chunks of size `chunk`;
/// the last item can be an uneven chunk.
///
/// Yields `(index, len)` pairs, never a zero-length chunk.
pub(crate) fn range_chunk(n: usize, chunk: usize) -> RangeChunk {
    RangeChunk { i: 0, n, chunk }
}

impl Iterator for RangeChunk {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 {
            None
        } else {
            let i = self.i;
            let rem = min(self.n, self.chunk);
            self.i += 1;
            self.n -= rem;
            Some((i, rem))
        }
    }
}

#[inline]
pub(crate) fn round_up_to(x: usize, multiple_of: usize) -> usize {
    let (mut d, r) = (x / multiple_of, x % multiple_of);
    if r > 0 {
        d += 1;
    }
    d * multiple_of
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_chunk() {
        let chunks: Vec<_> = range_chunk(10, 4).collect();
        assert_eq!(chunks, vec![(0, 4), (1, 4), (2, 2)]);

        let chunks: Vec<_> = range_chunk(8, 4).collect();
        assert_eq!(chunks, vec![(0, 4), (1, 4)]);

        assert_eq!(range_chunk(0, 4).count(), 0);
        assert_eq!(range_chunk(3, 64).collect::<Vec<_>>(), vec![(0, 3)]);
    }

    #[test]
    fn test_round_up_to() {
        assert_eq!(round_up_to(0, 8), 0);
        assert_eq!(round_up_to(1, 8), 8);
        assert_eq!(round_up_to(8, 8), 8);
        assert_eq!(round_up_to(9, 8), 16);
    }
}
