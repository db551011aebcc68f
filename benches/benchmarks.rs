// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate bencher;

use bencher::{benchmark_group, benchmark_main, Bencher};

use tilegemm::{dgemm, sgemm};

// Square multiplications around the routing threshold and the packing
// block extents.
macro_rules! mat_mul {
    ($modname:ident, $gemm:ident, $elem:ty, $(($name:ident, $m:expr, $n:expr, $k:expr))+) => {
        mod $modname {
            use super::*;
            $(
            pub fn $name(bench: &mut Bencher) {
                let a = vec![<$elem>::zero(); $m * $k];
                let b = vec![<$elem>::zero(); $k * $n];
                let mut c = vec![<$elem>::zero(); $m * $n];
                bench.iter(|| {
                    unsafe {
                        $gemm(
                            $m, $n, $k,
                            1.,
                            a.as_ptr(), $k,
                            b.as_ptr(), $n,
                            0.,
                            c.as_mut_ptr(), $n,
                        );
                    }
                });
            }
            )+
        }
        benchmark_group!($modname,
            $($modname::$name),+
        );
    };
}

trait Zero {
    fn zero() -> Self;
}
impl Zero for f32 {
    fn zero() -> Self { 0. }
}
impl Zero for f64 {
    fn zero() -> Self { 0. }
}

mat_mul! {mat_mul_f32, sgemm, f32,
    (m004, 4, 4, 4)
    (m008, 8, 8, 8)
    (m012, 12, 12, 12)
    (m016, 16, 16, 16)
    (m032, 32, 32, 32)
    (m064, 64, 64, 64)
    (m127, 127, 127, 127)
    (m256, 256, 256, 256)
    (m512, 512, 512, 512)
    (mix16x4, 32, 4, 32)
    (mix32x2, 32, 2, 32)
}

mat_mul! {mat_mul_f64, dgemm, f64,
    (m004, 4, 4, 4)
    (m008, 8, 8, 8)
    (m012, 12, 12, 12)
    (m016, 16, 16, 16)
    (m032, 32, 32, 32)
    (m064, 64, 64, 64)
    (m127, 127, 127, 127)
    (m256, 256, 256, 256)
    (m512, 512, 512, 512)
}

benchmark_main!(mat_mul_f32, mat_mul_f64);
