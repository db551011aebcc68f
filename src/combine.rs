// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The affine combiner: C := alpha·AB + beta·C.
//!
//! This is the only place alpha and beta enter the computation; the
//! multiplication paths produce the raw product and hand it here.
//!
//! beta == 0 means "overwrite", not "multiply by zero": C is never read
//! in that case, so uninitialized or NaN output memory is fine.

use rawpointer::PointerExt;

use crate::kernel::Element;

/// Fold the raw m × n product `ab` (row stride `ldab`) into `c` (row
/// stride `ldc`) as alpha·ab + beta·c.
pub(crate) unsafe fn combine<T: Element>(
    m: usize, n: usize,
    alpha: T,
    ab: *const T, ldab: usize,
    beta: T,
    c: *mut T, ldc: usize,
) {
    if beta.is_zero() {
        for i in 0..m {
            let ab = ab.stride_offset(ldab as isize, i);
            let c = c.stride_offset(ldc as isize, i);
            for j in 0..n {
                *c.add(j) = alpha * *ab.add(j);
            }
        }
    } else if beta.is_one() {
        for i in 0..m {
            let ab = ab.stride_offset(ldab as isize, i);
            let c = c.stride_offset(ldc as isize, i);
            for j in 0..n {
                *c.add(j) += alpha * *ab.add(j);
            }
        }
    } else {
        for i in 0..m {
            let ab = ab.stride_offset(ldab as isize, i);
            let c = c.stride_offset(ldc as isize, i);
            for j in 0..n {
                let elt = c.add(j);
                *elt = alpha * *ab.add(j) + beta * *elt;
            }
        }
    }
}

/// C := beta·C, used when the product term vanishes (alpha == 0 or an
/// empty contraction). beta == 0 still never reads C.
pub(crate) unsafe fn scale<T: Element>(m: usize, n: usize, beta: T, c: *mut T, ldc: usize) {
    if beta.is_zero() {
        for i in 0..m {
            let c = c.stride_offset(ldc as isize, i);
            for j in 0..n {
                *c.add(j) = T::zero();
            }
        }
    } else if !beta.is_one() {
        for i in 0..m {
            let c = c.stride_offset(ldc as isize, i);
            for j in 0..n {
                *c.add(j) *= beta;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_general() {
        let (m, n, ldab, ldc) = (2, 3, 4, 5);
        let ab: Vec<f64> = (0..m * ldab).map(|i| i as f64).collect();
        let mut c: Vec<f64> = (0..m * ldc).map(|i| 10. * i as f64).collect();
        let c0 = c.clone();
        unsafe {
            combine(m, n, 2.0, ab.as_ptr(), ldab, 3.0, c.as_mut_ptr(), ldc);
        }
        for i in 0..m {
            for j in 0..ldc {
                let expect = if j < n {
                    2.0 * ab[i * ldab + j] + 3.0 * c0[i * ldc + j]
                } else {
                    c0[i * ldc + j]
                };
                assert_eq!(c[i * ldc + j], expect);
            }
        }
    }

    #[test]
    fn test_combine_beta_zero_ignores_c() {
        let (m, n) = (3, 3);
        let ab: Vec<f32> = (0..m * n).map(|i| i as f32).collect();
        let mut c = vec![f32::NAN; m * n];
        unsafe {
            combine(m, n, 1.0, ab.as_ptr(), n, 0.0, c.as_mut_ptr(), n);
        }
        assert_eq!(c, ab);
    }

    #[test]
    fn test_combine_beta_one_accumulates() {
        let (m, n) = (2, 2);
        let ab = vec![1.0f64; m * n];
        let mut c = vec![5.0f64; m * n];
        unsafe {
            combine(m, n, 2.0, ab.as_ptr(), n, 1.0, c.as_mut_ptr(), n);
        }
        assert_eq!(c, vec![7.0; m * n]);
    }

    #[test]
    fn test_scale() {
        let mut c = vec![f64::NAN; 4];
        unsafe {
            scale(2, 2, 0.0, c.as_mut_ptr(), 2);
        }
        assert_eq!(c, vec![0.0; 4]);

        let mut c = vec![2.0f64; 4];
        unsafe {
            scale(2, 2, 1.5, c.as_mut_ptr(), 2);
        }
        assert_eq!(c, vec![3.0; 4]);
    }
}
