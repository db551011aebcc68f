// Copyright 2025 - 2026 tilegemm developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Const evaluation of `usize` values from environment variable strings,
//! used by `archparam` to let the blocking parameters be overridden at
//! compile time.

/// Parse a decimal `usize`; any non-digit byte is a compile error when
/// evaluated in const context.
pub(crate) const fn parse_unwrap(s: &str) -> usize {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty TILEGEMM_* environment variable");

    let mut value: usize = 0;
    let mut index = 0;
    while index < bytes.len() {
        let digit = bytes[index].wrapping_sub(b'0');
        assert!(digit <= 9, "invalid digit in TILEGEMM_* environment variable");
        value = value * 10 + digit as usize;
        index += 1;
    }
    value
}

/// Value of the env var if set at compile time, the default otherwise.
pub(crate) const fn env_or(value: Option<&str>, default: usize) -> usize {
    match value {
        Some(s) => parse_unwrap(s),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_unwrap("0"), 0);
        assert_eq!(parse_unwrap("64"), 64);
        assert_eq!(parse_unwrap("1024"), 1024);
    }

    #[test]
    fn test_env_or() {
        assert_eq!(env_or(None, 256), 256);
        assert_eq!(env_or(Some("32"), 256), 32);
    }
}
