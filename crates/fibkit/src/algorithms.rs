//! Stateless Fibonacci functions.
//!
//! All functions use F(0) = 0, F(1) = 1 and treat every index below zero as
//! the base case F(n) = 0. The unchecked variants wrap on overflow; the
//! `checked_` variants report [`Error::Overflow`] instead.

use crate::{Error, Result};

/// The largest index whose Fibonacci number fits into an `i64`.
pub const MAX_EXACT_INDEX: i64 = 92;

/// Compute the `n`-th Fibonacci number with a loop.
///
/// Runs in O(n) time and constant space. Results for `n > 92` wrap.
pub fn fibonacci_iterative(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }

    let (mut last, mut curr) = (0i64, 1i64);
    for _ in 2..=n {
        let next = last.wrapping_add(curr);
        last = curr;
        curr = next;
    }
    curr
}

/// Compute the `n`-th Fibonacci number by naive double recursion.
///
/// Exponential in `n`; only meant for small indices and for comparison with
/// the other variants.
pub fn fibonacci_recursive(n: i64) -> i64 {
    match n {
        ..=0 => 0,
        1 => 1,
        _ => fibonacci_recursive(n - 1).wrapping_add(fibonacci_recursive(n - 2)),
    }
}

/// Like [`fibonacci_iterative`], but fails with [`Error::Overflow`] instead of wrapping.
pub fn checked_fibonacci_iterative(n: i64) -> Result<i64> {
    if n <= 0 {
        return Ok(0);
    }

    let (mut last, mut curr) = (0i64, 1i64);
    for _ in 2..=n {
        let next = last.checked_add(curr).ok_or(Error::Overflow { n })?;
        last = curr;
        curr = next;
    }
    Ok(curr)
}

/// Like [`fibonacci_recursive`], but fails with [`Error::Overflow`] instead of wrapping.
pub fn checked_fibonacci_recursive(n: i64) -> Result<i64> {
    fn recurse(n: i64, requested: i64) -> Result<i64> {
        match n {
            ..=0 => Ok(0),
            1 => Ok(1),
            _ => recurse(n - 1, requested)?
                .checked_add(recurse(n - 2, requested)?)
                .ok_or(Error::Overflow { n: requested }),
        }
    }

    recurse(n, n)
}
