#![no_std]
#![forbid(unsafe_code)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_assignments, unused_variables))
))]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Fibonacci numbers computed three ways: a plain loop, the textbook double
//! recursion, and a memoized recursion backed by a [`MemoCache`].
//!
//! ```
//! use fibkit::{fibonacci_iterative, fibonacci_recursive, MemoCache};
//!
//! let mut cache = MemoCache::new();
//! assert_eq!(fibonacci_iterative(20), 6765);
//! assert_eq!(fibonacci_recursive(20), 6765);
//! assert_eq!(cache.compute(20), 6765);
//! ```
//!
//! ## Features
//! - **`std`** (default)\
//!   Enables the process-wide cache behind [`fibonacci_recursive_memo`] and
//!   [`clear_memo`], and the timed [`calculator`].
//! - **`log`** (default)\
//!   Logs cache activity and calculator requests through the `log` facade.
//! - **`serde`**\
//!   Derives `Serialize`/`Deserialize` for the calculator's request and report types.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// log for logging (optional).
#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "log"))]
pub(crate) mod log {
    #[allow(unused_macros)]
    macro_rules! debug    ( ($($tt:tt)*) => {{}} );
    #[allow(unused_macros)]
    macro_rules! trace    ( ($($tt:tt)*) => {{}} );
    #[allow(unused_imports)]
    pub(crate) use debug;
    #[allow(unused_imports)]
    pub(crate) use trace;
}

#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use log::{debug, trace};

mod error;
pub use error::*;

pub mod algorithms;
pub use algorithms::{
    MAX_EXACT_INDEX, checked_fibonacci_iterative, checked_fibonacci_recursive, fibonacci_iterative,
    fibonacci_recursive,
};

pub mod memo;
pub use memo::{CacheStats, MemoCache};

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use memo::{clear_memo, fibonacci_recursive_memo, with_shared_memo};

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod calculator;
#[cfg(feature = "std")]
pub use calculator::{Algorithm, BenchmarkEntry, BenchmarkReport, Calculator, Computation, Limits, OverflowPolicy};
