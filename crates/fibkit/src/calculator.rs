//! Validated, timed Fibonacci requests and side-by-side benchmarks.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt::Display, str::FromStr, time::Duration};
use std::time::Instant;

use crate::{Error, MemoCache, Result, algorithms};

/// The algorithm used to compute a Fibonacci number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    /// A plain loop
    #[default]
    Iterative,
    /// Naive double recursion
    Recursive,
    /// Recursion with a [`MemoCache`]
    RecursiveMemo,
}

impl Algorithm {
    /// All algorithms, fastest first
    pub const ALL: [Algorithm; 3] = [Algorithm::Iterative, Algorithm::RecursiveMemo, Algorithm::Recursive];

    /// The canonical name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::Recursive => "recursive",
            Self::RecursiveMemo => "recursive_memo",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iterative" => Ok(Self::Iterative),
            "recursive" => Ok(Self::Recursive),
            "recursive_memo" | "recursive-memo" | "memo" => Ok(Self::RecursiveMemo),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Bounds applied to incoming requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// The largest index accepted for any algorithm
    pub max_index: i64,
    /// The largest index accepted for [`Algorithm::Recursive`]
    pub max_recursive_index: i64,
    /// [`Calculator::benchmark`] only runs [`Algorithm::Recursive`] up to this index
    pub benchmark_recursive_cutoff: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_index: 10_000, max_recursive_index: 40, benchmark_recursive_cutoff: 35 }
    }
}

/// What to do when a result does not fit into an `i64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// Report [`Error::Overflow`]
    #[default]
    Fail,
    /// Return the two's complement wrapped value
    Wrap,
}

/// The outcome of a single [`Calculator::compute`] request
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Computation {
    /// The requested index
    pub n: i64,
    /// F(n)
    pub result: i64,
    /// The algorithm that produced the result
    pub algorithm: Algorithm,
    /// Wall-clock time spent computing
    #[cfg_attr(feature = "serde", serde(rename = "computation_time_ms", serialize_with = "serialize_ms"))]
    pub elapsed: Duration,
}

/// One algorithm's row in a [`BenchmarkReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BenchmarkEntry {
    /// The benchmarked algorithm
    pub algorithm: Algorithm,
    /// F(n), if it could be computed
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub result: Option<i64>,
    /// Why the computation failed
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    /// Wall-clock time spent computing, for successful runs
    #[cfg_attr(feature = "serde", serde(rename = "time_ms", serialize_with = "serialize_opt_ms"))]
    pub elapsed: Option<Duration>,
}

/// All algorithms run against the same index
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BenchmarkReport {
    /// The benchmarked index
    pub n: i64,
    /// One entry per algorithm that was run
    pub results: Vec<BenchmarkEntry>,
}

impl BenchmarkReport {
    /// Whether every successful entry produced the same value
    pub fn is_consistent(&self) -> bool {
        let mut values = self.results.iter().filter_map(|entry| entry.result);
        match values.next() {
            Some(first) => values.all(|value| value == first),
            None => true,
        }
    }

    /// The entry for `algorithm`, if it was run
    pub fn entry(&self, algorithm: Algorithm) -> Option<&BenchmarkEntry> {
        self.results.iter().find(|entry| entry.algorithm == algorithm)
    }
}

#[cfg(feature = "serde")]
fn serialize_ms<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

#[cfg(feature = "serde")]
fn serialize_opt_ms<S: serde::Serializer>(elapsed: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match elapsed {
        Some(elapsed) => serialize_ms(elapsed, serializer),
        None => serializer.serialize_none(),
    }
}

/// Validates requests against [`Limits`], runs the selected algorithm and times it.
///
/// The calculator owns its [`MemoCache`]. Unless [`Calculator::reuse_memo`] is
/// enabled, the cache is cleared before every memoized request so that the
/// reported time always covers a full computation.
#[derive(Debug, Default)]
pub struct Calculator {
    limits: Limits,
    overflow: OverflowPolicy,
    reuse_memo: bool,
    memo: MemoCache,
}

impl Calculator {
    /// Create a calculator with default limits that fails on overflow
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the overflow policy
    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Keep memo entries between requests
    pub fn reuse_memo(mut self, reuse: bool) -> Self {
        self.reuse_memo = reuse;
        self
    }

    /// The active limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The calculator's memo cache
    pub fn memo(&self) -> &MemoCache {
        &self.memo
    }

    /// Discard every memo entry
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Check `n` against the limits for `algorithm`
    pub fn validate(&self, n: i64, algorithm: Algorithm) -> Result<()> {
        if n < 0 {
            return Err(Error::NegativeIndex(n));
        }

        if algorithm == Algorithm::Recursive && n > self.limits.max_recursive_index {
            return Err(Error::RecursiveIndexTooLarge { n, max: self.limits.max_recursive_index });
        }

        if n > self.limits.max_index {
            return Err(Error::IndexTooLarge { n, max: self.limits.max_index });
        }

        Ok(())
    }

    /// Validate and compute F(n) with `algorithm`
    pub fn compute(&mut self, n: i64, algorithm: Algorithm) -> Result<Computation> {
        self.validate(n, algorithm)?;
        let (result, elapsed) = self.timed(n, algorithm)?;
        crate::debug!("F({n}) = {result} using {algorithm} in {elapsed:?}");
        Ok(Computation { n, result, algorithm, elapsed })
    }

    /// Run every applicable algorithm for `n`.
    ///
    /// [`Algorithm::Recursive`] is skipped above the benchmark cutoff. A failing
    /// algorithm, e.g. because of overflow, is recorded in its entry instead of
    /// failing the whole report.
    pub fn benchmark(&mut self, n: i64) -> Result<BenchmarkReport> {
        self.validate(n, Algorithm::Iterative)?;

        let cutoff = self.limits.benchmark_recursive_cutoff;
        let algorithms =
            Algorithm::ALL.into_iter().filter(|algorithm| *algorithm != Algorithm::Recursive || n <= cutoff);

        let mut results = Vec::new();
        for algorithm in algorithms {
            let entry = match self.timed(n, algorithm) {
                Ok((result, elapsed)) => {
                    BenchmarkEntry { algorithm, result: Some(result), error: None, elapsed: Some(elapsed) }
                }
                Err(err) => BenchmarkEntry { algorithm, result: None, error: Some(err.to_string()), elapsed: None },
            };
            crate::debug!("benchmark F({n}) {algorithm}: {entry:?}");
            results.push(entry);
        }

        Ok(BenchmarkReport { n, results })
    }

    fn timed(&mut self, n: i64, algorithm: Algorithm) -> Result<(i64, Duration)> {
        if algorithm == Algorithm::RecursiveMemo && !self.reuse_memo {
            self.memo.clear();
        }

        let start = Instant::now();
        let result = self.evaluate(n, algorithm)?;
        Ok((result, start.elapsed()))
    }

    fn evaluate(&mut self, n: i64, algorithm: Algorithm) -> Result<i64> {
        match (algorithm, self.overflow) {
            (Algorithm::Iterative, OverflowPolicy::Fail) => algorithms::checked_fibonacci_iterative(n),
            (Algorithm::Iterative, OverflowPolicy::Wrap) => Ok(algorithms::fibonacci_iterative(n)),
            (Algorithm::Recursive, OverflowPolicy::Fail) => algorithms::checked_fibonacci_recursive(n),
            (Algorithm::Recursive, OverflowPolicy::Wrap) => Ok(algorithms::fibonacci_recursive(n)),
            (Algorithm::RecursiveMemo, OverflowPolicy::Fail) => self.memo.try_compute(n),
            (Algorithm::RecursiveMemo, OverflowPolicy::Wrap) => Ok(self.memo.compute(n)),
        }
    }
}
