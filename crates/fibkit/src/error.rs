use alloc::string::String;
use core::fmt::Display;

/// Errors that can occur for `fibkit` operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A negative index was passed where only non-negative ones are accepted
    NegativeIndex(i64),

    /// The index exceeds the configured maximum
    IndexTooLarge {
        /// The requested index
        n: i64,
        /// The largest accepted index
        max: i64,
    },

    /// The index is too large for the naive recursive algorithm
    RecursiveIndexTooLarge {
        /// The requested index
        n: i64,
        /// The largest accepted index
        max: i64,
    },

    /// The result does not fit into an `i64`
    Overflow {
        /// The requested index
        n: i64,
    },

    /// An algorithm name could not be parsed
    UnknownAlgorithm(String),
}

impl Error {
    /// Get the message of the error
    pub fn message(&self) -> &'static str {
        match self {
            Self::NegativeIndex(_) => "n must be non-negative",
            Self::IndexTooLarge { .. } => "index too large",
            Self::RecursiveIndexTooLarge { .. } => "index too large for the recursive algorithm",
            Self::Overflow { .. } => "integer overflow",
            Self::UnknownAlgorithm(_) => "unknown algorithm",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NegativeIndex(n) => write!(f, "n must be non-negative: n={n}"),
            Self::IndexTooLarge { n, max } => write!(f, "n must be <= {max}: n={n}"),
            Self::RecursiveIndexTooLarge { n, max } => write!(
                f,
                "for the recursive algorithm without memoization, n must be <= {max} \
                 to avoid excessive computation time: n={n}"
            ),
            Self::Overflow { n } => {
                let max = crate::MAX_EXACT_INDEX;
                write!(f, "integer overflow: F({n}) does not fit in 64 bits (max index is {max})")
            }
            Self::UnknownAlgorithm(name) => {
                write!(f, "unknown algorithm: {name} (expected iterative, recursive or recursive_memo)")
            }
        }
    }
}

impl core::error::Error for Error {}

/// A wrapper around [`core::result::Result`] for fibkit operations
pub type Result<T, E = Error> = core::result::Result<T, E>;
