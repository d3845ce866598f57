//! Error types for histogram construction, binning and comparison

use thiserror::Error;

/// Result type for histogram operations
pub type Result<T> = std::result::Result<T, HistogramError>;

/// Errors that can occur while building or comparing histograms
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    /// Invalid histogram bounds or class layout
    #[error("Invalid range: {0}")]
    Range(String),

    /// A value fell outside a non-wrapping histogram's domain
    #[error("Value {value} is outside the histogram domain [{start}, {stop})")]
    OutOfRange {
        /// Offending value
        value: f64,
        /// Lower bound of the domain
        start: f64,
        /// Upper bound of the domain
        stop: f64,
    },

    /// Two histograms with a different shape were combined or compared
    #[error("Incompatible histograms: {0}")]
    IncompatibleHistogram(String),

    /// Invalid parameter passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
