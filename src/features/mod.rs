//! Histogram analysis modules
//!
//! This module contains the algorithms layered on top of the binning engine:
//! - Correlation measures and displacement search
//! - Smoothing (moving average, Gaussian)
//! - Kernel density accumulation
//! - Peak detection
//! - Pitch-class and pitch histograms, tone scales and scale matching

pub mod correlation;
pub mod kde;
pub mod peaks;
pub mod smoothing;
pub mod tone_scale;
