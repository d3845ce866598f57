//! Analysis result types
//!
//! Output of the sample-to-tone-scale pipeline:
//! - Histograms at each stage
//! - Detected peaks and the exported tone scale
//! - Melodic classification and metadata

pub mod result;

pub use result::{AnalysisFlag, AnalysisMetadata, AnalysisSummary, ToneScaleAnalysis};
