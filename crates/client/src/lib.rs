//! `skillsight-client` — HTTP client for the remote analysis service.
//!
//! The frontend is a thin shell: analysis and resume parsing happen
//! server-side; this crate only moves JSON and files.

pub mod analysis;
pub mod types;

pub use analysis::{AnalysisClient, ApiError};
pub use types::{AnalysisReport, AnalyzeRequest, Recommendation};
