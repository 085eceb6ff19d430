//! Wire types for the analysis service (WASM-compatible).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skillsight_core::UserId;

/// Request body for `POST /api/analyze/`.
///
/// Field names are the service's contract; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub target_role: String,
    pub skills: Vec<String>,
    pub resume_text: String,
    pub firebase_uid: UserId,
}

/// One learning recommendation in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Skill-gap report returned by `POST /api/analyze/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub target_role: String,
    /// How well the current skills match the target role, 0..=100.
    pub match_score: f32,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Error body the service uses on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// Response body for `POST /api/parse-resume/`.
#[derive(Debug, Deserialize)]
pub(crate) struct ParsedResume {
    pub text: String,
}
