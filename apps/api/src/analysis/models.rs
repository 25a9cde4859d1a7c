//! Data model shared by the scoring pipeline, the insight generator and the HTTP layer.
//!
//! Field names are the JSON contract consumed by the frontend and the insight prompt.
//! Every value here is built once per analysis and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resume text split into the three scored sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub raw_text: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
}

/// A job description with its resolved skill requirements.
///
/// Built through `JobDescription::parse` (see `jd_resolver`), which rejects empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub raw_text: String,
    pub required_skills: Vec<String>,
}

/// Component and overall scores, each in [0, 100] with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub project_score: f64,
}

/// Per-skill classification of the JD requirements against the resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub strong_matches: Vec<String>,
    /// Reserved for partial matching; always empty today.
    pub weak_matches: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// The complete output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisComputations {
    pub scores: ScoringResult,
    pub skill_gap: SkillAnalysis,
    pub resume_data: ResumeContent,
    pub jd_data: JobDescription,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Job Description cannot be empty.")]
    EmptyJobDescription,
}
