//! Runs the scoring pipeline for one resume/JD pair.
//!
//! Flow: normalize resume + JD text → three component similarities → weighted score →
//!       skill-gap analysis on the raw resume text → `AnalysisComputations`.
//!
//! The engine owns no mutable state. Its ontology and similarity backend are injected at
//! construction and shared read-only across concurrent analyses.

use std::sync::Arc;

use tracing::info;

use crate::analysis::models::{AnalysisComputations, AnalysisError, JobDescription, ResumeContent};
use crate::analysis::normalize::normalize;
use crate::analysis::ontology::Ontology;
use crate::analysis::scoring::score;
use crate::analysis::segmenter::segment;
use crate::analysis::similarity::TextSimilarity;
use crate::analysis::skill_gap::analyze_gap;

/// Runs the deterministic scoring pipeline over an already-parsed resume and JD.
pub fn analyze(
    resume: ResumeContent,
    jd: JobDescription,
    similarity: &dyn TextSimilarity,
) -> AnalysisComputations {
    let normalized_resume = normalize(&resume.raw_text);
    let normalized_jd = normalize(&jd.raw_text);

    let scores = score(
        &resume,
        &jd,
        &normalized_resume,
        &normalized_jd,
        similarity,
    );
    let skill_gap = analyze_gap(&resume.raw_text, &jd.required_skills);

    AnalysisComputations {
        scores,
        skill_gap,
        resume_data: resume,
        jd_data: jd,
    }
}

/// Scoring pipeline with its read-only collaborators bound.
#[derive(Clone)]
pub struct AnalysisEngine {
    ontology: Arc<Ontology>,
    similarity: Arc<dyn TextSimilarity>,
}

impl AnalysisEngine {
    pub fn new(ontology: Arc<Ontology>, similarity: Arc<dyn TextSimilarity>) -> Self {
        Self {
            ontology,
            similarity,
        }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Validates and resolves a raw JD against the engine's ontology.
    pub fn parse_jd(&self, jd_text: &str) -> Result<JobDescription, AnalysisError> {
        JobDescription::parse(jd_text, &self.ontology)
    }

    pub fn analyze(&self, resume: ResumeContent, jd: JobDescription) -> AnalysisComputations {
        let computations = analyze(resume, jd, self.similarity.as_ref());
        info!(
            overall = computations.scores.overall_score,
            strong = computations.skill_gap.strong_matches.len(),
            missing = computations.skill_gap.missing_skills.len(),
            "Analysis complete"
        );
        computations
    }

    /// Segments the resume, resolves the JD and scores the pair.
    ///
    /// The only failure is an empty JD; sparse input degrades to weaker scores instead.
    pub fn analyze_text(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<AnalysisComputations, AnalysisError> {
        let jd = self.parse_jd(jd_text)?;
        let resume = segment(resume_text);
        Ok(self.analyze(resume, jd))
    }
}
