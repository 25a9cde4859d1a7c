//! Resolves the required skills of a job description.
//!
//! Two tiers:
//! 1. Explicit extraction: every ontology token that appears in the normalized JD as a
//!    whole, space-delimited term.
//! 2. Role inference, only when tier 1 finds nothing: classify the JD into a role and use
//!    that role's default skills from the ontology. Indicator keywords match anywhere in the
//!    normalized text, so "APIs", "AI-driven" and "React.js" still count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::models::{AnalysisError, JobDescription};
use crate::analysis::normalize::normalize;
use crate::analysis::ontology::Ontology;

/// Role inferred from a JD that names no known skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    AiAutomationEngineer,
    PythonBackendDeveloper,
    FrontendDeveloper,
    GenericSoftwareEngineer,
}

impl Role {
    /// Role id used as the key in `roles.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::AiAutomationEngineer => "ai_automation_engineer",
            Role::PythonBackendDeveloper => "python_backend_developer",
            Role::FrontendDeveloper => "frontend_developer",
            Role::GenericSoftwareEngineer => "generic_software_engineer",
        }
    }
}

/// Indicator keywords per role, in priority order. First group with a hit wins.
const ROLE_INDICATORS: &[(Role, &[&str])] = &[
    (
        Role::AiAutomationEngineer,
        &["ai", "llm", "automation", "machine learning", "rag"],
    ),
    (
        Role::PythonBackendDeveloper,
        &["backend", "fastapi", "api", "django", "server"],
    ),
    (
        Role::FrontendDeveloper,
        &["frontend", "react", "javascript", "ui/ux"],
    ),
];

impl JobDescription {
    /// Validates and resolves a raw JD. Empty or whitespace-only text is rejected before any
    /// resolution happens.
    pub fn parse(raw_text: &str, ontology: &Ontology) -> Result<Self, AnalysisError> {
        if raw_text.trim().is_empty() {
            return Err(AnalysisError::EmptyJobDescription);
        }
        Ok(Self {
            raw_text: raw_text.to_string(),
            required_skills: resolve_skills(raw_text, ontology),
        })
    }
}

/// Explicit extraction first, role defaults as the fallback.
pub fn resolve_skills(jd_text: &str, ontology: &Ontology) -> Vec<String> {
    let explicit = extract_skills(jd_text, ontology);
    if !explicit.is_empty() {
        debug!("Found {} explicit skills in JD", explicit.len());
        return explicit;
    }

    let role = detect_role(jd_text);
    let defaults = ontology
        .role_defaults(role.as_str())
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    debug!(
        "No explicit skills found; inferred role {} with {} default skills",
        role.as_str(),
        defaults.len()
    );
    defaults
}

/// Ontology tokens present in the JD as whole terms, in ontology order.
pub fn extract_skills(text: &str, ontology: &Ontology) -> Vec<String> {
    let haystack = padded(&normalize(text));
    if haystack.trim().is_empty() {
        return Vec::new();
    }
    ontology
        .skills()
        .iter()
        .filter(|skill| contains_term(&haystack, skill))
        .cloned()
        .collect()
}

/// Classifies a JD into a role by its indicator keywords.
///
/// Keywords are plain substrings of the normalized text; "ai" also fires inside "maintain".
pub fn detect_role(text: &str) -> Role {
    let haystack = normalize(text);
    ROLE_INDICATORS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(role, _)| *role)
        .unwrap_or(Role::GenericSoftwareEngineer)
}

fn padded(normalized: &str) -> String {
    format!(" {normalized} ")
}

/// `haystack` must already be space-padded; the term is padded here so "go" never matches
/// inside "going".
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.contains(&format!(" {term} "))
}
