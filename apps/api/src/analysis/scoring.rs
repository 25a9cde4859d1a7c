use tracing::debug;

use crate::analysis::models::{JobDescription, ResumeContent, ScoringResult};
use crate::analysis::similarity::TextSimilarity;

pub const SKILLS_WEIGHT: f64 = 0.45;
pub const EXPERIENCE_WEIGHT: f64 = 0.35;
pub const PROJECTS_WEIGHT: f64 = 0.20;

/// Weighted overall score at the [0, 1] scale.
pub fn weighted_overall(skills: f64, experience: f64, projects: f64) -> f64 {
    SKILLS_WEIGHT * skills + EXPERIENCE_WEIGHT * experience + PROJECTS_WEIGHT * projects
}

/// Scales a [0, 1] similarity to a percentage rounded to two decimals.
pub fn to_percentage(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 100.0 * 100.0).round() / 100.0
}

/// Computes the three component similarities and the weighted overall score.
///
/// An empty resume section falls back to the whole normalized resume; an empty skill list
/// falls back to the whole normalized JD. `normalized_resume` and `normalized_jd` are the
/// normalized raw texts.
pub fn score(
    resume: &ResumeContent,
    jd: &JobDescription,
    normalized_resume: &str,
    normalized_jd: &str,
    similarity: &dyn TextSimilarity,
) -> ScoringResult {
    let resume_skills = joined_or(&resume.skills, normalized_resume);
    let jd_skills = joined_or(&jd.required_skills, normalized_jd);
    let resume_experience = joined_or(&resume.experience, normalized_resume);
    let resume_projects = joined_or(&resume.projects, normalized_resume);

    let skills = similarity.similarity(&resume_skills, &jd_skills);
    let experience = similarity.similarity(&resume_experience, normalized_jd);
    let projects = similarity.similarity(&resume_projects, normalized_jd);
    let overall = weighted_overall(skills, experience, projects);

    debug!(
        backend = similarity.backend_name(),
        skills, experience, projects, overall, "Component similarities computed"
    );

    ScoringResult {
        overall_score: to_percentage(overall),
        skills_score: to_percentage(skills),
        experience_score: to_percentage(experience),
        project_score: to_percentage(projects),
    }
}

fn joined_or(lines: &[String], fallback: &str) -> String {
    let joined = lines.join(" ");
    if joined.trim().is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}
