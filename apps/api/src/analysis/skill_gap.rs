use crate::analysis::models::SkillAnalysis;

/// Classifies each required skill as a strong match or missing.
///
/// Matching is a case-insensitive substring test against the raw resume text, looser than the
/// whole-term matching used to extract JD skills: "python" matches "python," and "Python3".
/// `weak_matches` is never populated.
pub fn analyze_gap(resume_text: &str, required_skills: &[String]) -> SkillAnalysis {
    let resume_lower = resume_text.to_lowercase();
    let (strong_matches, missing_skills): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .cloned()
        .partition(|skill| resume_lower.contains(&skill.to_lowercase()));

    SkillAnalysis {
        strong_matches,
        weak_matches: Vec::new(),
        missing_skills,
    }
}
