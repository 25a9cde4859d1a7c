//! Splits decoded resume text into skills, experience and projects lines by heuristic headers.
//!
//! A line is a section header when, trimmed and lowercased, it is shorter than
//! `MAX_HEADER_LEN` characters and contains one of the section keywords. Header lines are
//! consumed; content lines go to the bucket of the most recent header.

use crate::analysis::models::ResumeContent;

const MAX_HEADER_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Skills,
    Experience,
    Projects,
}

/// Header keywords per section, in tie-break priority order.
const SECTION_KEYWORDS: &[(Section, &[&str])] = &[
    (
        Section::Skills,
        &["skills", "technologies", "technical skills", "stack"],
    ),
    (
        Section::Experience,
        &["experience", "work history", "employment", "internships"],
    ),
    (
        Section::Projects,
        &["projects", "personal projects", "academic projects"],
    ),
];

/// Splits raw resume text into sections.
///
/// Lines before the first header are dropped. When no header is found at all, every
/// non-blank line is treated as experience so the resume never comes back empty.
pub fn segment(raw_text: &str) -> ResumeContent {
    let mut skills = Vec::new();
    let mut experience = Vec::new();
    let mut projects = Vec::new();
    let mut current: Option<Section> = None;

    for line in raw_text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(section) = detect_header(trimmed) {
            current = Some(section);
            continue;
        }

        match current {
            Some(Section::Skills) => skills.push(trimmed.to_string()),
            Some(Section::Experience) => experience.push(trimmed.to_string()),
            Some(Section::Projects) => projects.push(trimmed.to_string()),
            None => {}
        }
    }

    if skills.is_empty() && experience.is_empty() && projects.is_empty() {
        experience = raw_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
    }

    ResumeContent {
        raw_text: raw_text.to_string(),
        skills,
        experience,
        projects,
    }
}

/// Returns the section a line opens, if it looks like a header.
fn detect_header(trimmed: &str) -> Option<Section> {
    let lowered = trimmed.to_lowercase();
    if lowered.chars().count() >= MAX_HEADER_LEN {
        return None;
    }
    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(section, _)| *section)
}
