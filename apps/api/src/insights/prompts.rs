// Prompt fragments for the insight model. The system prompt is the three fragments joined by
// blank lines; the user message carries the serialized analysis.

pub const ANALYSIS_PROMPT: &str = "\
    You are a senior technical recruiter reviewing a deterministic resume analysis. \
    The scores and skill gaps you receive were computed by a rule engine and are final: \
    do NOT recompute, contradict or invent scores. \
    Explain in 3-5 plain sentences why the candidate scored as they did, citing the \
    strongest and weakest components and the most important missing skills.";

pub const ATS_PROMPT: &str = "\
    Then give concrete ATS (applicant tracking system) suggestions: keywords from the \
    job description that are missing from the resume, section headers to standardize, \
    and formatting issues that commonly break parsing. Each suggestion is one sentence.";

pub const REWRITE_PROMPT: &str = "\
    Finally, rewrite up to five experience or project bullets from the resume so they \
    lead with a strong verb, state a measurable outcome where the original implies one, \
    and naturally include missing skills ONLY when the resume already supports them. \
    Never fabricate employers, numbers or technologies.";

pub const RESPONSE_FORMAT_INSTRUCTION: &str = "\
    Respond with a single JSON object and nothing else, with exactly these keys: \
    \"summary_explanation\" (string), \"ats_suggestions\" (array of strings), \
    \"rewritten_bullets\" (array of strings).";

/// Full system prompt sent with every insight request.
pub fn system_prompt() -> String {
    [
        ANALYSIS_PROMPT,
        ATS_PROMPT,
        REWRITE_PROMPT,
        RESPONSE_FORMAT_INSTRUCTION,
    ]
    .join("\n\n")
}

/// User message wrapping the serialized analysis.
pub fn user_prompt(analysis_json: &str) -> String {
    format!("Here is the Analysis Data:\n{analysis_json}")
}
