//! Exact-match vocabularies for categorical columns. Keys are lower-case.

const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("entry", "junior"),
    ("entry level", "junior"),
    ("entry-level", "junior"),
    ("fresher", "junior"),
    ("beginner", "junior"),
    ("0-2 years", "junior"),
    ("intermediate", "mid"),
    ("mid level", "mid"),
    ("mid-level", "mid"),
    ("2-5 years", "mid"),
    ("3-6 years", "mid"),
    ("experienced", "senior"),
    ("senior level", "senior"),
    ("senior-level", "senior"),
    ("5+ years", "senior"),
    ("6+ years", "senior"),
    ("expert", "senior"),
    ("lead", "senior"),
];

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("job posting", "job_description"),
    ("job_posting", "job_description"),
    ("job ad", "job_description"),
    ("job_ad", "job_description"),
    ("interview_questions", "interview_question"),
    ("interview q&a", "interview_question"),
    ("resume", "resume_summary"),
    ("cv", "resume_summary"),
    ("cv_summary", "resume_summary"),
];

/// Lower-cases `raw` and maps known variants to `junior|mid|senior`; anything else passes through.
pub fn experience_level(raw: &str) -> String {
    lookup(EXPERIENCE_LEVELS, raw)
}

pub fn content_type(raw: &str) -> String {
    lookup(CONTENT_TYPES, raw)
}

fn lookup(table: &[(&str, &str)], raw: &str) -> String {
    let lower = raw.to_lowercase();
    table
        .iter()
        .find(|(variant, _)| *variant == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lower)
}
