use std::sync::LazyLock;

use regex::Regex;

use super::labels::{Difficulty, ExperienceLevel, QuestionType};
use super::taxonomy::{SkillMatcher, ADVANCED_TERMS, INTERMEDIATE_TERMS, QUESTION_KEYWORDS};

static EXPERIENCE_PATTERNS: LazyLock<Vec<(ExperienceLevel, Vec<Regex>)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
            .collect()
    };
    vec![
        (
            ExperienceLevel::Junior,
            compile(&[
                r"\b(0-2|1-2)\s*year",
                r"\bfresh",
                r"\bentry",
                r"\bbeginner",
                r"\bjunior",
            ]),
        ),
        (
            ExperienceLevel::Mid,
            compile(&[r"\b(2-5|3-6|3-5)\s*year", r"\bmid", r"\bintermediate"]),
        ),
        (
            ExperienceLevel::Senior,
            compile(&[
                r"\b(5\+|6\+|7\+|8\+)\s*year",
                r"\bsenior",
                r"\blead",
                r"\bprincipal",
                r"\barchitect",
            ]),
        ),
    ]
});

/// A trusted `junior|mid|senior` label always wins. Otherwise the first level with a matching
/// pattern, then a fallback on how many skills the text mentions.
pub fn determine_experience_level(
    text: Option<&str>,
    existing_level: Option<&str>,
    matcher: &SkillMatcher,
) -> ExperienceLevel {
    if let Some(level) = existing_level.and_then(ExperienceLevel::from_label) {
        return level;
    }
    let Some(text) = text else {
        return ExperienceLevel::Unknown;
    };
    let lower = text.to_lowercase();

    for (level, patterns) in EXPERIENCE_PATTERNS.iter() {
        if patterns.iter().any(|re| re.is_match(&lower)) {
            return *level;
        }
    }

    let skill_count = matcher.extract(&lower).len();
    if skill_count >= 8 {
        ExperienceLevel::Senior
    } else if skill_count >= 4 {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Junior
    }
}

/// Scores each category by keyword hits. Ties keep the earlier category.
pub fn classify_question_type(text: Option<&str>) -> QuestionType {
    let Some(text) = text else {
        return QuestionType::Unknown;
    };
    let lower = text.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for (category, keywords) in QUESTION_KEYWORDS {
        let score = keywords.iter().filter(|k| lower.contains(**k)).count();
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((*category, score));
        }
    }

    match best.map(|(category, _)| category) {
        Some("technical") => QuestionType::Technical,
        Some("behavioral") => QuestionType::Behavioral,
        Some("conceptual") => QuestionType::Conceptual,
        _ => QuestionType::General,
    }
}

/// Advanced vocabulary beats intermediate when both appear.
pub fn infer_difficulty(question: &str) -> Difficulty {
    let lower = question.to_lowercase();
    if ADVANCED_TERMS.iter().any(|t| lower.contains(t)) {
        Difficulty::Advanced
    } else if INTERMEDIATE_TERMS.iter().any(|t| lower.contains(t)) {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}
