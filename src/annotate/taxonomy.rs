//! Static keyword taxonomies. All keywords are lower-case.

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;

use crate::text::bounded_pattern;

pub const OTHER_CATEGORY: &str = "other";

pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "kotlin", "swift",
            "typescript", "scala", "rust",
        ],
    ),
    (
        "web_technologies",
        &[
            "html", "css", "react", "angular", "vue", "node.js", "express", "django", "flask",
            "spring", "laravel", "jquery",
        ],
    ),
    (
        "databases",
        &[
            "mysql",
            "postgresql",
            "mongodb",
            "redis",
            "oracle",
            "sql server",
            "sqlite",
            "cassandra",
            "elasticsearch",
        ],
    ),
    (
        "cloud_platforms",
        &[
            "aws",
            "azure",
            "google cloud",
            "gcp",
            "docker",
            "kubernetes",
            "jenkins",
            "terraform",
        ],
    ),
    (
        "mobile_development",
        &["android", "ios", "react native", "flutter", "xamarin", "cordova"],
    ),
    (
        "data_science",
        &[
            "machine learning",
            "deep learning",
            "tensorflow",
            "pytorch",
            "pandas",
            "numpy",
            "scikit-learn",
            "r",
        ],
    ),
    (
        "tools",
        &["git", "jira", "confluence", "postman", "selenium", "junit", "maven", "gradle"],
    ),
];

/// Question categories in tie-break order: the first listed wins an equal score.
pub const QUESTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technical",
        &[
            "algorithm",
            "data structure",
            "coding",
            "programming",
            "sql",
            "database",
            "system design",
        ],
    ),
    (
        "behavioral",
        &["tell me about", "describe a time", "how do you handle", "what would you do"],
    ),
    (
        "conceptual",
        &["what is", "explain", "difference between", "how does", "define"],
    ),
];

pub const ADVANCED_TERMS: &[&str] = &[
    "algorithm",
    "complexity",
    "optimize",
    "design",
    "architecture",
];
pub const INTERMEDIATE_TERMS: &[&str] = &["implement", "code", "write", "solve"];

/// How a skill keyword has to appear in the text to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SkillMatch {
    /// Plain substring containment; `r` matches inside `career`.
    #[default]
    Substring,
    /// Keyword must be delimited by non-word characters or the text edges.
    Word,
}

/// Skill extractor over the flattened taxonomy.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    keywords: Vec<(&'static str, Option<Regex>)>,
}

impl SkillMatcher {
    pub fn new(mode: SkillMatch) -> Self {
        let keywords = SKILL_CATEGORIES
            .iter()
            .flat_map(|(_, skills)| skills.iter())
            .map(|skill| {
                let pattern = match mode {
                    SkillMatch::Substring => None,
                    SkillMatch::Word => Some(bounded_pattern(skill)),
                };
                (*skill, pattern)
            })
            .collect();
        SkillMatcher { keywords }
    }

    /// Matched keywords in taxonomy declaration order, each at most once.
    pub fn extract(&self, text: &str) -> Vec<&'static str> {
        let lower = text.to_lowercase();
        let mut found: Vec<&'static str> = Vec::new();
        for (skill, pattern) in &self.keywords {
            let skill = *skill;
            let hit = match pattern {
                Some(re) => re.is_match(&lower),
                None => lower.contains(skill),
            };
            if hit && !found.contains(&skill) {
                found.push(skill);
            }
        }
        found
    }
}

pub fn categorize_skill(skill: &str) -> &'static str {
    SKILL_CATEGORIES
        .iter()
        .find(|(_, skills)| skills.contains(&skill))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keywords_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for (_, skills) in SKILL_CATEGORIES {
            for skill in *skills {
                assert_eq!(*skill, skill.to_lowercase());
                assert!(seen.insert(*skill), "duplicate keyword {skill}");
            }
        }
    }

    #[test]
    fn scenario_posting_skills() {
        let matcher = SkillMatcher::new(SkillMatch::Substring);
        let text = "We need a software engineer with 5+ years experience in Python, Java, AWS, \
                    Docker, React, MongoDB, Git, and Jenkins.";
        let skills = matcher.extract(text);
        for expected in ["python", "java", "aws", "docker", "react", "mongodb", "git", "jenkins"] {
            assert!(skills.contains(&expected), "missing {expected}");
        }
        assert!(skills.len() >= 8);
    }

    #[test]
    fn substring_mode_matches_inside_words() {
        let matcher = SkillMatcher::new(SkillMatch::Substring);
        let skills = matcher.extract("Career in algorithms");
        assert!(skills.contains(&"r"));
        assert!(skills.contains(&"go"));
    }

    #[test]
    fn word_mode_requires_boundaries() {
        let matcher = SkillMatcher::new(SkillMatch::Word);
        let skills = matcher.extract("Career in algorithms with C++ and Node.js");
        assert!(!skills.contains(&"r"));
        assert!(!skills.contains(&"go"));
        assert!(skills.contains(&"c++"));
        assert!(skills.contains(&"node.js"));
    }

    #[test]
    fn extracted_skills_come_from_taxonomy() {
        let matcher = SkillMatcher::new(SkillMatch::Substring);
        let all: HashSet<&str> = SKILL_CATEGORIES
            .iter()
            .flat_map(|(_, s)| s.iter().copied())
            .collect();
        for skill in matcher.extract("Kotlin, Swift, Flutter, Terraform on GCP, plus COBOL") {
            assert!(all.contains(skill));
        }
    }

    #[test]
    fn categorize_falls_back_to_other() {
        assert_eq!(categorize_skill("redis"), "databases");
        assert_eq!(categorize_skill("r"), "data_science");
        assert_eq!(categorize_skill("cobol"), OTHER_CATEGORY);
    }
}
