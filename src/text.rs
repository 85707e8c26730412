//! Free-text cleanup shared by the normalizer passes.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::record::is_meaningful;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[a-zA-Z]+;").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,!?\-():;'"]"#).unwrap());
static PERIODS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static COMMAS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",{2,}").unwrap());
static SALARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d.,\-\s\w]").unwrap());
static DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\d+\s*km[^,]*").unwrap());
static REMOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)work from home|wfh|remote").unwrap());

pub const SALARY_UNDISCLOSED: &str = "Not disclosed";
pub const REMOTE: &str = "Remote";

/// Decode entities, then drop tags and any entity that survived decoding.
pub fn strip_markup(text: &str) -> String {
    let decoded = decode_html_entities(text);
    let without_tags = TAG_RE.replace_all(&decoded, "");
    ENTITY_RE.replace_all(&without_tags, "").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    SPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Canonical form of a scraped text field. Applying it twice gives the same result.
pub fn normalize_text(text: &str) -> String {
    let text = collapse_whitespace(&strip_markup(text));
    let text = DISALLOWED_RE.replace_all(&text, "");
    let text = PERIODS_RE.replace_all(&text, ".");
    let text = COMMAS_RE.replace_all(&text, ",");
    // stripped symbols can leave double spaces behind
    collapse_whitespace(&text)
}

pub fn clean_salary(raw: Option<&str>) -> String {
    match raw.filter(|s| is_meaningful(s)) {
        None => SALARY_UNDISCLOSED.to_string(),
        Some(salary) => collapse_whitespace(&SALARY_RE.replace_all(salary.trim(), "")),
    }
}

/// Drops "N km from ..." clauses (up to the next comma) and folds WFH spellings into `Remote`.
pub fn clean_location(raw: Option<&str>) -> String {
    let Some(location) = raw.filter(|s| is_meaningful(s)) else {
        return REMOTE.to_string();
    };
    let location = normalize_text(location);
    let location = DISTANCE_RE.replace_all(&location, "");
    let location = REMOTE_RE.replace_all(&location, REMOTE);
    collapse_whitespace(&location)
        .trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .to_string()
}

/// True when `text` holds at least one word character.
pub fn has_word_char(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Whole-term matcher: `needle` must sit between non-word characters or the text edges.
/// Works for terms that start or end with punctuation such as `c++` or `node.js`.
pub fn bounded_pattern(needle: &str) -> Regex {
    let pattern = format!(r"(?:^|[^\w]){}(?:$|[^\w])", regex::escape(needle));
    Regex::new(&pattern).expect("escaped keyword is a valid pattern")
}
