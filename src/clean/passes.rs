use itertools::Itertools;

use super::vocab;
use crate::metrics::PassTracker;
use crate::record::{
    is_meaningful, Record, Table, COMPANY, CONTENT, CONTENT_TYPE, DESCRIPTION, EXPERIENCE_LEVEL,
    JOB_TITLE, LOCATION, MANUAL_SOURCE, SALARY, SOURCE,
};
use crate::text::{clean_location, clean_salary, has_word_char, normalize_text};

const MANUAL_KEY: &[&str] = &[CONTENT, CONTENT_TYPE];
const JOB_KEY: &[&str] = &[JOB_TITLE, COMPANY, DESCRIPTION, LOCATION];
const REQUIRED_TEXT: &[&str] = &[CONTENT, JOB_TITLE, DESCRIPTION];
/// Merge order for the canonical `content` body.
const MERGED_FIELDS: &[&str] = &[CONTENT, DESCRIPTION, JOB_TITLE];
const TEXT_COLUMNS: &[&str] = &[CONTENT, JOB_TITLE, COMPANY, DESCRIPTION];
const MIN_CONTENT_CHARS: usize = 5;

/// Dedup curated rows, job postings and everything else separately, keeping first occurrences.
/// A curated row never collides with a scraped one.
pub fn remove_duplicates(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    let rows = table.take_rows();

    let (manual, rest): (Vec<Record>, Vec<Record>) = rows.into_iter().partition(is_manual);
    let (jobs, others): (Vec<Record>, Vec<Record>) = rest.into_iter().partition(is_job_posting);

    let mut kept: Vec<Record> = manual
        .into_iter()
        .unique_by(|r| key_of(r, MANUAL_KEY))
        .collect();
    kept.extend(jobs.into_iter().unique_by(|r| key_of(r, JOB_KEY)));
    kept.extend(others.into_iter().unique());

    table.replace_rows(kept);
    tracker.record("remove_duplicates", table, before);
}

pub fn remove_empty_rows(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.retain(|r| REQUIRED_TEXT.iter().any(|c| r.has_text(c)));
    tracker.record("remove_empty_rows", table, before);
}

/// Builds `content` from every meaningful field in [`MERGED_FIELDS`] order, space-joined.
pub fn merge_content_fields(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.ensure_column(CONTENT);
    let merged: Vec<Record> = table
        .take_rows()
        .into_iter()
        .map(|mut row| {
            let content = merged_content(&row);
            row.set(CONTENT, content);
            row
        })
        .collect();
    table.replace_rows(merged);
    tracker.record("merge_content_fields", table, before);
}

/// Space-joins every meaningful field of [`MERGED_FIELDS`]. A row whose `content` already ends
/// with the joined `description` and `job_title` was merged before and keeps its content.
pub fn merged_content(row: &Record) -> String {
    let tail = MERGED_FIELDS[1..]
        .iter()
        .filter_map(|c| meaningful_field(row, c))
        .join(" ");
    match meaningful_field(row, CONTENT) {
        None => tail,
        Some(content)
            if tail.is_empty() || content == tail || content.ends_with(&format!(" {tail}")) =>
        {
            content.to_string()
        }
        Some(content) => format!("{content} {tail}"),
    }
}

fn meaningful_field<'a>(row: &'a Record, column: &str) -> Option<&'a str> {
    row.get(column).filter(|v| is_meaningful(v)).map(str::trim)
}

pub fn apply_text_cleaning(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    for column in TEXT_COLUMNS {
        table.map_column(column, |v| v.map(normalize_text));
    }
    tracker.record("apply_text_cleaning", table, before);
}

pub fn standardize_experience_levels(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.map_column(EXPERIENCE_LEVEL, |v| v.map(vocab::experience_level));
    tracker.record("standardize_experience_levels", table, before);
}

pub fn standardize_content_types(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.map_column(CONTENT_TYPE, |v| v.map(vocab::content_type));
    tracker.record("standardize_content_types", table, before);
}

pub fn clean_salary_data(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.map_column(SALARY, |v| Some(clean_salary(v)));
    tracker.record("clean_salary_data", table, before);
}

pub fn clean_location_data(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    table.map_column(LOCATION, |v| Some(clean_location(v)));
    tracker.record("clean_location_data", table, before);
}

/// Drops rows whose content is too short or has no word characters at all.
pub fn validate_and_filter(table: &mut Table, tracker: &mut PassTracker) {
    let before = table.len();
    if table.has_column(CONTENT) {
        table.retain(|r| {
            r.get(CONTENT)
                .is_some_and(|c| c.chars().count() >= MIN_CONTENT_CHARS && has_word_char(c))
        });
    }
    tracker.record("validate_and_filter", table, before);
}

fn is_manual(row: &Record) -> bool {
    row.get(SOURCE).is_some_and(|s| s.contains(MANUAL_SOURCE))
}

fn is_job_posting(row: &Record) -> bool {
    row.get(CONTENT_TYPE)
        .is_some_and(|t| t.contains("job_description"))
}

fn key_of(row: &Record, columns: &[&str]) -> Vec<Option<String>> {
    columns
        .iter()
        .map(|c| row.get(c).map(str::to_string))
        .collect()
}
