//! In-memory table shared by every stage: ordered header plus one sparse record per row.

use std::collections::BTreeMap;

pub const SOURCE: &str = "source";
pub const CONTENT: &str = "content";
pub const CONTENT_TYPE: &str = "content_type";
pub const JOB_TITLE: &str = "job_title";
pub const COMPANY: &str = "company";
pub const LOCATION: &str = "location";
pub const DESCRIPTION: &str = "description";
pub const SALARY: &str = "salary";
pub const EXPERIENCE: &str = "experience";
pub const DIFFICULTY: &str = "difficulty";
pub const CATEGORY: &str = "category";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const DOMAIN: &str = "domain";

/// Scrapers write this when a field could not be found on the page.
pub const NOT_AVAILABLE: &str = "N/A";

pub const MANUAL_SOURCE: &str = "manual_collection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    JobDescription,
    InterviewQuestion,
    ResumeSummary,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::JobDescription,
        ContentType::InterviewQuestion,
        ContentType::ResumeSummary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::JobDescription => "job_description",
            ContentType::InterviewQuestion => "interview_question",
            ContentType::ResumeSummary => "resume_summary",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

/// One row. Absent and empty cells are the same thing: an unknown value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Stores `value`, or clears the cell when it is empty.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.fields.remove(column);
        } else {
            self.fields.insert(column.to_string(), value);
        }
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.fields.remove(column)
    }

    /// True when the cell holds something other than whitespace or the `N/A` marker.
    pub fn has_text(&self, column: &str) -> bool {
        self.get(column).is_some_and(is_meaningful)
    }

    pub fn content_type(&self) -> Option<ContentType> {
        self.get(CONTENT_TYPE).and_then(ContentType::from_label)
    }
}

pub fn is_meaningful(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_parts(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.rows.retain(f);
    }

    /// Moves the rows out, leaving the header in place.
    pub fn take_rows(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.rows)
    }

    pub fn replace_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
    }

    /// Rewrites one column row by row. Skipped entirely when the column is not in the header.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> bool
    where
        F: FnMut(Option<&str>) -> Option<String>,
    {
        if !self.has_column(column) {
            return false;
        }
        for row in self.rows.iter_mut() {
            match f(row.get(column)) {
                Some(v) => row.set(column, v),
                None => {
                    row.remove(column);
                }
            }
        }
        true
    }
}
