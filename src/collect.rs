//! Collector stage: curated seed corpus (JSON) to the raw table.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::record::{
    ContentType, Record, Table, CATEGORY, COMPANY, CONTENT, CONTENT_TYPE, DESCRIPTION, DIFFICULTY,
    DOMAIN, EXPERIENCE, EXPERIENCE_LEVEL, JOB_TITLE, LOCATION, MANUAL_SOURCE, NOT_AVAILABLE,
    SALARY, SOURCE,
};
use crate::store;

/// Header of the raw table, in file order.
pub const RAW_COLUMNS: &[&str] = &[
    SOURCE,
    CONTENT,
    CONTENT_TYPE,
    JOB_TITLE,
    COMPANY,
    LOCATION,
    DESCRIPTION,
    SALARY,
    EXPERIENCE,
    DIFFICULTY,
    CATEGORY,
    EXPERIENCE_LEVEL,
    DOMAIN,
];

const DEFAULT_JOB_SOURCE: &str = "seed_corpus";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedCorpus {
    pub interview_questions: Vec<SeedQuestion>,
    pub resume_samples: Vec<SeedResume>,
    pub job_postings: Vec<SeedPosting>,
}

#[derive(Debug, Deserialize)]
pub struct SeedQuestion {
    pub content: String,
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedResume {
    pub content: String,
    pub experience_level: Option<String>,
    pub domain: Option<String>,
}

/// A posting as captured from a job board. Missing listing fields are stored as `N/A`.
#[derive(Debug, Deserialize)]
pub struct SeedPosting {
    pub source: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
}

/// Owned accumulator for raw records.
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<Record>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_table(self) -> Table {
        Table::from_parts(
            RAW_COLUMNS.iter().map(|c| c.to_string()).collect(),
            self.records,
        )
    }
}

fn with_optional(record: Record, column: &str, value: Option<&String>) -> Record {
    match value {
        Some(v) => record.with(column, v.as_str()),
        None => record,
    }
}

pub fn collect_interview_questions(collector: &mut Collector, questions: &[SeedQuestion]) {
    for q in questions {
        let record = Record::new()
            .with(SOURCE, MANUAL_SOURCE)
            .with(CONTENT, q.content.as_str())
            .with(CONTENT_TYPE, ContentType::InterviewQuestion.as_str());
        let record = with_optional(record, DIFFICULTY, q.difficulty.as_ref());
        collector.push(with_optional(record, CATEGORY, q.category.as_ref()));
    }
}

pub fn collect_resume_samples(collector: &mut Collector, resumes: &[SeedResume]) {
    for r in resumes {
        let record = Record::new()
            .with(SOURCE, MANUAL_SOURCE)
            .with(CONTENT, r.content.as_str())
            .with(CONTENT_TYPE, ContentType::ResumeSummary.as_str());
        let record = with_optional(record, EXPERIENCE_LEVEL, r.experience_level.as_ref());
        collector.push(with_optional(record, DOMAIN, r.domain.as_ref()));
    }
}

pub fn collect_job_postings(collector: &mut Collector, postings: &[SeedPosting]) {
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    for p in postings {
        let record = Record::new()
            .with(SOURCE, p.source.as_deref().unwrap_or(DEFAULT_JOB_SOURCE))
            .with(CONTENT_TYPE, ContentType::JobDescription.as_str())
            .with(JOB_TITLE, or_na(&p.job_title))
            .with(COMPANY, or_na(&p.company))
            .with(LOCATION, or_na(&p.location))
            .with(DESCRIPTION, or_na(&p.description))
            .with(SALARY, or_na(&p.salary));
        collector.push(with_optional(record, EXPERIENCE, p.experience.as_ref()));
    }
}

pub fn load_corpus(path: &Path) -> Result<SeedCorpus> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let body = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}

/// Stage entry point. Returns the number of raw records written.
pub fn seed_file(corpus_path: &Path, output: &Path) -> Result<usize> {
    let corpus = load_corpus(corpus_path)?;
    let mut collector = Collector::new();

    println!("Collecting interview questions...");
    collect_interview_questions(&mut collector, &corpus.interview_questions);
    println!("Collecting resume samples...");
    collect_resume_samples(&mut collector, &corpus.resume_samples);
    println!("Collecting job postings...");
    collect_job_postings(&mut collector, &corpus.job_postings);

    if collector.is_empty() {
        warn!(path = %corpus_path.display(), "seed corpus has no records");
    }
    let total = collector.len();
    let table = collector.into_table();
    store::write_table(output, &table, table.columns())?;
    info!(rows = total, path = %output.display(), "raw table written");
    println!(
        "Raw data saved to {}. Total records: {}",
        output.display(),
        total
    );
    Ok(total)
}
