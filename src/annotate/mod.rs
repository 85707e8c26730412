//! Annotator stage: cleaned table in, bounded labeled sample plus label summary out.

pub mod classify;
pub mod labels;
pub mod sample;
pub mod summary;
pub mod taxonomy;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::record::{
    is_meaningful, ContentType, Record, Table, COMPANY, CONTENT, CONTENT_TYPE, DIFFICULTY,
    EXPERIENCE_LEVEL, JOB_TITLE, LOCATION, SOURCE,
};
use crate::store;
use classify::{classify_question_type, determine_experience_level, infer_difficulty};
use labels::{Complexity, ExperienceLevel, ProfileStrength, QuestionType};
use summary::Summary;
use taxonomy::{categorize_skill, SkillMatch, SkillMatcher};

pub const EXTRACTED_SKILLS: &str = "extracted_skills";
pub const SKILL_COUNT: &str = "skill_count";
pub const PRIMARY_SKILLS: &str = "primary_skills";
pub const SKILL_FOCUS: &str = "skill_focus";
pub const EXPERIENCE_LEVEL_ANNOTATED: &str = "experience_level_annotated";
pub const QUESTION_TYPE_ANNOTATED: &str = "question_type_annotated";
pub const DIFFICULTY_LEVEL: &str = "difficulty_level";
pub const CONTENT_COMPLEXITY: &str = "content_complexity";
pub const SKILL_DIVERSITY: &str = "skill_diversity";
pub const PROFILE_STRENGTH: &str = "profile_strength";

/// Columns of the labeled table, in output order. Only columns with data are written.
pub const OUTPUT_COLUMNS: &[&str] = &[
    SOURCE,
    CONTENT,
    CONTENT_TYPE,
    JOB_TITLE,
    COMPANY,
    LOCATION,
    EXTRACTED_SKILLS,
    PRIMARY_SKILLS,
    SKILL_FOCUS,
    EXPERIENCE_LEVEL_ANNOTATED,
    QUESTION_TYPE_ANNOTATED,
    DIFFICULTY_LEVEL,
    CONTENT_COMPLEXITY,
    SKILL_DIVERSITY,
    PROFILE_STRENGTH,
    SKILL_COUNT,
];

const PRIMARY_SKILL_LIMIT: usize = 5;
const FOCUS_SKILL_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct AnnotateOptions {
    pub sample_size: usize,
    pub seed: u64,
    pub skill_match: SkillMatch,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        AnnotateOptions {
            sample_size: 25,
            seed: 42,
            skill_match: SkillMatch::Substring,
        }
    }
}

/// Labels attached to a record, by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    Job {
        skills: Vec<&'static str>,
        experience: ExperienceLevel,
        complexity: Complexity,
    },
    Question {
        question_type: QuestionType,
        difficulty: String,
        skills: Vec<&'static str>,
    },
    Resume {
        skills: Vec<&'static str>,
        diversity: usize,
        experience: ExperienceLevel,
        strength: ProfileStrength,
    },
}

impl Labels {
    pub fn skills(&self) -> &[&'static str] {
        match self {
            Labels::Job { skills, .. }
            | Labels::Question { skills, .. }
            | Labels::Resume { skills, .. } => skills.as_slice(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Annotated {
    pub record: Record,
    pub labels: Labels,
}

impl Annotated {
    /// The source record plus the derived columns for its content type.
    pub fn to_record(&self) -> Record {
        let mut row = self.record.clone();
        let skills = self.labels.skills();
        row.set(EXTRACTED_SKILLS, skills_cell(skills));
        match &self.labels {
            Labels::Job {
                experience,
                complexity,
                ..
            } => {
                row.set(SKILL_COUNT, skills.len().to_string());
                row.set(PRIMARY_SKILLS, join_first(skills, PRIMARY_SKILL_LIMIT, "None"));
                row.set(EXPERIENCE_LEVEL_ANNOTATED, experience.as_str());
                row.set(CONTENT_COMPLEXITY, complexity.as_str());
            }
            Labels::Question {
                question_type,
                difficulty,
                ..
            } => {
                row.set(QUESTION_TYPE_ANNOTATED, question_type.as_str());
                row.set(DIFFICULTY_LEVEL, difficulty.as_str());
                row.set(SKILL_FOCUS, join_first(skills, FOCUS_SKILL_LIMIT, "General"));
            }
            Labels::Resume {
                diversity,
                experience,
                strength,
                ..
            } => {
                row.set(SKILL_COUNT, skills.len().to_string());
                row.set(SKILL_DIVERSITY, diversity.to_string());
                row.set(EXPERIENCE_LEVEL_ANNOTATED, experience.as_str());
                row.set(PROFILE_STRENGTH, strength.as_str());
            }
        }
        row
    }
}

/// JSON array, so the cell can be read back without evaluating anything.
fn skills_cell(skills: &[&str]) -> String {
    serde_json::to_string(skills).unwrap_or_else(|_| "[]".to_string())
}

fn join_first(skills: &[&str], n: usize, empty: &str) -> String {
    if skills.is_empty() {
        empty.to_string()
    } else {
        skills.iter().take(n).join(", ")
    }
}

pub struct Annotator {
    matcher: SkillMatcher,
}

impl Annotator {
    pub fn new(skill_match: SkillMatch) -> Self {
        Annotator {
            matcher: SkillMatcher::new(skill_match),
        }
    }

    pub fn extract_skills(&self, text: Option<&str>) -> Vec<&'static str> {
        text.map(|t| self.matcher.extract(t)).unwrap_or_default()
    }

    pub fn annotate_record(&self, content_type: ContentType, record: Record) -> Annotated {
        let labels = match content_type {
            ContentType::JobDescription => self.job_labels(&record),
            ContentType::InterviewQuestion => self.question_labels(&record),
            ContentType::ResumeSummary => self.resume_labels(&record),
        };
        Annotated { record, labels }
    }

    fn job_labels(&self, record: &Record) -> Labels {
        let content = record.get(CONTENT);
        let skills = self.extract_skills(content);
        let experience =
            determine_experience_level(content, record.get(EXPERIENCE_LEVEL), &self.matcher);
        let complexity = Complexity::from_skill_count(skills.len());
        Labels::Job {
            skills,
            experience,
            complexity,
        }
    }

    fn question_labels(&self, record: &Record) -> Labels {
        let content = record.get(CONTENT);
        let difficulty = match record.get(DIFFICULTY).filter(|d| is_meaningful(d)) {
            Some(existing) => existing.to_string(),
            None => infer_difficulty(content.unwrap_or_default()).as_str().to_string(),
        };
        Labels::Question {
            question_type: classify_question_type(content),
            difficulty,
            skills: self.extract_skills(content),
        }
    }

    fn resume_labels(&self, record: &Record) -> Labels {
        let content = record.get(CONTENT);
        let skills = self.extract_skills(content);
        let diversity = skills
            .iter()
            .map(|s| categorize_skill(s))
            .collect::<BTreeSet<_>>()
            .len();
        let experience =
            determine_experience_level(content, record.get(EXPERIENCE_LEVEL), &self.matcher);
        let strength = ProfileStrength::assess(skills.len(), diversity);
        Labels::Resume {
            skills,
            diversity,
            experience,
            strength,
        }
    }

    /// Samples each content type independently with the same seed, then labels the draw.
    /// Output is grouped in job, question, resume order.
    pub fn create_sample_annotations(
        &self,
        table: &Table,
        sample_size: usize,
        seed: u64,
    ) -> Vec<Annotated> {
        let per_type = sample::per_group(sample_size, ContentType::ALL.len());
        let mut annotated = Vec::new();
        for content_type in ContentType::ALL {
            let rows: Vec<&Record> = table
                .rows()
                .iter()
                .filter(|r| r.content_type() == Some(content_type))
                .collect();
            if rows.is_empty() {
                continue;
            }
            let drawn = sample::sample_without_replacement(&rows, per_type, seed);
            println!(
                "  {}: sampled {} of {}",
                content_type.as_str(),
                drawn.len(),
                rows.len()
            );
            annotated.extend(
                drawn
                    .into_iter()
                    .map(|r| self.annotate_record(content_type, r.clone())),
            );
        }
        annotated
    }
}

/// Builds the labeled table with the fixed column order, keeping columns that carry data.
pub fn labeled_table(source_columns: &[String], annotated: &[Annotated]) -> Table {
    let rows: Vec<Record> = annotated.iter().map(Annotated::to_record).collect();
    let columns = OUTPUT_COLUMNS
        .iter()
        .filter(|c| {
            source_columns.iter().any(|s| s == *c) || rows.iter().any(|r| r.get(c).is_some())
        })
        .map(|c| c.to_string())
        .collect();
    Table::from_parts(columns, rows)
}

/// Samples and labels `table`. Fails when the sample comes out empty.
pub fn annotate(table: &Table, options: &AnnotateOptions) -> Result<(Table, Summary)> {
    for column in [CONTENT_TYPE, CONTENT] {
        if !table.has_column(column) {
            return Err(PipelineError::MissingColumn(column));
        }
    }
    let annotator = Annotator::new(options.skill_match);
    let annotated = annotator.create_sample_annotations(table, options.sample_size, options.seed);
    if annotated.is_empty() {
        warn!(rows = table.len(), "no rows of a known content type to annotate");
        return Err(PipelineError::EmptySample);
    }
    let labeled = labeled_table(table.columns(), &annotated);
    let summary = Summary::from_table(&labeled);
    Ok((labeled, summary))
}

/// Stage entry point: writes the labeled table and the JSON summary, nothing on failure.
pub fn annotate_file(
    input: &Path,
    output: &Path,
    summary_path: &Path,
    options: &AnnotateOptions,
) -> Result<Summary> {
    let table = store::read_table(input)?;
    println!("Loaded {} records from {}", table.len(), input.display());

    println!("Creating annotated samples...");
    let (labeled, summary) = annotate(&table, options)?;

    println!("Generating annotation summary...");
    print!("{}", summary.render_markdown());

    let table_out = store::stage_table(output, &labeled, labeled.columns())?;
    let summary_out = store::stage_json(summary_path, &summary)?;
    table_out.commit()?;
    if let Err(err) = summary_out.commit() {
        let _ = fs::remove_file(output);
        return Err(err);
    }
    info!(
        rows = labeled.len(),
        skill_match = ?options.skill_match,
        path = %output.display(),
        "labeled table written"
    );
    println!(
        "Annotated data saved to {}. Total records: {}",
        output.display(),
        labeled.len()
    );
    Ok(summary)
}

/// Recomputes the summary of an existing labeled table and prints it.
pub fn summarize_file(input: &Path) -> Result<Summary> {
    let table = store::read_table(input)?;
    let summary = Summary::from_table(&table);
    print!("{}", summary.render_markdown());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MANUAL_SOURCE;

    const SENIOR_POSTING: &str = "We need a software engineer with 5+ years experience in Python, \
        Java, AWS, Docker, React, MongoDB, Git, and Jenkins.";

    fn cleaned_columns() -> Vec<String> {
        [SOURCE, CONTENT, CONTENT_TYPE, JOB_TITLE, DIFFICULTY, EXPERIENCE_LEVEL]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn row(content_type: &str, content: &str) -> Record {
        Record::new()
            .with(SOURCE, MANUAL_SOURCE)
            .with(CONTENT_TYPE, content_type)
            .with(CONTENT, content)
    }

    fn annotator() -> Annotator {
        Annotator::new(SkillMatch::Substring)
    }

    #[test]
    fn job_labels_for_scenario_posting() {
        let a = annotator().annotate_record(
            ContentType::JobDescription,
            row("job_description", SENIOR_POSTING),
        );
        let out = a.to_record();
        assert_eq!(out.get(EXPERIENCE_LEVEL_ANNOTATED), Some("senior"));
        assert_eq!(out.get(CONTENT_COMPLEXITY), Some("high"));
        let count: usize = out.get(SKILL_COUNT).unwrap().parse().unwrap();
        assert!(count >= 8);
        assert_eq!(out.get(PRIMARY_SKILLS).unwrap().split(", ").count(), 5);
        assert_eq!(out.get(QUESTION_TYPE_ANNOTATED), None);
        assert_eq!(out.get(PROFILE_STRENGTH), None);
    }

    #[test]
    fn job_without_skills_gets_none_marker() {
        let a = annotator().annotate_record(
            ContentType::JobDescription,
            row("job_description", "Daily stand up and note taking"),
        );
        let out = a.to_record();
        assert_eq!(out.get(PRIMARY_SKILLS), Some("None"));
        assert_eq!(out.get(EXTRACTED_SKILLS), Some("[]"));
        assert_eq!(out.get(CONTENT_COMPLEXITY), Some("low"));
    }

    #[test]
    fn existing_level_is_kept() {
        let record =
            row("resume_summary", "Junior fresher with Python").with(EXPERIENCE_LEVEL, "senior");
        let a = annotator().annotate_record(ContentType::ResumeSummary, record);
        assert!(matches!(
            a.labels,
            Labels::Resume {
                experience: ExperienceLevel::Senior,
                ..
            }
        ));
    }

    #[test]
    fn question_uses_existing_difficulty() {
        let record = row("interview_question", "Explain the algorithm").with(DIFFICULTY, "medium");
        let out = annotator()
            .annotate_record(ContentType::InterviewQuestion, record)
            .to_record();
        assert_eq!(out.get(DIFFICULTY_LEVEL), Some("medium"));
        assert_eq!(out.get(QUESTION_TYPE_ANNOTATED), Some("technical"));
        assert_eq!(out.get(SKILL_COUNT), None);
    }

    #[test]
    fn question_infers_difficulty_and_focus() {
        let out = annotator()
            .annotate_record(
                ContentType::InterviewQuestion,
                row("interview_question", "Tell me about a time you handled a conflict"),
            )
            .to_record();
        assert_eq!(out.get(QUESTION_TYPE_ANNOTATED), Some("behavioral"));
        assert_eq!(out.get(DIFFICULTY_LEVEL), Some("beginner"));

        let out = annotator()
            .annotate_record(
                ContentType::InterviewQuestion,
                row("interview_question", "Why? Pick a tool"),
            )
            .to_record();
        assert_eq!(out.get(SKILL_FOCUS), Some("General"));
    }

    #[test]
    fn resume_strength_matches_count_and_diversity() {
        let a = annotator().annotate_record(
            ContentType::ResumeSummary,
            row(
                "resume_summary",
                "Python, Java, Django, MySQL, Docker, Kubernetes and Jira",
            ),
        );
        let Labels::Resume {
            skills,
            diversity,
            strength,
            ..
        } = &a.labels
        else {
            panic!("expected resume labels");
        };
        assert_eq!(
            *strength == ProfileStrength::Strong,
            skills.len() >= 6 && *diversity >= 3
        );
        assert_eq!(*strength, ProfileStrength::Strong);
    }

    fn mixed_table(per_type: usize) -> Table {
        let mut rows = Vec::new();
        for i in 0..per_type {
            rows.push(row("job_description", &format!("Posting {i} for a Rust engineer")));
            rows.push(row("interview_question", &format!("Question {i}: what is ownership?")));
            rows.push(row("resume_summary", &format!("Resume {i}: Python developer")));
        }
        rows.push(row("blog_post", "Not a recruitment record"));
        Table::from_parts(cleaned_columns(), rows)
    }

    #[test]
    fn sample_is_bounded_and_grouped() {
        let table = mixed_table(12);
        let annotated = annotator().create_sample_annotations(&table, 25, 42);
        assert_eq!(annotated.len(), 24);
        let order: Vec<_> = annotated
            .iter()
            .map(|a| a.record.content_type().unwrap())
            .dedup()
            .collect();
        assert_eq!(order, ContentType::ALL.to_vec());
    }

    #[test]
    fn sample_is_reproducible() {
        let table = mixed_table(12);
        let a = annotator().create_sample_annotations(&table, 9, 42);
        let b = annotator().create_sample_annotations(&table, 9, 42);
        let contents = |v: &[Annotated]| -> Vec<String> {
            v.iter()
                .map(|x| x.record.get(CONTENT).unwrap().to_string())
                .collect()
        };
        assert_eq!(contents(&a), contents(&b));
    }

    #[test]
    fn small_groups_are_capped() {
        let table = mixed_table(2);
        let annotated = annotator().create_sample_annotations(&table, 25, 42);
        assert_eq!(annotated.len(), 6);
    }

    #[test]
    fn labeled_table_keeps_only_present_columns() {
        let table = Table::from_parts(
            cleaned_columns(),
            vec![row("interview_question", "What is a trait object?")],
        );
        let (labeled, summary) = annotate(&table, &AnnotateOptions::default()).unwrap();
        let columns: Vec<&str> = labeled.columns().iter().map(String::as_str).collect();
        assert_eq!(
            columns,
            vec![
                SOURCE,
                CONTENT,
                CONTENT_TYPE,
                JOB_TITLE,
                EXTRACTED_SKILLS,
                SKILL_FOCUS,
                QUESTION_TYPE_ANNOTATED,
                DIFFICULTY_LEVEL,
            ]
        );
        assert_eq!(summary.total_records, 1);
        assert!(summary.experience_levels.is_none());
    }

    #[test]
    fn empty_sample_is_an_error() {
        let table =
            Table::from_parts(cleaned_columns(), vec![row("blog_post", "Nothing to label")]);
        let err = annotate(&table, &AnnotateOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptySample));
    }

    #[test]
    fn missing_content_type_column_is_an_error() {
        let table = Table::from_parts(vec![CONTENT.to_string()], vec![]);
        let err = annotate(&table, &AnnotateOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(CONTENT_TYPE)));
    }

    #[test]
    fn empty_sample_writes_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cleaned.csv");
        let output = dir.path().join("annotated.csv");
        let summary = dir.path().join("summary.json");
        let table = Table::from_parts(cleaned_columns(), vec![]);
        store::write_table(&input, &table, table.columns()).unwrap();

        let result = annotate_file(&input, &output, &summary, &AnnotateOptions::default());
        assert!(matches!(result, Err(PipelineError::EmptySample)));
        assert!(!output.exists());
        assert!(!summary.exists());
    }

    #[test]
    fn unwritable_summary_leaves_no_labeled_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cleaned.csv");
        let output = dir.path().join("annotated.csv");
        let summary_path = dir.path().join("missing_dir").join("summary.json");
        let table = Table::from_parts(
            cleaned_columns(),
            vec![row("job_description", SENIOR_POSTING)],
        );
        store::write_table(&input, &table, table.columns()).unwrap();

        let result = annotate_file(&input, &output, &summary_path, &AnnotateOptions::default());
        assert!(matches!(result, Err(PipelineError::Io(_))));
        assert!(!output.exists());
        assert!(!dir.path().join("annotated.csv.tmp").exists());
    }

    #[test]
    fn annotate_file_writes_table_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cleaned.csv");
        let output = dir.path().join("annotated.csv");
        let summary_path = dir.path().join("summary.json");
        let table = Table::from_parts(
            cleaned_columns(),
            vec![
                row("job_description", SENIOR_POSTING),
                row("interview_question", "How do you handle exceptions in Python?"),
                row("resume_summary", "DevOps Engineer skilled in AWS, Docker, Kubernetes"),
            ],
        );
        store::write_table(&input, &table, table.columns()).unwrap();

        let summary = annotate_file(&input, &output, &summary_path, &AnnotateOptions::default())
            .unwrap();
        assert_eq!(summary.total_records, 3);

        let back = store::read_table(&output).unwrap();
        assert_eq!(back.len(), 3);
        let reread = summarize_file(&output).unwrap();
        assert_eq!(reread.top_skills, summary.top_skills);

        let json = std::fs::read_to_string(&summary_path).unwrap();
        let parsed: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.content_types, summary.content_types);
    }
}
