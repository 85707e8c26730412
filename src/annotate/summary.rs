use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EXPERIENCE_LEVEL_ANNOTATED, EXTRACTED_SKILLS, QUESTION_TYPE_ANNOTATED};
use crate::record::{Table, CONTENT_TYPE};

const TOP_SKILLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Label distributions over a labeled table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub content_types: Vec<LabelCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_levels: Option<Vec<LabelCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_types: Option<Vec<LabelCount>>,
    pub top_skills: Vec<LabelCount>,
}

impl Summary {
    pub fn from_table(table: &Table) -> Self {
        let column_counts = |column: &str| -> Option<Vec<LabelCount>> {
            table
                .has_column(column)
                .then(|| tally(table.rows().iter().filter_map(|r| r.get(column))))
        };

        let skills: Vec<String> = table
            .rows()
            .iter()
            .filter_map(|r| r.get(EXTRACTED_SKILLS))
            .flat_map(parse_skill_list)
            .collect();
        let mut top_skills = tally(skills.iter().map(String::as_str));
        top_skills.truncate(TOP_SKILLS);

        Summary {
            generated_at: Utc::now(),
            total_records: table.len(),
            content_types: tally(table.rows().iter().filter_map(|r| r.get(CONTENT_TYPE))),
            experience_levels: column_counts(EXPERIENCE_LEVEL_ANNOTATED),
            question_types: column_counts(QUESTION_TYPE_ANNOTATED),
            top_skills,
        }
    }

    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Annotation Summary\n");
        out.push_str(&format!("- Total annotated records: {}\n", self.total_records));

        push_counts(&mut out, "Content types", &self.content_types);
        if let Some(levels) = &self.experience_levels {
            push_counts(&mut out, "Experience levels", levels);
        }
        if let Some(types) = &self.question_types {
            push_counts(&mut out, "Question types", types);
        }
        push_counts(&mut out, "Top skills", &self.top_skills);
        out
    }
}

/// Reads a stored skill cell. Lists are JSON arrays; any other text is one literal skill.
pub fn parse_skill_list(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return list;
        }
    }
    vec![trimmed.to_string()]
}

/// Counts labels, most frequent first; equal counts keep first-seen order.
fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(LabelCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn push_counts(out: &mut String, title: &str, counts: &[LabelCount]) {
    out.push_str(&format!("\n### {}\n", title));
    if counts.is_empty() {
        out.push_str("- (none)\n");
    }
    for c in counts {
        out.push_str(&format!("- {}: {}\n", c.label, c.count));
    }
}
