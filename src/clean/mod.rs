//! Normalizer stage: raw scraped table in, deduplicated and cleaned table out.
//!
//! Passes run in a fixed order, each replacing the working table:
//!   1. dedup per provenance group
//!   2. drop rows without any text field
//!   3. merge `content`, `description`, `job_title` into `content`
//!   4. text cleanup of the free-text columns
//!   5. experience level vocabulary
//!   6. content type vocabulary
//!   7. salary
//!   8. location
//!   9. drop rows with too little content
//!
//! Merging runs before cleanup, and vocabularies are mapped only after cleanup.

pub mod passes;
pub mod vocab;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::metrics::{new_run_id, PassTracker};
use crate::record::Table;
use crate::store;

pub fn run(mut table: Table, tracker: &mut PassTracker) -> Table {
    println!("Removing duplicates...");
    passes::remove_duplicates(&mut table, tracker);

    println!("Removing empty rows...");
    passes::remove_empty_rows(&mut table, tracker);

    println!("Merging content fields...");
    passes::merge_content_fields(&mut table, tracker);

    println!("Applying text cleaning...");
    passes::apply_text_cleaning(&mut table, tracker);

    println!("Standardizing experience levels...");
    passes::standardize_experience_levels(&mut table, tracker);

    println!("Standardizing content types...");
    passes::standardize_content_types(&mut table, tracker);

    println!("Cleaning salary data...");
    passes::clean_salary_data(&mut table, tracker);

    println!("Cleaning location data...");
    passes::clean_location_data(&mut table, tracker);

    println!("Validating and filtering data...");
    passes::validate_and_filter(&mut table, tracker);

    table
}

/// Reads `input`, cleans it and writes every column to `output`. Returns the final row count.
pub fn clean_file(input: &Path, output: &Path) -> Result<usize> {
    let raw = store::read_table(input)?;
    println!("Loaded {} records from {}", raw.len(), input.display());
    if raw.is_empty() {
        warn!(path = %input.display(), "raw table has no records");
    }

    let mut tracker = PassTracker::new(new_run_id());
    let cleaned = run(raw, &mut tracker);

    for m in tracker.metrics() {
        debug!(pass = %m.pass_name, chars = m.chars_after, "content size after pass");
    }
    store::write_table(output, &cleaned, cleaned.columns())?;
    info!(
        run_id = tracker.run_id(),
        removed = tracker.total_removed(),
        rows = cleaned.len(),
        path = %output.display(),
        "cleaned table written"
    );
    println!(
        "Cleaned data saved to {}. Final record count: {}",
        output.display(),
        cleaned.len()
    );
    Ok(cleaned.len())
}
