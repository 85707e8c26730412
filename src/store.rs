use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::record::{Record, Table};

/// Load a CSV table. Empty cells become absent values.
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Table::new(headers.clone());
    for result in reader.records() {
        let raw = result?;
        let mut row = Record::new();
        for (column, value) in headers.iter().zip(raw.iter()) {
            row.set(column, value);
        }
        table.push(row);
    }
    debug!(path = %path.display(), rows = table.len(), "table loaded");
    Ok(table)
}

/// Write `columns` of every row. Nothing lands at `path` unless the whole table serialised.
pub fn write_table(path: &Path, table: &Table, columns: &[String]) -> Result<()> {
    stage_table(path, table, columns)?.commit()
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    stage_json(path, value)?.commit()
}

/// Serialises the table next to `path`; it becomes visible only on [`Staged::commit`].
pub fn stage_table(path: &Path, table: &Table, columns: &[String]) -> Result<Staged> {
    stage(path, |tmp| {
        let mut writer = csv::Writer::from_path(tmp)?;
        writer.write_record(columns)?;
        for row in table.rows() {
            writer.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    })
}

pub fn stage_json<T: Serialize>(path: &Path, value: &T) -> Result<Staged> {
    stage(path, |tmp| {
        let body = serde_json::to_string_pretty(value)?;
        fs::write(tmp, body)?;
        Ok(())
    })
}

/// A fully written temp file waiting to be renamed over its target. Dropped uncommitted, the
/// temp file is removed.
#[derive(Debug)]
pub struct Staged {
    tmp: PathBuf,
    path: PathBuf,
}

impl Staged {
    pub fn commit(self) -> Result<()> {
        fs::rename(&self.tmp, &self.path)?;
        debug!(path = %self.path.display(), "output committed");
        Ok(())
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        // no-op once committed: the temp file has been renamed away
        let _ = fs::remove_file(&self.tmp);
    }
}

fn stage<F>(path: &Path, write: F) -> Result<Staged>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let staged = Staged {
        tmp: temp_path(path),
        path: path.to_path_buf(),
    };
    write(&staged.tmp)?;
    Ok(staged)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CONTENT, CONTENT_TYPE, SOURCE};

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
    }

    #[test]
    fn write_then_read_keeps_empty_cells_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let columns = vec![SOURCE.to_string(), CONTENT.to_string(), CONTENT_TYPE.to_string()];
        let mut table = Table::new(columns.clone());
        table.push(
            Record::new()
                .with(SOURCE, "indeed")
                .with(CONTENT, "Rust, \"async\" developer"),
        );
        write_table(&path, &table, &columns).unwrap();

        let back = read_table(&path).unwrap();
        assert_eq!(back.columns(), columns.as_slice());
        assert_eq!(back.rows()[0].get(CONTENT), Some("Rust, \"async\" developer"));
        assert_eq!(back.rows()[0].get(CONTENT_TYPE), None);
        assert!(!dir.path().join("t.csv.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");
        let table = Table::new(vec![CONTENT.to_string()]);
        assert!(write_table(&path, &table, &[CONTENT.to_string()]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn dropped_stage_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let staged = stage_json(&path, &vec!["python"]).unwrap();
        assert!(dir.path().join("out.json.tmp").exists());
        drop(staged);
        assert!(!dir.path().join("out.json.tmp").exists());
        assert!(!path.exists());
    }

    #[test]
    fn commit_publishes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let staged = stage_json(&path, &vec!["python"]).unwrap();
        assert!(!path.exists());
        staged.commit().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("python"));
        assert!(!dir.path().join("out.json.tmp").exists());
    }
}
