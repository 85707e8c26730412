use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::annotate::taxonomy::SkillMatch;
use crate::annotate::AnnotateOptions;
use crate::error::Result;

const ENV_PREFIX: &str = "RECRUIT";
const DEFAULT_FILE: &str = "recruit";

/// File locations and annotator knobs shared by every stage.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub raw_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub annotated_path: PathBuf,
    pub summary_path: PathBuf,
    pub sample_size: usize,
    pub seed: u64,
    pub skill_match: SkillMatch,
}

impl Settings {
    /// Defaults, then `recruit.toml` (or `config_file`), then `RECRUIT_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let settings: Settings = Config::builder()
            .set_default("raw_path", "raw_recruitment_data.csv")?
            .set_default("cleaned_path", "cleaned_recruitment_data.csv")?
            .set_default("annotated_path", "annotated_recruitment_data.csv")?
            .set_default("summary_path", "annotation_summary.json")?
            .set_default("sample_size", 25i64)?
            .set_default("seed", 42i64)?
            .set_default("skill_match", "substring")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            sample_size: self.sample_size,
            seed: self.seed,
            skill_match: self.skill_match,
        }
    }
}
