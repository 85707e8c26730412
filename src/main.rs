mod annotate;
mod clean;
mod collect;
mod error;
mod metrics;
mod record;
mod settings;
mod store;
mod text;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use annotate::taxonomy::SkillMatch;
use error::PipelineError;
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "recruit_pipeline",
    about = "Clean and annotate recruitment text records"
)]
struct Cli {
    /// Settings file (default: ./recruit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the raw table from a curated seed corpus
    Seed {
        /// Seed corpus JSON
        #[arg(long, default_value = "data/seed_corpus.json")]
        corpus: PathBuf,
        /// Raw table to write (default: raw_path setting)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize the raw table
    Clean {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample and label the cleaned table
    Annotate {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Print label distributions of a labeled table
    Summarize {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Clean then annotate; stops at the first failed stage
    Run {
        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

#[derive(clap::Args)]
struct SamplingArgs {
    /// Total records to sample, split evenly across content types
    #[arg(short = 'n', long)]
    samples: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    skill_match: Option<SkillMatch>,
}

impl SamplingArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(n) = self.samples {
            settings.sample_size = n;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(mode) = self.skill_match {
            settings.skill_match = mode;
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn banner(title: &str) {
    println!("{}", title);
    println!("{}\n", "=".repeat(title.len()));
}

/// Adds the hint a user needs when an earlier stage has not produced the input yet.
fn stage_context<T>(result: error::Result<T>, hint: &str) -> anyhow::Result<T> {
    match result {
        Err(e @ PipelineError::MissingInput { .. }) => {
            Err(anyhow::Error::new(e).context(hint.to_string()))
        }
        other => Ok(other?),
    }
}

fn run_clean(settings: &Settings) -> anyhow::Result<()> {
    banner("Recruitment Data Cleaner");
    let rows = stage_context(
        clean::clean_file(&settings.raw_path, &settings.cleaned_path),
        "raw data not found, please run the seed stage first",
    )?;
    info!(rows, "cleaning finished");
    Ok(())
}

fn run_annotate(settings: &Settings) -> anyhow::Result<()> {
    banner("Recruitment Data Annotator");
    let summary = stage_context(
        annotate::annotate_file(
            &settings.cleaned_path,
            &settings.annotated_path,
            &settings.summary_path,
            &settings.annotate_options(),
        ),
        "cleaned data not found, please run the cleaner first",
    )?;
    println!("Summary saved to {}", settings.summary_path.display());
    info!(records = summary.total_records, "annotation finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    match cli.command {
        Commands::Seed { corpus, output } => {
            if let Some(p) = output {
                settings.raw_path = p;
            }
            banner("Recruitment Data Collector");
            collect::seed_file(&corpus, &settings.raw_path)
                .with_context(|| format!("failed to seed from {}", corpus.display()))?;
        }
        Commands::Clean { input, output } => {
            if let Some(p) = input {
                settings.raw_path = p;
            }
            if let Some(p) = output {
                settings.cleaned_path = p;
            }
            run_clean(&settings)?;
        }
        Commands::Annotate {
            input,
            output,
            sampling,
        } => {
            if let Some(p) = input {
                settings.cleaned_path = p;
            }
            if let Some(p) = output {
                settings.annotated_path = p;
            }
            sampling.apply(&mut settings);
            run_annotate(&settings)?;
        }
        Commands::Summarize { input } => {
            let path = input.unwrap_or_else(|| settings.annotated_path.clone());
            stage_context(
                annotate::summarize_file(&path),
                "annotated data not found, please run the annotator first",
            )?;
        }
        Commands::Run { sampling } => {
            sampling.apply(&mut settings);
            run_clean(&settings)?;
            println!();
            run_annotate(&settings)?;
        }
    }

    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
