//! Verdure CLI
//!
//! Command-line interface for rubric-based landscape description scoring.
//!
//! ## Usage
//!
//! ```bash
//! # Assess a description against a built-in rubric
//! verdure assess --rubric biodiversity --input description.txt
//!
//! # Pipe from stdin
//! cat description.txt | verdure assess --rubric stormwater
//!
//! # JSON output
//! verdure assess --rubric maintenance --input description.txt --format json
//!
//! # Custom rubric file (YAML or JSON)
//! verdure assess --rubric my-rubric.yaml --input description.txt
//!
//! # Validate a rubric file / list built-ins
//! verdure rubric validate my-rubric.yaml
//! verdure rubric list
//! ```
//!
//! ## Exit Codes
//!
//! - 0: success
//! - 2: empty or whitespace-only description
//! - 1: any other error

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use verdure_core::{AssessmentResult, Rubric};

/// Verdure: rubric scoring for landscape descriptions
#[derive(Parser)]
#[command(name = "verdure")]
#[command(version)]
#[command(about = "Score free-text landscape descriptions against fixed rubrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a description against a rubric
    Assess {
        /// Built-in rubric name (biodiversity, stormwater, maintenance) or
        /// path to a rubric file (YAML or JSON)
        #[arg(short, long)]
        rubric: String,

        /// Path to the description file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Inspect and validate rubrics
    Rubric {
        #[command(subcommand)]
        command: RubricCommands,
    },
}

#[derive(Subcommand)]
enum RubricCommands {
    /// Validate a rubric file without running an assessment
    Validate {
        /// Path to the rubric file (YAML or JSON)
        path: PathBuf,
    },

    /// List the built-in rubrics
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Assess {
            rubric,
            input,
            format,
        } => {
            let rubric = load_rubric(&rubric)?;
            let description = read_description(input.as_deref())?;

            if description.trim().is_empty() {
                eprintln!("error: description is empty; nothing to assess");
                return Ok(ExitCode::from(2));
            }

            let result = verdure_core::assess(&rubric, &description)?;
            match format {
                Format::Text => print_text(&result),
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Rubric { command } => match command {
            RubricCommands::Validate { path } => {
                let rubric = Rubric::from_file(&path)
                    .with_context(|| format!("invalid rubric: {}", path.display()))?;
                println!(
                    "OK: rubric '{}' is valid ({} criteria)",
                    rubric.name,
                    rubric.criteria.len()
                );
                Ok(ExitCode::SUCCESS)
            }
            RubricCommands::List => {
                for name in Rubric::builtin_names() {
                    let rubric = Rubric::builtin(name).expect("builtin rubric exists");
                    match rubric.description {
                        Some(description) => println!("{name}: {description}"),
                        None => println!("{name}"),
                    }
                }
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

/// Resolve a built-in rubric name, falling back to a rubric file path.
fn load_rubric(selector: &str) -> Result<Rubric> {
    if let Some(rubric) = Rubric::builtin(selector) {
        return Ok(rubric);
    }
    Rubric::from_file(selector).with_context(|| {
        format!(
            "'{selector}' is not a built-in rubric ({}) or a readable rubric file",
            Rubric::builtin_names().join(", ")
        )
    })
}

fn read_description(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read description from stdin")?;
            Ok(buffer)
        }
    }
}

fn print_text(result: &AssessmentResult) {
    println!("Rubric: {}", result.rubric);
    println!();
    for score in &result.scores {
        println!(
            "{}: score {} - {}",
            score.criterion.replace('_', " "),
            score.score,
            score.comment
        );
    }
    println!();
    println!(
        "Overall: {} - {}",
        result.overall_score, result.overall_label
    );
}
