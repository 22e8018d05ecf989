//! Batch solving from a TOML puzzle file
//!
//! ```toml
//! [[puzzle]]
//! name = "classic"
//! bucket_one = 3
//! bucket_two = 5
//! goal = 1
//! start = "one"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info};
use twobucket_core::{Bucket, BucketSearch, Liters, Problem, SearchReport};

use super::measure;
use crate::config::{Config, OutputFormat};

#[derive(Args)]
pub struct BatchArgs {
    /// TOML file with [[puzzle]] tables
    pub file: PathBuf,
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Searches allowed to run at the same time
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct BatchFile {
    #[serde(default, rename = "puzzle")]
    puzzles: Vec<PuzzleEntry>,
}

#[derive(Debug, Deserialize)]
struct PuzzleEntry {
    name: Option<String>,
    bucket_one: Liters,
    bucket_two: Liters,
    goal: Liters,
    start: Option<Bucket>,
}

/// A named puzzle ready to solve
#[derive(Debug, Clone)]
pub struct NamedPuzzle {
    pub name: String,
    pub problem: Problem,
}

/// Result for one puzzle of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub name: String,
    pub problem: Problem,
    pub report: SearchReport,
}

pub async fn run(args: BatchArgs, config: &Config) -> Result<()> {
    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let puzzles = parse_batch(&contents, config.search.default_start)
        .with_context(|| format!("Invalid batch file {}", args.file.display()))?;

    let max_concurrency = args.max_concurrency.unwrap_or(config.batch.max_concurrency);
    let results = solve_all(puzzles, max_concurrency, config.output.show_trace).await?;

    let possible = results.iter().filter(|r| r.report.measurement.possible).count();
    info!("Solved {} puzzles ({} possible)", results.len(), possible);

    let format = args.format.unwrap_or(config.output.format);
    println!("{}", render(&results, format)?);
    Ok(())
}

/// Parse and validate a batch file
pub fn parse_batch(contents: &str, default_start: Bucket) -> Result<Vec<NamedPuzzle>> {
    let file: BatchFile = toml::from_str(contents).context("Failed to parse puzzle file")?;

    file.puzzles
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<NamedPuzzle> {
            let name = entry.name.unwrap_or_else(|| format!("puzzle-{}", index + 1));
            let problem = Problem::new(
                entry.bucket_one,
                entry.bucket_two,
                entry.goal,
                entry.start.unwrap_or(default_start),
            )
            .with_context(|| format!("Puzzle {name} is invalid"))?;
            Ok(NamedPuzzle { name, problem })
        })
        .collect()
}

/// Solve every puzzle on the blocking pool, keeping input order
pub async fn solve_all(
    puzzles: Vec<NamedPuzzle>,
    max_concurrency: usize,
    record_trace: bool,
) -> Result<Vec<BatchResult>> {
    let permits = max_concurrency.clamp(1, Semaphore::MAX_PERMITS);
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut handles = Vec::with_capacity(puzzles.len());

    for puzzle in puzzles {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            debug!("Solving {}", puzzle.name);
            let report = BucketSearch::new(puzzle.problem).with_trace(record_trace).run();
            BatchResult {
                name: puzzle.name,
                problem: puzzle.problem,
                report,
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("Search task failed")?);
    }
    Ok(results)
}

fn render(results: &[BatchResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(results).context("Failed to encode results")
        }
        OutputFormat::Text => Ok(results
            .iter()
            .map(|r| {
                format!(
                    "{}: {}\n  {}",
                    r.name,
                    measure::describe(&r.problem),
                    measure::summarize(&r.report)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twobucket_core::Measurement;

    const BATCH: &str = r#"
[[puzzle]]
name = "classic"
bucket_one = 3
bucket_two = 5
goal = 1
start = "one"

[[puzzle]]
bucket_one = 7
bucket_two = 11
goal = 2
start = "two"

[[puzzle]]
name = "impossible"
bucket_one = 6
bucket_two = 15
goal = 5
"#;

    #[test]
    fn test_parse_batch() {
        let puzzles = parse_batch(BATCH, Bucket::One).unwrap();

        assert_eq!(puzzles.len(), 3);
        assert_eq!(puzzles[0].name, "classic");
        assert_eq!(puzzles[1].name, "puzzle-2");
        assert_eq!(puzzles[1].problem.start, Bucket::Two);
        assert_eq!(puzzles[2].problem.start, Bucket::One);
    }

    #[test]
    fn test_parse_batch_default_start() {
        let puzzles = parse_batch(BATCH, Bucket::Two).unwrap();
        assert_eq!(puzzles[2].problem.start, Bucket::Two);
    }

    #[test]
    fn test_parse_batch_rejects_zero_capacity() {
        let contents = "[[puzzle]]\nname = \"dry\"\nbucket_one = 0\nbucket_two = 5\ngoal = 1\n";
        let err = parse_batch(contents, Bucket::One).unwrap_err();

        assert!(err.to_string().contains("dry"));
    }

    #[test]
    fn test_parse_empty_batch() {
        assert!(parse_batch("", Bucket::One).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_solve_all_keeps_order() {
        let puzzles = parse_batch(BATCH, Bucket::One).unwrap();
        let results = solve_all(puzzles, 2, false).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].report.measurement, Measurement::reached(4, Bucket::One, 5));
        assert_eq!(results[1].report.measurement, Measurement::reached(18, Bucket::Two, 7));
        assert!(!results[2].report.measurement.possible);
    }

    #[tokio::test]
    async fn test_solve_all_with_zero_concurrency_still_runs() {
        let puzzles = parse_batch(BATCH, Bucket::One).unwrap();
        let results = solve_all(puzzles, 0, true).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].report.trace.as_ref().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_solve_all_with_huge_concurrency_is_capped() {
        let puzzles = parse_batch(BATCH, Bucket::One).unwrap();
        let results = solve_all(puzzles, usize::MAX, false).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].report.measurement, Measurement::reached(4, Bucket::One, 5));
    }

    #[tokio::test]
    async fn test_render_text() {
        let puzzles = parse_batch(BATCH, Bucket::One).unwrap();
        let results = solve_all(puzzles, 4, false).await.unwrap();
        let text = render(&results, OutputFormat::Text).unwrap();

        assert!(text.starts_with("classic: buckets of 3 and 5 liters"));
        assert!(text.contains("impossible: buckets of 6 and 15 liters"));
        assert!(text.contains("not possible"));
    }
}
