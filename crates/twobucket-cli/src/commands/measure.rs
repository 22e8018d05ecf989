//! Single puzzle measurement

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use twobucket_core::{Bucket, BucketSearch, Liters, Outcome, Problem, SearchReport};

use crate::config::{Config, OutputFormat};

#[derive(Args)]
pub struct MeasureArgs {
    /// Capacity of bucket one in liters
    pub capacity_one: Liters,
    /// Capacity of bucket two in liters
    pub capacity_two: Liters,
    /// Volume to measure
    pub goal: Liters,
    /// Bucket filled by the first move (one or two)
    #[arg(short, long)]
    pub start: Option<Bucket>,
    /// Print the move sequence
    #[arg(short, long)]
    pub trace: bool,
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub async fn run(args: MeasureArgs, config: &Config) -> Result<()> {
    let start = args.start.unwrap_or(config.search.default_start);
    let problem = Problem::new(args.capacity_one, args.capacity_two, args.goal, start)
        .context("Invalid puzzle")?;

    let report = BucketSearch::new(problem)
        .with_trace(args.trace || config.output.show_trace)
        .run();
    info!(
        "Measured {} liters with buckets of {} and {}: possible={}",
        problem.goal, problem.capacity_one, problem.capacity_two, report.measurement.possible
    );

    let format = args.format.unwrap_or(config.output.format);
    println!("{}", render(&problem, &report, format)?);
    Ok(())
}

pub fn render(problem: &Problem, report: &SearchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "problem": problem,
                "report": report,
            });
            serde_json::to_string_pretty(&body).context("Failed to encode result")
        }
        OutputFormat::Text => Ok(render_text(problem, report)),
    }
}

/// One-line description of the puzzle
pub fn describe(problem: &Problem) -> String {
    format!(
        "buckets of {} and {} liters, goal {}, start with bucket {}",
        problem.capacity_one, problem.capacity_two, problem.goal, problem.start
    )
}

/// One-line summary of the result
pub fn summarize(report: &SearchReport) -> String {
    let m = &report.measurement;
    match report.outcome {
        Outcome::AlreadyAtGoal | Outcome::Reached => format!(
            "possible in {} move{}: bucket {} holds the goal, bucket {} holds {}",
            m.move_count,
            if m.move_count == 1 { "" } else { "s" },
            m.goal_bucket,
            m.goal_bucket.other(),
            m.other_bucket_level
        ),
        Outcome::Infeasible { reason } => format!("not possible: {reason}"),
        Outcome::Exhausted => "not possible: no move sequence reaches the goal".to_string(),
    }
}

fn render_text(problem: &Problem, report: &SearchReport) -> String {
    let mut lines = vec![
        format!("Puzzle: {}", describe(problem)),
        format!("Result: {}", summarize(report)),
    ];

    if let Some(trace) = &report.trace {
        lines.push("Moves:".to_string());
        for (index, step) in trace.iter().enumerate() {
            lines.push(format!(
                "  {:>3}. {:<32} {}",
                index + 1,
                step.action.to_string(),
                step.state
            ));
        }
    }

    lines.join("\n")
}
