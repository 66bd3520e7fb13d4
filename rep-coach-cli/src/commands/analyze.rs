use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rep_coach::{
    AnalysisSession, CsvRepLog, Exercise, FrameReport, MemoryRepLog, RepSink, SessionSummary,
};
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;

use super::parse_exercise;
use crate::config::Config;
use crate::stream::{self, StreamRecord};

#[derive(Args)]
pub struct AnalyzeCommand {
    /// JSON-lines pose stream, or "-" for standard input
    input: PathBuf,

    /// Exercise selected at the start of the stream
    #[arg(short, long, default_value = "squat", value_parser = parse_exercise)]
    exercise: Exercise,

    /// Rep log file (overrides the configured path)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Do not write completed reps to the rep log
    #[arg(long, conflicts_with = "log")]
    no_log: bool,

    /// Only print the final summary
    #[arg(short, long)]
    quiet: bool,

    /// Print one JSON report per frame
    #[arg(long, conflicts_with = "quiet")]
    json: bool,
}

impl AnalyzeCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        if !config.ui.color {
            colored::control::set_override(false);
        }

        let mut session = AnalysisSession::new(config.engine.clone())?;
        session.set_exercise(self.exercise);

        let log_path = match (&self.log, self.no_log || !config.log.enabled) {
            (Some(path), _) => Some(path.clone()),
            (None, false) => Some(config.log.path.clone()),
            (None, true) => None,
        };
        let mut sink: Box<dyn RepSink> = match &log_path {
            Some(path) => Box::new(CsvRepLog::open(path)?),
            None => Box::new(MemoryRepLog::default()),
        };

        let mut lines = stream::open(&self.input).await?.lines();
        let mut line_number = 0usize;

        while let Some(line) = lines.next_line().await.context("Failed to read pose stream")? {
            line_number += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record = StreamRecord::parse(line)
                .with_context(|| format!("Invalid record on line {}", line_number))?;

            match record {
                StreamRecord::Select(exercise) => {
                    session.set_exercise(exercise);
                    if !self.quiet && !self.json {
                        println!("{} {}", "→".cyan(), exercise.to_string().bold());
                    }
                }
                StreamRecord::Frame(frame) => {
                    let detection = frame
                        .detection(session.config().min_visibility)
                        .with_context(|| format!("Invalid frame on line {}", line_number))?;
                    let report = session.process_and_record(&detection, sink.as_mut())?;

                    if self.json {
                        println!("{}", serde_json::to_string(&report)?);
                    } else if !self.quiet {
                        print_frame(frame.frame_number, &report, config.ui.show_angles);
                    }
                }
            }
        }

        let summary = session.summary();
        if self.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            print_summary(&summary, log_path.as_ref());
        }

        Ok(())
    }
}

fn print_frame(frame_number: u64, report: &FrameReport, show_angles: bool) {
    let result = &report.result;
    let mut line = format!(
        "frame {:>5}  {:<8} reps {:>3}  {:<4}",
        frame_number,
        result.exercise.to_string(),
        result.reps,
        result.phase.to_string()
    );

    if show_angles {
        let kind = result.exercise.characteristic_angle();
        if let Some(angle) = report.angles.get(kind) {
            line.push_str(&format!("  {} {:>5.1}°", kind, angle));
        }
    }

    let message = match report.feedback {
        Some(feedback) if feedback.is_correction() => feedback.message().yellow(),
        Some(feedback) => feedback.message().green(),
        None => report.message().dimmed(),
    };
    println!("{}  {}", line, message);

    if let Some(event) = &report.rep_event {
        println!(
            "{}",
            format!("✓ {} rep {}", event.exercise, event.reps).green().bold()
        );
    }
}

fn print_summary(summary: &SessionSummary, log_path: Option<&PathBuf>) {
    println!();
    println!("{}", "Session Summary".bold());
    println!("────────────────────────────────");
    println!(
        "Frames analyzed: {} ({} without pose)",
        summary.frames, summary.frames_without_pose
    );
    for (exercise, state) in &summary.exercises {
        println!("  {:<8} {:>3} reps", exercise.to_string(), state.reps);
    }
    println!("Total: {} reps", summary.total_reps());

    if let Some(path) = log_path {
        println!("Rep log: {}", path.display());
    }
}
