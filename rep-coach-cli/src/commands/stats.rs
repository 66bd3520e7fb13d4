use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use colored::Colorize;
use rep_coach::{CsvRepLog, Exercise, RepRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::parse_exercise;
use crate::config::Config;

#[derive(Args)]
pub struct StatsCommand {
    /// Rep log file (overrides the configured path)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Only show one exercise
    #[arg(short, long, value_parser = parse_exercise)]
    exercise: Option<Exercise>,
}

/// Rep log totals for one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    pub exercise: Exercise,
    /// Logged rows; the log holds one row per completed rep
    pub total_reps: usize,
    /// Highest count reached within one run
    pub best_count: u32,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

/// Group log rows per exercise, in exercise order
pub fn summarize(records: &[RepRecord], filter: Option<Exercise>) -> Vec<ExerciseStats> {
    let mut stats: BTreeMap<Exercise, ExerciseStats> = BTreeMap::new();

    for record in records {
        if filter.is_some_and(|exercise| exercise != record.exercise) {
            continue;
        }

        stats
            .entry(record.exercise)
            .and_modify(|entry| {
                entry.total_reps += 1;
                entry.best_count = entry.best_count.max(record.repetitions);
                entry.first = entry.first.min(record.timestamp);
                entry.last = entry.last.max(record.timestamp);
            })
            .or_insert(ExerciseStats {
                exercise: record.exercise,
                total_reps: 1,
                best_count: record.repetitions,
                first: record.timestamp,
                last: record.timestamp,
            });
    }

    stats.into_values().collect()
}

impl StatsCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let path = self.log.unwrap_or_else(|| config.log.path.clone());

        println!("{}", "Rep Log Statistics".bold());
        println!("────────────────────────────────");

        if !path.exists() {
            println!("No rep log found at {}", path.display());
            return Ok(());
        }

        let records = CsvRepLog::read_all(&path)?;
        tracing::debug!("Read {} rep log rows from {:?}", records.len(), path);

        let stats = summarize(&records, self.exercise);
        if stats.is_empty() {
            println!("No reps logged yet");
            return Ok(());
        }

        for entry in &stats {
            println!();
            println!("{}", entry.exercise.to_string().bold());
            println!("  Total reps:  {}", entry.total_reps);
            println!("  Best count:  {}", entry.best_count);
            println!("  First rep:   {}", entry.first);
            println!("  Last rep:    {}", entry.last);
        }

        Ok(())
    }
}
