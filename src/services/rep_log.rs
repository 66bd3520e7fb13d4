// Rep log: one CSV row per completed repetition

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{Exercise, RepEvent, RepRecord, TIMESTAMP_FORMAT};
use crate::services::analysis_session::RepSink;

/// Header row of the rep log
pub const CSV_HEADER: &str = "Timestamp,Exercise Name,Repetitions";

/// Append-only CSV rep log
#[derive(Debug, Clone)]
pub struct CsvRepLog {
    path: PathBuf,
}

impl CsvRepLog {
    /// Open the log, creating it with a header row if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create rep log directory")?;
            }
            fs::write(&path, format!("{}\n", CSV_HEADER)).context("Failed to create rep log")?;
            tracing::info!("Created rep log at {:?}", path);
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row of the log at `path`
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<RepRecord>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rep log {}", path.display()))?;

        contents
            .lines()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                parse_row(line).with_context(|| format!("Invalid rep log row {}", i + 1))
            })
            .collect()
    }
}

impl RepSink for CsvRepLog {
    fn record(&mut self, event: &RepEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .context("Failed to open rep log")?;

        writeln!(
            file,
            "{},{},{}",
            event.timestamp.format(TIMESTAMP_FORMAT),
            event.exercise,
            event.reps
        )
        .context("Failed to append to rep log")?;

        tracing::debug!("Logged {} rep {}", event.exercise, event.reps);
        Ok(())
    }
}

fn parse_row(line: &str) -> Result<RepRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [timestamp, exercise, repetitions] = fields.as_slice() else {
        bail!("expected 3 fields, found {}", fields.len());
    };

    Ok(RepRecord {
        timestamp: NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .context("Invalid timestamp")?,
        exercise: exercise.parse::<Exercise>()?,
        repetitions: repetitions.parse().context("Invalid repetition count")?,
    })
}

/// In-memory rep log, for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRepLog {
    events: Vec<RepEvent>,
}

impl MemoryRepLog {
    pub fn events(&self) -> &[RepEvent] {
        &self.events
    }
}

impl RepSink for MemoryRepLog {
    fn record(&mut self, event: &RepEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs").join("workout_log.csv");

        CsvRepLog::open(&path)?;

        assert_eq!(fs::read_to_string(&path)?, format!("{}\n", CSV_HEADER));
        Ok(())
    }

    #[test]
    fn test_record_and_read_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("workout_log.csv");
        let mut log = CsvRepLog::open(&path)?;

        log.record(&RepEvent::new(Exercise::Squat, 1))?;
        log.record(&RepEvent::new(Exercise::PushUp, 1))?;

        // Reopening keeps existing rows
        let mut log = CsvRepLog::open(&path)?;
        log.record(&RepEvent::new(Exercise::Squat, 2))?;

        let records = CsvRepLog::read_all(&path)?;
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].exercise, Exercise::PushUp);
        assert_eq!(records[2].repetitions, 2);
        Ok(())
    }

    #[test]
    fn test_parse_row() -> Result<()> {
        let record = parse_row("2024-05-01 07:30:15,Push-up,12")?;
        assert_eq!(record.exercise, Exercise::PushUp);
        assert_eq!(record.repetitions, 12);
        assert_eq!(record.timestamp.format(TIMESTAMP_FORMAT).to_string(), "2024-05-01 07:30:15");
        Ok(())
    }

    #[test]
    fn test_malformed_rows_rejected() {
        assert!(parse_row("2024-05-01 07:30:15,Squat").is_err());
        assert!(parse_row("yesterday,Squat,3").is_err());
        assert!(parse_row("2024-05-01 07:30:15,Plank,3").is_err());
    }

    #[test]
    fn test_memory_log_collects_events() -> Result<()> {
        let mut log = MemoryRepLog::default();
        log.record(&RepEvent::new(Exercise::Lunge, 4))?;
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].reps, 4);
        Ok(())
    }
}
