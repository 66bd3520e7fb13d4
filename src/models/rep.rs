use crate::models::exercise::Exercise;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used in the rep log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A newly completed repetition, emitted once per count increase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepEvent {
    pub exercise: Exercise,
    /// Rep count after the increase
    pub reps: u32,
    pub timestamp: DateTime<Local>,
}

impl RepEvent {
    pub fn new(exercise: Exercise, reps: u32) -> Self {
        Self {
            exercise,
            reps,
            timestamp: Local::now(),
        }
    }
}

/// One row read back from the rep log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRecord {
    pub timestamp: NaiveDateTime,
    pub exercise: Exercise,
    pub repetitions: u32,
}
