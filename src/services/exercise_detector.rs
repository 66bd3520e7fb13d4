//! Exercise phase detection and repetition counting
//!
//! Each exercise runs a two-state (up/down) machine driven by its
//! characteristic joint angle. A repetition is counted on the down -> up
//! transition only, so fluctuations that never cross both thresholds in
//! order are ignored.

use crate::config::{EngineConfig, PhaseThresholds};
use crate::models::{AnalysisResult, AngleMap, Exercise, ExerciseState, Phase};
use tracing::{debug, info};

/// Angle assumed when the characteristic angle is missing (fully extended)
pub const DEFAULT_ANGLE: f64 = 180.0;

/// Per-exercise phase state machines
#[derive(Debug, Clone)]
pub struct ExerciseDetector {
    states: [ExerciseState; 3],
    thresholds: [PhaseThresholds; 3],
}

impl ExerciseDetector {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            states: [ExerciseState::default(); 3],
            thresholds: Exercise::ALL.map(|exercise| config.thresholds(exercise)),
        }
    }

    /// Advance the selected exercise's state machine by one frame.
    ///
    /// Other exercises are neither read nor modified.
    pub fn update(&mut self, angles: &AngleMap, exercise: Exercise) -> AnalysisResult {
        let thresholds = self.thresholds[exercise.index()];
        let angle = angles.value_or(exercise.characteristic_angle(), DEFAULT_ANGLE);
        let state = &mut self.states[exercise.index()];

        if angle < thresholds.down_below {
            if state.phase == Phase::Up {
                debug!(%exercise, angle, "Entering down phase");
            }
            state.phase = Phase::Down;
        } else if angle > thresholds.up_above && state.phase == Phase::Down {
            state.phase = Phase::Up;
            state.reps += 1;
            info!(%exercise, reps = state.reps, "Repetition completed");
        }

        self.snapshot(exercise)
    }

    /// Current state of an exercise without advancing it
    pub fn snapshot(&self, exercise: Exercise) -> AnalysisResult {
        let state = self.states[exercise.index()];
        AnalysisResult {
            exercise,
            reps: state.reps,
            phase: state.phase,
        }
    }

    pub fn state(&self, exercise: Exercise) -> ExerciseState {
        self.states[exercise.index()]
    }
}

impl Default for ExerciseDetector {
    fn default() -> Self {
        Self::new()
    }
}
