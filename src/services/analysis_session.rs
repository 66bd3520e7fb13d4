//! Frame-by-frame analysis session
//!
//! Wires the aggregator, the exercise detector and the feedback rules
//! together for one stream of frames, and keeps the caller-side state the
//! engine itself does not own: the selected exercise and the last rep count
//! handed to the rep log.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{EngineConfig, LowConfidencePolicy};
use crate::error::EngineError;
use crate::models::{
    AnalysisResult, AngleMap, Detection, Exercise, ExerciseState, LandmarkSet, RepEvent,
};
use crate::services::exercise_detector::ExerciseDetector;
use crate::services::feedback_service::{Feedback, FeedbackEngine, JointPositions};
use crate::services::joint_angle_aggregator::{front_leg, JointAngleAggregator};

/// Message shown for frames without a detected body
pub const POSE_NOT_DETECTED: &str = "Pose not detected. Step into frame.";

/// Destination for completed repetitions
pub trait RepSink {
    fn record(&mut self, event: &RepEvent) -> Result<()>;
}

/// Everything produced for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub result: AnalysisResult,
    pub angles: AngleMap,
    /// `None` when no usable pose was available
    pub feedback: Option<Feedback>,
    /// Set when this frame completed a repetition
    pub rep_event: Option<RepEvent>,
}

impl FrameReport {
    pub fn pose_detected(&self) -> bool {
        self.feedback.is_some()
    }

    /// Text to show for this frame
    pub fn message(&self) -> &'static str {
        self.feedback
            .map(|feedback| feedback.message())
            .unwrap_or(POSE_NOT_DETECTED)
    }
}

/// Totals for a finished or running session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub frames_without_pose: u64,
    pub exercises: Vec<(Exercise, ExerciseState)>,
}

impl SessionSummary {
    pub fn total_reps(&self) -> u32 {
        self.exercises.iter().map(|(_, state)| state.reps).sum()
    }
}

/// Analysis state for one stream of frames
pub struct AnalysisSession {
    config: EngineConfig,
    aggregator: JointAngleAggregator,
    detector: ExerciseDetector,
    feedback: FeedbackEngine,
    exercise: Exercise,
    last_logged_reps: [u32; 3],
    frames: u64,
    frames_without_pose: u64,
}

impl AnalysisSession {
    /// Create a session with a validated configuration, starting on squats
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            aggregator: JointAngleAggregator::with_phase_down_knee(config.phase_down_knee),
            detector: ExerciseDetector::with_config(&config),
            feedback: FeedbackEngine::new(config.feedback),
            config,
            exercise: Exercise::Squat,
            last_logged_reps: [0; 3],
            frames: 0,
            frames_without_pose: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    /// Switch the active exercise. Inactive exercises keep their state.
    pub fn set_exercise(&mut self, exercise: Exercise) {
        if exercise != self.exercise {
            debug!(from = %self.exercise, to = %exercise, "Switching exercise");
        }
        self.exercise = exercise;
    }

    /// Analyze one frame. `None` means no body was detected.
    pub fn process(&mut self, landmarks: Option<&LandmarkSet>) -> FrameReport {
        self.frames += 1;

        let Some(landmarks) = landmarks else {
            self.frames_without_pose += 1;
            let result = self.detector.update(&AngleMap::empty(), self.exercise);
            return self.report(result, AngleMap::empty(), None);
        };

        let angles = self.aggregator.aggregate(landmarks);
        let result = self.detector.update(&angles, self.exercise);

        let leg = front_leg(landmarks);
        let joints = JointPositions {
            front_knee: Some(leg.knee),
            front_toe: Some(leg.toe),
        };
        let feedback = self.feedback.feedback(Some(self.exercise), &angles, &joints);

        self.report(result, angles, Some(feedback))
    }

    /// Analyze one frame, applying the low-confidence policy
    pub fn process_detection(&mut self, detection: &Detection) -> FrameReport {
        match detection {
            Detection::Pose(landmarks) => self.process(Some(landmarks)),
            Detection::NotDetected => self.process(None),
            Detection::LowConfidence(landmarks) => match self.config.low_confidence {
                LowConfidencePolicy::UseAnyway => self.process(Some(landmarks)),
                LowConfidencePolicy::TreatAsAbsent => {
                    warn!(frame = self.frames + 1, "Low-confidence landmarks, treating as absent");
                    self.process(None)
                }
                LowConfidencePolicy::Hold => {
                    warn!(frame = self.frames + 1, "Low-confidence landmarks, holding phase");
                    self.frames += 1;
                    self.frames_without_pose += 1;
                    let result = self.detector.snapshot(self.exercise);
                    FrameReport {
                        result,
                        angles: AngleMap::empty(),
                        feedback: None,
                        rep_event: None,
                    }
                }
            },
        }
    }

    /// Analyze one frame and hand any completed repetition to `sink`
    pub fn process_and_record(
        &mut self,
        detection: &Detection,
        sink: &mut dyn RepSink,
    ) -> Result<FrameReport> {
        let report = self.process_detection(detection);
        if let Some(event) = &report.rep_event {
            sink.record(event)?;
        }
        Ok(report)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            frames_without_pose: self.frames_without_pose,
            exercises: Exercise::ALL
                .iter()
                .map(|&exercise| (exercise, self.detector.state(exercise)))
                .collect(),
        }
    }

    fn report(
        &mut self,
        result: AnalysisResult,
        angles: AngleMap,
        feedback: Option<Feedback>,
    ) -> FrameReport {
        let last_logged = &mut self.last_logged_reps[result.exercise.index()];
        let rep_event = if result.reps > *last_logged {
            *last_logged = result.reps;
            Some(RepEvent::new(result.exercise, result.reps))
        } else {
            None
        };

        FrameReport {
            result,
            angles,
            feedback,
            rep_event,
        }
    }
}
