//! Exercise analysis engine.
//!
//! Turns per-frame body landmark positions into joint angles, repetition
//! counts and form feedback for squats, push-ups and lunges.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{EngineConfig, FeedbackThresholds, LowConfidencePolicy, PhaseThresholds};
pub use error::EngineError;
pub use models::{
    AnalysisResult, AngleKind, AngleMap, Detection, Exercise, ExerciseState, Landmark,
    LandmarkSet, Phase, Point2D, PoseFrame, RepEvent, RepRecord, Side,
};
pub use services::{
    calculate_angle, AnalysisSession, CsvRepLog, ExerciseDetector, Feedback, FeedbackEngine,
    FrameReport, JointAngleAggregator, JointPositions, MemoryRepLog, RepSink, SessionSummary,
};
