// Analysis engine services

pub mod analysis_session;
pub mod angle_calculator;
pub mod exercise_detector;
pub mod feedback_service;
pub mod joint_angle_aggregator;
pub mod rep_log;

pub use analysis_session::{AnalysisSession, FrameReport, RepSink, SessionSummary, POSE_NOT_DETECTED};
pub use angle_calculator::calculate_angle;
pub use exercise_detector::ExerciseDetector;
pub use feedback_service::{Feedback, FeedbackEngine, JointPositions};
pub use joint_angle_aggregator::{front_leg, front_side, FrontLeg, JointAngleAggregator};
pub use rep_log::{CsvRepLog, MemoryRepLog};
