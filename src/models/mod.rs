pub mod angles;
pub mod exercise;
pub mod frame;
pub mod landmark;
pub mod rep;

pub use angles::{AngleKind, AngleMap};
pub use exercise::{AnalysisResult, Exercise, ExerciseState, Phase};
pub use frame::{Detection, FrameLandmark, ImageSize, PoseFrame};
pub use landmark::{Landmark, LandmarkSet, Point2D, Side, LANDMARK_COUNT};
pub use rep::{RepEvent, RepRecord, TIMESTAMP_FORMAT};
