//! Form feedback rules
//!
//! Each exercise has a short decision table evaluated top to bottom; the
//! first matching rule produces the coaching cue.

use crate::config::FeedbackThresholds;
use crate::models::{AngleKind, AngleMap, Exercise, Point2D};
use serde::{Serialize, Serializer};
use std::fmt;

/// Raw joint positions some rules need in addition to the angles
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointPositions {
    pub front_knee: Option<Point2D>,
    pub front_toe: Option<Point2D>,
}

/// Coaching cue for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    KeepBackStraight,
    GoLower,
    GreatSquatForm,
    LowerYourBody,
    KeepBodyStraight,
    GreatPushUpForm,
    KneeForward,
    GreatLungeForm,
    SelectExercise,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Self::KeepBackStraight => "Keep your back straight",
            Self::GoLower => "Go lower",
            Self::GreatSquatForm => "Great squat form",
            Self::LowerYourBody => "Lower your body",
            Self::KeepBodyStraight => "Keep body straight",
            Self::GreatPushUpForm => "Great push-up form",
            Self::KneeForward => "Don't push knee forward",
            Self::GreatLungeForm => "Great lunge form",
            Self::SelectExercise => "Select an exercise",
        }
    }

    /// Whether the cue asks for a correction
    pub fn is_correction(&self) -> bool {
        matches!(
            self,
            Self::KeepBackStraight
                | Self::GoLower
                | Self::LowerYourBody
                | Self::KeepBodyStraight
                | Self::KneeForward
        )
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Stateless rule engine producing one cue per frame
#[derive(Debug, Clone, Default)]
pub struct FeedbackEngine {
    thresholds: FeedbackThresholds,
}

impl FeedbackEngine {
    pub fn new(thresholds: FeedbackThresholds) -> Self {
        Self { thresholds }
    }

    /// Pick the cue for `exercise`; `None` means nothing is selected
    pub fn feedback(
        &self,
        exercise: Option<Exercise>,
        angles: &AngleMap,
        joints: &JointPositions,
    ) -> Feedback {
        match exercise {
            Some(Exercise::Squat) => self.squat(angles),
            Some(Exercise::PushUp) => self.push_up(angles),
            Some(Exercise::Lunge) => self.lunge(joints),
            None => Feedback::SelectExercise,
        }
    }

    fn squat(&self, angles: &AngleMap) -> Feedback {
        let back = angles.value_or(AngleKind::Back, 180.0);
        let knee = angles.value_or(AngleKind::Knee, 180.0);
        let descending = angles.value_or(AngleKind::PhaseDownScore, 0.0) > 0.0;

        if back < self.thresholds.back_min {
            Feedback::KeepBackStraight
        } else if knee > self.thresholds.squat_depth_max && descending {
            Feedback::GoLower
        } else {
            Feedback::GreatSquatForm
        }
    }

    fn push_up(&self, angles: &AngleMap) -> Feedback {
        let elbow = angles.value_or(AngleKind::Elbow, 180.0);
        let body_line = angles.value_or(AngleKind::BodyLine, 180.0);

        if elbow > self.thresholds.pushup_top {
            Feedback::LowerYourBody
        } else if body_line < self.thresholds.body_line_min {
            Feedback::KeepBodyStraight
        } else {
            Feedback::GreatPushUpForm
        }
    }

    fn lunge(&self, joints: &JointPositions) -> Feedback {
        match (joints.front_knee, joints.front_toe) {
            (Some(knee), Some(toe)) if knee.x > toe.x => Feedback::KneeForward,
            _ => Feedback::GreatLungeForm,
        }
    }
}
