use crate::error::EngineError;
use crate::models::angles::AngleKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercises supported by the analysis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exercise {
    Squat,
    #[serde(rename = "Push-up")]
    PushUp,
    Lunge,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Self::Squat, Self::PushUp, Self::Lunge];

    /// Display name, also used in the rep log
    pub fn name(&self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::PushUp => "Push-up",
            Self::Lunge => "Lunge",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Squat => 0,
            Self::PushUp => 1,
            Self::Lunge => 2,
        }
    }

    /// The joint angle that drives this exercise's phase transitions
    pub fn characteristic_angle(self) -> AngleKind {
        match self {
            Self::Squat => AngleKind::Knee,
            Self::PushUp => AngleKind::Elbow,
            Self::Lunge => AngleKind::FrontKnee,
        }
    }

    /// Keyboard shortcut used to select the exercise
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Squat),
            '2' => Some(Self::PushUp),
            '3' => Some(Self::Lunge),
            _ => None,
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(exercise) = Self::from_key(key) {
                return Ok(exercise);
            }
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "squat" | "squats" => Ok(Self::Squat),
            "push-up" | "pushup" | "push_up" | "push-ups" | "pushups" => Ok(Self::PushUp),
            "lunge" | "lunges" => Ok(Self::Lunge),
            _ => Err(EngineError::UnknownExercise(s.to_string())),
        }
    }
}

/// Position within one repetition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Up,
    Down,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Up => write!(f, "up"),
            Phase::Down => write!(f, "down"),
        }
    }
}

/// Repetition counter and current phase of one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExerciseState {
    pub reps: u32,
    pub phase: Phase,
}

/// Snapshot returned for every processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub exercise: Exercise,
    pub reps: u32,
    pub phase: Phase,
}
