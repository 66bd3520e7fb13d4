use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived quantities computed from one landmark set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    Elbow,
    Knee,
    Hip,
    Shoulder,
    Back,
    BodyLine,
    FrontKnee,
    /// 1.0 when the averaged knee angle is below the squat depth cue, else 0.0
    PhaseDownScore,
}

impl AngleKind {
    pub const ALL: [AngleKind; 8] = [
        Self::Elbow,
        Self::Knee,
        Self::Hip,
        Self::Shoulder,
        Self::Back,
        Self::BodyLine,
        Self::FrontKnee,
        Self::PhaseDownScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Elbow => "elbow",
            Self::Knee => "knee",
            Self::Hip => "hip",
            Self::Shoulder => "shoulder",
            Self::Back => "back",
            Self::BodyLine => "body_line",
            Self::FrontKnee => "front_knee",
            Self::PhaseDownScore => "phase_down_score",
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Joint angles in degrees for one frame.
///
/// Every entry is optional: a frame without a detected pose produces an
/// empty map, and consumers fall back to their own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elbow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_line: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_knee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_down_score: Option<f64>,
}

impl AngleMap {
    /// Map with no entries, used when no pose was detected
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        AngleKind::ALL.iter().all(|&kind| self.get(kind).is_none())
    }

    pub fn get(&self, kind: AngleKind) -> Option<f64> {
        match kind {
            AngleKind::Elbow => self.elbow,
            AngleKind::Knee => self.knee,
            AngleKind::Hip => self.hip,
            AngleKind::Shoulder => self.shoulder,
            AngleKind::Back => self.back,
            AngleKind::BodyLine => self.body_line,
            AngleKind::FrontKnee => self.front_knee,
            AngleKind::PhaseDownScore => self.phase_down_score,
        }
    }

    /// Value of an entry, or `default` when absent
    pub fn value_or(&self, kind: AngleKind, default: f64) -> f64 {
        self.get(kind).unwrap_or(default)
    }

    pub fn set(&mut self, kind: AngleKind, value: f64) {
        let slot = match kind {
            AngleKind::Elbow => &mut self.elbow,
            AngleKind::Knee => &mut self.knee,
            AngleKind::Hip => &mut self.hip,
            AngleKind::Shoulder => &mut self.shoulder,
            AngleKind::Back => &mut self.back,
            AngleKind::BodyLine => &mut self.body_line,
            AngleKind::FrontKnee => &mut self.front_knee,
            AngleKind::PhaseDownScore => &mut self.phase_down_score,
        };
        *slot = Some(value);
    }

    pub fn with(mut self, kind: AngleKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Present entries in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (AngleKind, f64)> + '_ {
        AngleKind::ALL
            .iter()
            .filter_map(move |&kind| self.get(kind).map(|value| (kind, value)))
    }
}
