//! Body landmark models
//!
//! This module provides the fixed landmark vocabulary consumed by the engine
//! and the per-frame landmark set built from it.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Sub};
use std::str::FromStr;

/// Number of landmarks in the vocabulary
pub const LANDMARK_COUNT: usize = 15;

/// A 2-D position in pixel space (origin top-left, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Dot product, treating both points as vectors
    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length, treating the point as a vector
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Landmark indices in the fixed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose = 0,
    LeftShoulder = 1,
    RightShoulder = 2,
    LeftElbow = 3,
    RightElbow = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftHip = 7,
    RightHip = 8,
    LeftKnee = 9,
    RightKnee = 10,
    LeftAnkle = 11,
    RightAnkle = 12,
    LeftFootIndex = 13,
    RightFootIndex = 14,
}

impl Landmark {
    /// All landmarks in index order
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Landmark {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|landmark| landmark.name() == s)
            .ok_or_else(|| EngineError::UnknownLandmark(s.to_string()))
    }
}

/// Body side, used to address bilateral landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn shoulder(self) -> Landmark {
        self.pick(Landmark::LeftShoulder, Landmark::RightShoulder)
    }

    pub fn elbow(self) -> Landmark {
        self.pick(Landmark::LeftElbow, Landmark::RightElbow)
    }

    pub fn wrist(self) -> Landmark {
        self.pick(Landmark::LeftWrist, Landmark::RightWrist)
    }

    pub fn hip(self) -> Landmark {
        self.pick(Landmark::LeftHip, Landmark::RightHip)
    }

    pub fn knee(self) -> Landmark {
        self.pick(Landmark::LeftKnee, Landmark::RightKnee)
    }

    pub fn ankle(self) -> Landmark {
        self.pick(Landmark::LeftAnkle, Landmark::RightAnkle)
    }

    pub fn foot_index(self) -> Landmark {
        self.pick(Landmark::LeftFootIndex, Landmark::RightFootIndex)
    }

    fn pick(self, left: Landmark, right: Landmark) -> Landmark {
        match self {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

/// Complete set of landmark positions for one frame.
///
/// Holds exactly one point per vocabulary entry, so every lookup is
/// infallible once the set is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Point2D; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Build a set by asking `f` for every landmark
    pub fn from_fn(mut f: impl FnMut(Landmark) -> Point2D) -> Self {
        let mut points = [Point2D::default(); LANDMARK_COUNT];
        for landmark in Landmark::ALL {
            points[landmark.index()] = f(landmark);
        }
        Self { points }
    }

    /// Build a set from `(name, point)` pairs.
    ///
    /// Fails if a name is outside the vocabulary or if any vocabulary entry
    /// is missing. Later duplicates overwrite earlier ones.
    pub fn from_named<I, S>(pairs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, Point2D)>,
        S: AsRef<str>,
    {
        let mut slots: [Option<Point2D>; LANDMARK_COUNT] = [None; LANDMARK_COUNT];
        for (name, point) in pairs {
            let landmark: Landmark = name.as_ref().parse()?;
            slots[landmark.index()] = Some(point);
        }

        let mut points = [Point2D::default(); LANDMARK_COUNT];
        for landmark in Landmark::ALL {
            points[landmark.index()] =
                slots[landmark.index()].ok_or(EngineError::MissingLandmark(landmark.name()))?;
        }

        Ok(Self { points })
    }

    /// Get the position of a landmark
    pub fn get(&self, landmark: Landmark) -> Point2D {
        self.points[landmark.index()]
    }

    /// Iterate over all landmarks with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Landmark, Point2D)> + '_ {
        Landmark::ALL.iter().map(move |&landmark| (landmark, self.get(landmark)))
    }
}

impl Index<Landmark> for LandmarkSet {
    type Output = Point2D;

    fn index(&self, landmark: Landmark) -> &Point2D {
        &self.points[landmark.index()]
    }
}
