// Shared fixtures for engine integration tests

use rep_coach::models::{FrameLandmark, ImageSize, PoseFrame};
use rep_coach::{Landmark, LandmarkSet, Point2D};

/// Joint configuration of a synthetic figure facing the camera
#[derive(Debug, Clone, Copy)]
pub struct Figure {
    /// Knee angle of both legs, in degrees
    pub knee: f64,
    /// Elbow angle of both arms, in degrees
    pub elbow: f64,
    /// Extra downward offset of the right knee and ankle, in pixels
    pub right_leg_drop: f64,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            knee: 180.0,
            elbow: 180.0,
            right_leg_drop: 0.0,
        }
    }
}

impl Figure {
    pub fn knee(knee: f64) -> Self {
        Self {
            knee,
            ..Self::default()
        }
    }

    pub fn elbow(elbow: f64) -> Self {
        Self {
            elbow,
            ..Self::default()
        }
    }

    /// Place a limb end `length` pixels from `joint` so that the angle with
    /// the upward segment is `degrees`
    fn bend(joint: Point2D, degrees: f64, length: f64) -> Point2D {
        let rad = degrees.to_radians();
        Point2D::new(joint.x + length * rad.sin(), joint.y - length * rad.cos())
    }

    pub fn landmarks(&self) -> LandmarkSet {
        let left_knee = Point2D::new(290.0, 550.0);
        let right_knee = Point2D::new(350.0, 550.0 + self.right_leg_drop);
        let left_elbow = Point2D::new(280.0, 300.0);
        let right_elbow = Point2D::new(360.0, 300.0);

        LandmarkSet::from_fn(|landmark| match landmark {
            Landmark::Nose => Point2D::new(320.0, 100.0),
            Landmark::LeftShoulder => Point2D::new(280.0, 200.0),
            Landmark::RightShoulder => Point2D::new(360.0, 200.0),
            Landmark::LeftElbow => left_elbow,
            Landmark::RightElbow => right_elbow,
            Landmark::LeftWrist => Self::bend(left_elbow, self.elbow, 100.0),
            Landmark::RightWrist => Self::bend(right_elbow, self.elbow, 100.0),
            Landmark::LeftHip => Point2D::new(290.0, 400.0),
            Landmark::RightHip => Point2D::new(350.0, 400.0 + self.right_leg_drop),
            Landmark::LeftKnee => left_knee,
            Landmark::RightKnee => right_knee,
            Landmark::LeftAnkle => Self::bend(left_knee, self.knee, 150.0),
            Landmark::RightAnkle => Self::bend(right_knee, self.knee, 150.0),
            Landmark::LeftFootIndex => Point2D::new(310.0, 720.0),
            Landmark::RightFootIndex => Point2D::new(370.0, 720.0 + self.right_leg_drop),
        })
    }

    /// Wire-format frame with normalized coordinates for a 640x800 image
    pub fn frame(&self, frame_number: u64, visibility: f64) -> PoseFrame {
        self.frame_with(frame_number, |_| visibility)
    }

    /// Like [`Figure::frame`], with a per-landmark visibility
    pub fn frame_with(&self, frame_number: u64, visibility: impl Fn(Landmark) -> f64) -> PoseFrame {
        let size = ImageSize {
            width: 640,
            height: 800,
        };
        let landmarks = self
            .landmarks()
            .iter()
            .map(|(landmark, point)| FrameLandmark {
                name: landmark.name().to_string(),
                x: point.x / size.width as f64,
                y: point.y / size.height as f64,
                visibility: visibility(landmark),
            })
            .collect();

        PoseFrame {
            frame_number,
            timestamp_ms: frame_number * 33,
            image_size: Some(size),
            landmarks: Some(landmarks),
        }
    }
}
