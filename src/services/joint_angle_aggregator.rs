//! Joint Angle Aggregator
//!
//! Derives the named angles used by the exercise detector and the feedback
//! rules from one landmark set:
//! - Bilateral joint angles (elbow, knee, hip, shoulder) averaged left/right
//! - Torso angles (back, body line) from left/right midpoints
//! - Front-leg knee angle for single-leg movements
//! - The squat depth flag

use crate::models::{AngleMap, Landmark, LandmarkSet, Point2D, Side};
use crate::services::angle_calculator::calculate_angle;

/// Landmarks of the leg closest to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontLeg {
    pub side: Side,
    pub hip: Point2D,
    pub knee: Point2D,
    pub ankle: Point2D,
    pub toe: Point2D,
}

/// Pick the leg whose knee sits lower in the image (larger y).
///
/// With a top-left origin that is the leg closer to the camera. Equal
/// heights resolve to the left leg.
pub fn front_side(landmarks: &LandmarkSet) -> Side {
    if landmarks[Landmark::RightKnee].y > landmarks[Landmark::LeftKnee].y {
        Side::Right
    } else {
        Side::Left
    }
}

/// Landmarks of the front leg, see [`front_side`]
pub fn front_leg(landmarks: &LandmarkSet) -> FrontLeg {
    let side = front_side(landmarks);
    FrontLeg {
        side,
        hip: landmarks[side.hip()],
        knee: landmarks[side.knee()],
        ankle: landmarks[side.ankle()],
        toe: landmarks[side.foot_index()],
    }
}

/// Computes the [`AngleMap`] for a landmark set
#[derive(Debug, Clone)]
pub struct JointAngleAggregator {
    /// Knee angle below which `phase_down_score` is raised
    phase_down_knee: f64,
}

impl JointAngleAggregator {
    pub fn new() -> Self {
        Self::with_phase_down_knee(120.0)
    }

    pub fn with_phase_down_knee(phase_down_knee: f64) -> Self {
        Self { phase_down_knee }
    }

    /// Compute all derived angles for one frame
    pub fn aggregate(&self, landmarks: &LandmarkSet) -> AngleMap {
        // Average bilateral angles so one occluded side does not dominate
        let elbow = bilateral(landmarks, |s| (s.shoulder(), s.elbow(), s.wrist()));
        let knee = bilateral(landmarks, |s| (s.hip(), s.knee(), s.ankle()));
        let hip = bilateral(landmarks, |s| (s.shoulder(), s.hip(), s.knee()));
        let shoulder = bilateral(landmarks, |s| (s.elbow(), s.shoulder(), s.hip()));

        let shoulder_mid = midpoint(landmarks, Landmark::LeftShoulder, Landmark::RightShoulder);
        let hip_mid = midpoint(landmarks, Landmark::LeftHip, Landmark::RightHip);
        let knee_mid = midpoint(landmarks, Landmark::LeftKnee, Landmark::RightKnee);
        let ankle_mid = midpoint(landmarks, Landmark::LeftAnkle, Landmark::RightAnkle);

        let back = calculate_angle(shoulder_mid, hip_mid, knee_mid);
        let body_line = calculate_angle(shoulder_mid, hip_mid, ankle_mid);

        let leg = front_leg(landmarks);
        let front_knee = calculate_angle(leg.hip, leg.knee, leg.ankle);

        let phase_down_score = if knee < self.phase_down_knee { 1.0 } else { 0.0 };

        AngleMap {
            elbow: Some(elbow),
            knee: Some(knee),
            hip: Some(hip),
            shoulder: Some(shoulder),
            back: Some(back),
            body_line: Some(body_line),
            front_knee: Some(front_knee),
            phase_down_score: Some(phase_down_score),
        }
    }
}

impl Default for JointAngleAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn bilateral(
    landmarks: &LandmarkSet,
    joint: impl Fn(Side) -> (Landmark, Landmark, Landmark),
) -> f64 {
    let total: f64 = Side::BOTH
        .iter()
        .map(|&side| {
            let (a, vertex, c) = joint(side);
            calculate_angle(landmarks[a], landmarks[vertex], landmarks[c])
        })
        .sum();
    total / 2.0
}

fn midpoint(landmarks: &LandmarkSet, left: Landmark, right: Landmark) -> Point2D {
    landmarks[left].midpoint(&landmarks[right])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AngleKind;

    /// Upright figure facing the camera, arms hanging, legs straight
    fn standing_pose() -> Vec<(Landmark, Point2D)> {
        vec![
            (Landmark::Nose, Point2D::new(320.0, 100.0)),
            (Landmark::LeftShoulder, Point2D::new(280.0, 200.0)),
            (Landmark::RightShoulder, Point2D::new(360.0, 200.0)),
            (Landmark::LeftElbow, Point2D::new(280.0, 300.0)),
            (Landmark::RightElbow, Point2D::new(360.0, 300.0)),
            (Landmark::LeftWrist, Point2D::new(280.0, 400.0)),
            (Landmark::RightWrist, Point2D::new(360.0, 400.0)),
            (Landmark::LeftHip, Point2D::new(290.0, 400.0)),
            (Landmark::RightHip, Point2D::new(350.0, 400.0)),
            (Landmark::LeftKnee, Point2D::new(290.0, 550.0)),
            (Landmark::RightKnee, Point2D::new(350.0, 550.0)),
            (Landmark::LeftAnkle, Point2D::new(290.0, 700.0)),
            (Landmark::RightAnkle, Point2D::new(350.0, 700.0)),
            (Landmark::LeftFootIndex, Point2D::new(270.0, 720.0)),
            (Landmark::RightFootIndex, Point2D::new(370.0, 720.0)),
        ]
    }

    fn build(points: Vec<(Landmark, Point2D)>) -> LandmarkSet {
        LandmarkSet::from_named(points.into_iter().map(|(lm, p)| (lm.name(), p))).unwrap()
    }

    fn with(points: Vec<(Landmark, Point2D)>, landmark: Landmark, p: Point2D) -> Vec<(Landmark, Point2D)> {
        points
            .into_iter()
            .map(|(lm, old)| if lm == landmark { (lm, p) } else { (lm, old) })
            .collect()
    }

    #[test]
    fn test_standing_pose_is_fully_extended() {
        let angles = JointAngleAggregator::new().aggregate(&build(standing_pose()));

        assert!((angles.knee.unwrap() - 180.0).abs() < 1e-6);
        assert!((angles.elbow.unwrap() - 180.0).abs() < 1e-6);
        assert!((angles.back.unwrap() - 180.0).abs() < 1e-6);
        assert!((angles.body_line.unwrap() - 180.0).abs() < 1e-6);
        assert!((angles.front_knee.unwrap() - 180.0).abs() < 1e-6);
        assert_eq!(angles.phase_down_score, Some(0.0));
    }

    #[test]
    fn test_every_entry_present() {
        let angles = JointAngleAggregator::new().aggregate(&build(standing_pose()));
        assert_eq!(angles.iter().count(), AngleKind::ALL.len());
    }

    #[test]
    fn test_bilateral_knee_is_averaged() {
        // Bend only the left knee to 90 degrees: ankle straight back from the knee
        let pose = with(standing_pose(), Landmark::LeftAnkle, Point2D::new(440.0, 550.0));
        let angles = JointAngleAggregator::new().aggregate(&build(pose));

        assert!((angles.knee.unwrap() - 135.0).abs() < 1e-6);
        assert_eq!(angles.phase_down_score, Some(0.0));
    }

    #[test]
    fn test_phase_down_score_raised_when_knees_bend() {
        let pose = with(standing_pose(), Landmark::LeftAnkle, Point2D::new(440.0, 550.0));
        let pose = with(pose, Landmark::RightAnkle, Point2D::new(500.0, 550.0));
        let angles = JointAngleAggregator::new().aggregate(&build(pose));

        assert!((angles.knee.unwrap() - 90.0).abs() < 1e-6);
        assert_eq!(angles.phase_down_score, Some(1.0));
    }

    #[test]
    fn test_front_leg_is_lower_knee() {
        // Right knee lower in the image, bent to 90 degrees
        let pose = with(standing_pose(), Landmark::RightKnee, Point2D::new(350.0, 600.0));
        let pose = with(pose, Landmark::RightAnkle, Point2D::new(550.0, 600.0));
        let set = build(pose);

        assert_eq!(front_side(&set), Side::Right);
        let leg = front_leg(&set);
        assert_eq!(leg.knee, Point2D::new(350.0, 600.0));
        assert_eq!(leg.toe, Point2D::new(370.0, 720.0));

        let angles = JointAngleAggregator::new().aggregate(&set);
        assert!((angles.front_knee.unwrap() - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_front_leg_tie_defaults_to_left() {
        let set = build(standing_pose());
        assert_eq!(front_side(&set), Side::Left);
    }

    #[test]
    fn test_degenerate_limb_propagates_zero() {
        let pose = with(standing_pose(), Landmark::LeftWrist, Point2D::new(280.0, 300.0));
        let pose = with(pose, Landmark::RightWrist, Point2D::new(360.0, 300.0));
        let angles = JointAngleAggregator::new().aggregate(&build(pose));

        assert_eq!(angles.elbow, Some(0.0));
    }

    #[test]
    fn test_custom_phase_down_threshold() {
        let pose = with(standing_pose(), Landmark::LeftAnkle, Point2D::new(440.0, 550.0));
        let angles = JointAngleAggregator::with_phase_down_knee(140.0).aggregate(&build(pose));
        assert_eq!(angles.phase_down_score, Some(1.0));
    }
}
