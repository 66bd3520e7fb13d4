use crate::models::Point2D;

/// Calculate the angle at `vertex` formed by `point_a` - `vertex` - `point_c`
///
/// # Arguments
/// * `point_a` - First point (e.g., hip)
/// * `vertex` - Joint point (e.g., knee)
/// * `point_c` - Third point (e.g., ankle)
///
/// # Returns
/// Angle in degrees within [0, 180]. Returns 0.0 when either limb vector has
/// zero length, since the angle is undefined there.
pub fn calculate_angle(point_a: Point2D, vertex: Point2D, point_c: Point2D) -> f64 {
    // Vectors from joint to adjacent points
    let vec_ba = point_a - vertex;
    let vec_bc = point_c - vertex;

    let mag_ba = vec_ba.norm();
    let mag_bc = vec_bc.norm();

    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    let cos_angle = vec_ba.dot(&vec_bc) / (mag_ba * mag_bc);
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}
