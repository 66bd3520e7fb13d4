use proptest::prelude::*;
use rep_coach::{calculate_angle, Point2D};

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point2D> {
    (coord(), coord()).prop_map(|(x, y)| Point2D::new(x, y))
}

proptest! {
    #[test]
    fn angle_is_within_range(a in point(), b in point(), c in point()) {
        let angle = calculate_angle(a, b, c);
        prop_assert!(angle.is_finite());
        prop_assert!((0.0..=180.0).contains(&angle));
    }

    #[test]
    fn angle_is_symmetric(a in point(), b in point(), c in point()) {
        let forward = calculate_angle(a, b, c);
        let backward = calculate_angle(c, b, a);
        prop_assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn opposite_points_are_straight(b in point(), dx in 1.0..500.0f64, dy in -500.0..500.0f64, k in 0.1..10.0f64) {
        let a = Point2D::new(b.x + dx, b.y + dy);
        let c = Point2D::new(b.x - k * dx, b.y - k * dy);
        prop_assert!((calculate_angle(a, b, c) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn coincident_point_yields_zero(b in point(), c in point()) {
        prop_assert_eq!(calculate_angle(b, b, c), 0.0);
        prop_assert_eq!(calculate_angle(c, b, b), 0.0);
    }

    #[test]
    fn angle_ignores_translation(a in point(), b in point(), c in point(), dx in coord(), dy in coord()) {
        prop_assume!((a - b).norm() > 1.0 && (c - b).norm() > 1.0);
        let shift = |p: Point2D| Point2D::new(p.x + dx, p.y + dy);
        let moved = calculate_angle(shift(a), shift(b), shift(c));
        prop_assert!((calculate_angle(a, b, c) - moved).abs() < 1e-4);
    }
}

#[test]
fn right_angle() {
    let angle = calculate_angle(
        Point2D::new(0.0, 1.0),
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 0.0),
    );
    assert!((angle - 90.0).abs() < 1e-9);
}
