//! Bearing geometry shared by every directional movement.
//!
//! Screen coordinates: x grows to the right, y grows downwards. Bearings are
//! degrees clockwise from north, so bearing 0 moves towards −y and bearing 90
//! towards +x.

use bevy::math::Vec2;

/// Project `origin` by `distance` pixels along `bearing`.
///
/// The four cardinal bearings are resolved exactly. Everything else is split
/// into the quadrant's own sine/cosine pair so each axis keeps its sign.
pub fn project_point(origin: Vec2, bearing: f32, distance: f32) -> Vec2 {
    let bearing = bearing.rem_euclid(360.0);

    if bearing == 0.0 {
        return Vec2::new(origin.x, origin.y - distance);
    }
    if bearing == 90.0 {
        return Vec2::new(origin.x + distance, origin.y);
    }
    if bearing == 180.0 {
        return Vec2::new(origin.x, origin.y + distance);
    }
    if bearing == 270.0 {
        return Vec2::new(origin.x - distance, origin.y);
    }

    if bearing < 90.0 {
        let angle = bearing.to_radians();
        Vec2::new(
            origin.x + angle.sin() * distance,
            origin.y - angle.cos() * distance,
        )
    } else if bearing < 180.0 {
        let angle = (bearing - 90.0).to_radians();
        Vec2::new(
            origin.x + angle.cos() * distance,
            origin.y + angle.sin() * distance,
        )
    } else if bearing < 270.0 {
        let angle = (bearing - 180.0).to_radians();
        Vec2::new(
            origin.x - angle.sin() * distance,
            origin.y + angle.cos() * distance,
        )
    } else {
        let angle = (bearing - 270.0).to_radians();
        Vec2::new(
            origin.x - angle.cos() * distance,
            origin.y - angle.sin() * distance,
        )
    }
}

/// Bearing and distance from `from` to `to`.
///
/// Identical points yield `(0.0, 0.0)`. Points on a shared axis are answered
/// without touching the arcsine so the ratio is never divided by zero.
pub fn get_bearing(from: Vec2, to: Vec2) -> (f32, f32) {
    let delta_x = to.x - from.x;
    let delta_y = to.y - from.y;
    let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();

    if delta_x == 0.0 && delta_y == 0.0 {
        return (0.0, 0.0);
    }
    if delta_x == 0.0 {
        return (if delta_y < 0.0 { 0.0 } else { 180.0 }, distance);
    }
    if delta_y == 0.0 {
        return (if delta_x > 0.0 { 90.0 } else { 270.0 }, distance);
    }

    let arc = (delta_x / distance).asin().to_degrees();
    let bearing = match (delta_x > 0.0, delta_y < 0.0) {
        // north-east
        (true, true) => arc,
        // south-east and south-west: arc is positive resp. negative
        (_, false) => 180.0 - arc,
        // north-west
        (false, true) => 360.0 + arc,
    };

    (bearing, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cardinal_projection_is_exact() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(project_point(origin, 0.0, 10.0), Vec2::new(100.0, 90.0));
        assert_eq!(project_point(origin, 90.0, 10.0), Vec2::new(110.0, 100.0));
        assert_eq!(project_point(origin, 180.0, 10.0), Vec2::new(100.0, 110.0));
        assert_eq!(project_point(origin, 270.0, 10.0), Vec2::new(90.0, 100.0));
    }

    #[test]
    fn bearing_of_full_turn_wraps_to_north() {
        let origin = Vec2::new(5.0, 5.0);
        assert_eq!(project_point(origin, 360.0, 3.0), Vec2::new(5.0, 2.0));
        assert_eq!(project_point(origin, 450.0, 3.0), Vec2::new(8.0, 5.0));
    }

    #[test]
    fn diagonal_projection_keeps_quadrant_signs() {
        let origin = Vec2::ZERO;
        let ne = project_point(origin, 45.0, 10.0);
        let se = project_point(origin, 135.0, 10.0);
        let sw = project_point(origin, 225.0, 10.0);
        let nw = project_point(origin, 315.0, 10.0);
        assert!(ne.x > 0.0 && ne.y < 0.0);
        assert!(se.x > 0.0 && se.y > 0.0);
        assert!(sw.x < 0.0 && sw.y > 0.0);
        assert!(nw.x < 0.0 && nw.y < 0.0);
        assert_relative_eq!(ne.length(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn bearing_special_cases() {
        assert_eq!(get_bearing(Vec2::ZERO, Vec2::ZERO), (0.0, 0.0));
        assert_eq!(get_bearing(Vec2::ZERO, Vec2::new(10.0, 0.0)), (90.0, 10.0));
        assert_eq!(get_bearing(Vec2::ZERO, Vec2::new(0.0, 10.0)), (180.0, 10.0));
        assert_eq!(get_bearing(Vec2::ZERO, Vec2::new(-4.0, 0.0)), (270.0, 4.0));
        assert_eq!(get_bearing(Vec2::ZERO, Vec2::new(0.0, -7.0)), (0.0, 7.0));
    }

    #[test]
    fn bearing_per_quadrant() {
        let (b, d) = get_bearing(Vec2::ZERO, Vec2::new(3.0, -3.0));
        assert_relative_eq!(b, 45.0, epsilon = 1e-3);
        assert_relative_eq!(d, 18.0_f32.sqrt(), epsilon = 1e-4);

        let (b, _) = get_bearing(Vec2::ZERO, Vec2::new(3.0, 3.0));
        assert_relative_eq!(b, 135.0, epsilon = 1e-3);

        let (b, _) = get_bearing(Vec2::ZERO, Vec2::new(-3.0, 3.0));
        assert_relative_eq!(b, 225.0, epsilon = 1e-3);

        let (b, _) = get_bearing(Vec2::ZERO, Vec2::new(-3.0, -3.0));
        assert_relative_eq!(b, 315.0, epsilon = 1e-3);
    }

    #[test]
    fn projection_and_bearing_round_trip() {
        let origin = Vec2::new(320.0, 240.0);
        for bearing in (0..360).step_by(7) {
            for distance in [0.5_f32, 12.0, 250.0] {
                let target = project_point(origin, bearing as f32, distance);
                let (b, d) = get_bearing(origin, target);
                assert_relative_eq!(d, distance, epsilon = 1e-2);
                // 359.99 and 0.0 are the same heading
                let diff = (b - bearing as f32).rem_euclid(360.0);
                assert!(
                    diff < 0.05 || diff > 359.95,
                    "bearing {bearing} came back as {b}"
                );
            }
        }
    }
}
