/*
 * Vector Module
 *
 * Steering helpers on top of nannou's glam-backed Vec2. glam already covers
 * magnitude and normalization; this adds the speed clamp every boid goes
 * through at the end of a tick and the "away from" direction used by the
 * repulsion forces.
 */

use nannou::prelude::*;

pub trait SteeringExt {
    /// Rescale so the magnitude lies in `[min_speed, max_speed]`.
    ///
    /// A zero vector has no heading to rescale, so it becomes
    /// `(min_speed, 0)` instead of staying stuck at rest.
    fn clamp_speed(self, min_speed: f32, max_speed: f32) -> Vec2;

    /// Unit vector pointing from `from` towards `self`.
    ///
    /// Coincident points fall back to +x.
    fn away_from(self, from: Point2) -> Vec2;
}

impl SteeringExt for Vec2 {
    fn clamp_speed(self, min_speed: f32, max_speed: f32) -> Vec2 {
        let speed = self.length();

        if speed == 0.0 {
            return vec2(min_speed, 0.0);
        }

        if speed > max_speed {
            self / speed * max_speed
        } else if speed < min_speed {
            self / speed * min_speed
        } else {
            self
        }
    }

    fn away_from(self, from: Point2) -> Vec2 {
        let offset = self - from;
        let distance = offset.length();
        if distance > 0.0 {
            offset / distance
        } else {
            vec2(1.0, 0.0)
        }
    }
}

/// Average of `count` accumulated vectors, or zero when nothing was accumulated.
#[inline]
pub fn mean(sum: Vec2, count: usize) -> Vec2 {
    if count == 0 {
        Vec2::ZERO
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn clamp_speed_scales_fast_vectors_down() {
        let clamped = vec2(30.0, 40.0).clamp_speed(1.0, 5.0);
        assert!((clamped.length() - 5.0).abs() < EPSILON);
        assert!((clamped.x - 3.0).abs() < EPSILON);
        assert!((clamped.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn clamp_speed_scales_slow_vectors_up() {
        let clamped = vec2(0.0, -0.1).clamp_speed(2.0, 5.0);
        assert!((clamped.length() - 2.0).abs() < EPSILON);
        assert!(clamped.y < 0.0);
    }

    #[test]
    fn clamp_speed_leaves_in_range_vectors_alone() {
        let v = vec2(1.0, 2.0);
        assert_eq!(v, v.clamp_speed(1.0, 5.0));
    }

    #[test]
    fn clamp_speed_gives_zero_vectors_a_heading() {
        let clamped = Vec2::ZERO.clamp_speed(0.8, 4.0);
        assert_eq!(vec2(0.8, 0.0), clamped);
    }

    #[test]
    fn away_from_is_a_unit_vector() {
        let away = pt2(10.0, 10.0).away_from(pt2(7.0, 6.0));
        assert!((away.length() - 1.0).abs() < EPSILON);
        assert!(away.x > 0.0 && away.y > 0.0);

        assert_eq!(vec2(1.0, 0.0), pt2(3.0, 3.0).away_from(pt2(3.0, 3.0)));
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(Vec2::ZERO, mean(vec2(4.0, 4.0), 0));
        assert_eq!(vec2(2.0, 1.0), mean(vec2(4.0, 2.0), 2));
    }
}
