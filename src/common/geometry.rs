//! Stateless geometry helpers shared by the band algorithms.
//!
//! All angles are in radians, counter-clockwise positive.

use std::f64::consts::PI;

use nalgebra::Vector2;

const TWO_PI: f64 = 2.0 * PI;

/// Wrap an angle to (-pi, pi].
///
/// ```
/// use timed_elastic_band::common::geometry::normalize_theta;
/// use std::f64::consts::PI;
///
/// assert!((normalize_theta(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
/// assert!((normalize_theta(-PI) - PI).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_theta(theta: f64) -> f64 {
    let mut a = theta % TWO_PI;
    if a > PI {
        a -= TWO_PI;
    } else if a <= -PI {
        a += TWO_PI;
    }
    a
}

/// Shortest signed rotation taking `from` to `to`
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_theta(to - from)
}

/// Mean of two angles along the shorter arc.
///
/// When the two headings are more than pi apart the plain mean points the
/// wrong way, so it is flipped by pi.
#[inline]
pub fn average_angles(a: f64, b: f64) -> f64 {
    let mid = 0.5 * (a + b);
    if (a - b).abs() > PI {
        normalize_theta(mid + PI)
    } else {
        normalize_theta(mid)
    }
}

/// Closest point to `point` on the segment `[line_start, line_end]`
pub fn closest_point_on_segment_2d(
    point: &Vector2<f64>,
    line_start: &Vector2<f64>,
    line_end: &Vector2<f64>,
) -> Vector2<f64> {
    let diff = line_end - line_start;
    let sq_norm = diff.norm_squared();

    if sq_norm == 0.0 {
        return *line_start;
    }

    let u = (point - line_start).dot(&diff) / sq_norm;

    if u <= 0.0 {
        *line_start
    } else if u >= 1.0 {
        *line_end
    } else {
        line_start + u * diff
    }
}

/// Euclidean distance between `point` and the segment `[line_start, line_end]`
pub fn distance_point_to_segment_2d(
    point: &Vector2<f64>,
    line_start: &Vector2<f64>,
    line_end: &Vector2<f64>,
) -> f64 {
    (point - closest_point_on_segment_2d(point, line_start, line_end)).norm()
}
