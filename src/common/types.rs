//! Common types used throughout timed_elastic_band

use std::f64::consts::PI;

use nalgebra::{Vector2, Vector3};

use crate::common::geometry::{average_angles, normalize_theta};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Pose in SE(2): position plus heading.
///
/// `theta` is kept in (-pi, pi] by every constructor and by
/// [`PoseSE2::normalize_theta`]. Fields stay public so the optimizer can
/// write to them directly; callers that do are responsible for wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSE2 {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl PoseSE2 {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta: normalize_theta(theta) }
    }

    pub fn from_position(position: Vector2<f64>, theta: f64) -> Self {
        Self::new(position[0], position[1], theta)
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, theta: 0.0 }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Unit vector pointing along the heading
    pub fn orientation_unit_vec(&self) -> Vector2<f64> {
        Vector2::new(self.theta.cos(), self.theta.sin())
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.theta)
    }

    /// Wrap theta to (-pi, pi]
    pub fn normalize_theta(&mut self) {
        self.theta = normalize_theta(self.theta);
    }

    /// Same position, heading turned by pi
    pub fn reversed(&self) -> Self {
        Self::new(self.x, self.y, self.theta + PI)
    }

    /// SE(2) mean of two poses.
    ///
    /// Positions are averaged component-wise; the heading is the mean along
    /// the shorter arc between both orientations.
    pub fn average(a: &PoseSE2, b: &PoseSE2) -> PoseSE2 {
        PoseSE2 {
            x: 0.5 * (a.x + b.x),
            y: 0.5 * (a.y + b.y),
            theta: average_angles(a.theta, b.theta),
        }
    }
}

impl From<Vector3<f64>> for PoseSE2 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Default for PoseSE2 {
    fn default() -> Self {
        Self::origin()
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Waypoint of a global plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Point2D,
    /// Heading [rad]
    pub theta: f64,
    /// Time stamp [s]; carried along, not interpreted
    pub stamp: f64,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { position: Point2D::new(x, y), theta, stamp: 0.0 }
    }

    pub fn with_stamp(mut self, stamp: f64) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn pose(&self) -> PoseSE2 {
        PoseSE2::new(self.position.x, self.position.y, self.theta)
    }
}
