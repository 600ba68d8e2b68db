//! Obstacle representation consumed by the proximity queries

use nalgebra::Vector2;

/// Obstacle as reported by perception.
///
/// The set of shapes is closed; proximity queries match on it once instead of
/// probing for concrete types.
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    /// Single point
    Point(Vector2<f64>),
    /// Line segment between two end points
    Line { start: Vector2<f64>, end: Vector2<f64> },
    /// Closed polygon, vertices in order; the last vertex connects to the first
    Polygon(Vec<Vector2<f64>>),
    /// Circle around a center
    Circle { center: Vector2<f64>, radius: f64 },
    /// Segment inflated by a radius
    Pill { start: Vector2<f64>, end: Vector2<f64>, radius: f64 },
}

/// Geometry an obstacle is reduced to for distance computations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape<'a> {
    Point(Vector2<f64>),
    Segment(Vector2<f64>, Vector2<f64>),
    Ring(&'a [Vector2<f64>]),
}

impl Obstacle {
    pub fn point(x: f64, y: f64) -> Self {
        Obstacle::Point(Vector2::new(x, y))
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Obstacle::Line { start: Vector2::new(x1, y1), end: Vector2::new(x2, y2) }
    }

    pub fn polygon(vertices: &[(f64, f64)]) -> Self {
        Obstacle::Polygon(vertices.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }

    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Obstacle::Circle { center: Vector2::new(x, y), radius }
    }

    pub fn pill(x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Self {
        Obstacle::Pill { start: Vector2::new(x1, y1), end: Vector2::new(x2, y2), radius }
    }

    /// Centroid of the obstacle
    pub fn centroid(&self) -> Vector2<f64> {
        match self {
            Obstacle::Point(p) => *p,
            Obstacle::Line { start, end } | Obstacle::Pill { start, end, .. } => 0.5 * (start + end),
            Obstacle::Polygon(vertices) => polygon_centroid(vertices),
            Obstacle::Circle { center, .. } => *center,
        }
    }

    /// Shape used when searching the closest band pose.
    ///
    /// Shapes without a dedicated distance model fall back to their centroid.
    pub fn shape(&self) -> ObstacleShape<'_> {
        match self {
            Obstacle::Point(p) => ObstacleShape::Point(*p),
            Obstacle::Line { start, end } => ObstacleShape::Segment(*start, *end),
            Obstacle::Polygon(vertices) => ObstacleShape::Ring(vertices),
            Obstacle::Circle { .. } | Obstacle::Pill { .. } => ObstacleShape::Point(self.centroid()),
        }
    }
}

/// Area centroid of a simple polygon.
///
/// Degenerate inputs (fewer than three vertices or zero area) use the vertex
/// mean instead.
fn polygon_centroid(vertices: &[Vector2<f64>]) -> Vector2<f64> {
    match vertices.len() {
        0 => Vector2::zeros(),
        1 => vertices[0],
        2 => 0.5 * (vertices[0] + vertices[1]),
        n => {
            let mut area = 0.0;
            let mut centroid = Vector2::zeros();
            for i in 0..n {
                let a = vertices[i];
                let b = vertices[(i + 1) % n];
                let cross = a[0] * b[1] - b[0] * a[1];
                area += cross;
                centroid += (a + b) * cross;
            }
            if area.abs() < 1e-12 {
                return vertices.iter().sum::<Vector2<f64>>() / n as f64;
            }
            centroid / (3.0 * area)
        }
    }
}
