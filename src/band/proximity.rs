//! Closest band pose to points, segments, polygons and obstacles
//!
//! Cost terms use these queries to attach each obstacle to the part of the
//! trajectory it affects. Ties resolve to the lowest pose index.

use itertools::Itertools;
use nalgebra::Vector2;
use ordered_float::OrderedFloat;

use crate::common::geometry::distance_point_to_segment_2d;
use crate::common::{Obstacle, ObstacleShape};

use super::timed_elastic_band::TimedElasticBand;

/// Index of the closest pose and its distance to the query target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPose {
    pub index: usize,
    pub distance: f64,
}

impl TimedElasticBand {
    /// Closest pose to `point`, searching from `begin_idx` onward.
    ///
    /// Returns `None` if `begin_idx` is not a valid pose index, which covers
    /// the empty band.
    pub fn find_closest_pose_to_point(&self, point: &Vector2<f64>, begin_idx: usize) -> Option<ClosestPose> {
        if begin_idx >= self.poses.len() {
            return None;
        }

        let (index, dist_sq) = self.poses[begin_idx..]
            .iter()
            .enumerate()
            .map(|(i, v)| (begin_idx + i, (point - v.pose.position()).norm_squared()))
            .min_by_key(|&(_, d)| OrderedFloat(d))?;

        Some(ClosestPose { index, distance: dist_sq.sqrt() })
    }

    /// Closest pose to the segment `[line_start, line_end]`
    pub fn find_closest_pose_to_segment(
        &self,
        line_start: &Vector2<f64>,
        line_end: &Vector2<f64>,
    ) -> Option<ClosestPose> {
        self.closest_by(|position| distance_point_to_segment_2d(position, line_start, line_end))
    }

    /// Closest pose to the boundary of a polygon.
    ///
    /// The ring is closed implicitly (last vertex to first). One vertex is
    /// treated as a point, two as a segment; no vertices yield `None`.
    pub fn find_closest_pose_to_polygon(&self, vertices: &[Vector2<f64>]) -> Option<ClosestPose> {
        match vertices {
            [] => None,
            [point] => self.find_closest_pose_to_point(point, 0),
            [start, end] => self.find_closest_pose_to_segment(start, end),
            _ => self.closest_by(|position| {
                vertices
                    .iter()
                    .circular_tuple_windows::<(_, _)>()
                    .map(|(a, b)| distance_point_to_segment_2d(position, a, b))
                    .fold(f64::INFINITY, f64::min)
            }),
        }
    }

    /// Closest pose to an obstacle, using the obstacle's representative shape
    pub fn find_closest_pose_to_obstacle(&self, obstacle: &Obstacle) -> Option<ClosestPose> {
        match obstacle.shape() {
            ObstacleShape::Point(p) => self.find_closest_pose_to_point(&p, 0),
            ObstacleShape::Segment(start, end) => self.find_closest_pose_to_segment(&start, &end),
            ObstacleShape::Ring(vertices) => self.find_closest_pose_to_polygon(vertices),
        }
    }

    fn closest_by<F>(&self, distance: F) -> Option<ClosestPose>
    where
        F: Fn(&Vector2<f64>) -> f64,
    {
        self.poses
            .iter()
            .enumerate()
            .map(|(index, v)| ClosestPose { index, distance: distance(&v.pose.position()) })
            .min_by_key(|c| OrderedFloat(c.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn band(points: &[(f64, f64)]) -> TimedElasticBand {
        let mut band = TimedElasticBand::new();
        band.add_pose_xy(points[0].0, points[0].1, 0.0, true);
        for &(x, y) in &points[1..] {
            band.add_pose_and_time_diff_xy(x, y, 0.0, 0.5).unwrap();
        }
        band
    }

    #[test]
    fn test_closest_to_point() {
        let band = band(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let closest = band.find_closest_pose_to_point(&Vector2::new(1.4, 0.0), 0).unwrap();
        assert_eq!(closest.index, 1);
        assert_relative_eq!(closest.distance, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_to_point_from_begin_index() {
        let band = band(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let closest = band.find_closest_pose_to_point(&Vector2::new(0.0, 0.0), 2).unwrap();
        assert_eq!(closest.index, 2);
        assert_relative_eq!(closest.distance, 2.0);

        assert!(band.find_closest_pose_to_point(&Vector2::new(0.0, 0.0), 3).is_none());
        assert!(TimedElasticBand::new().find_closest_pose_to_point(&Vector2::zeros(), 0).is_none());
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let band = band(&[(0.0, 1.0), (0.0, -1.0)]);
        let closest = band.find_closest_pose_to_point(&Vector2::zeros(), 0).unwrap();
        assert_eq!(closest.index, 0);
    }

    #[test]
    fn test_closest_to_segment() {
        let band = band(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (6.0, 0.0)]);
        let closest = band
            .find_closest_pose_to_segment(&Vector2::new(3.5, 1.0), &Vector2::new(3.5, 5.0))
            .unwrap();
        assert_eq!(closest.index, 2);
        assert_relative_eq!(closest.distance, (0.25f64 + 1.0).sqrt(), epsilon = 1e-12);

        assert!(TimedElasticBand::new()
            .find_closest_pose_to_segment(&Vector2::zeros(), &Vector2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_closest_to_polygon_uses_closing_edge() {
        // only the closing edge (0,3)-(0,0) passes near pose 1
        let band = band(&[(5.0, 5.0), (-0.5, 1.5), (5.0, -5.0)]);
        let triangle = [Vector2::new(0.0, 0.0), Vector2::new(3.0, 3.0), Vector2::new(0.0, 3.0)];

        let closest = band.find_closest_pose_to_polygon(&triangle).unwrap();
        assert_eq!(closest.index, 1);
        assert_relative_eq!(closest.distance, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_polygons() {
        let band = band(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(band.find_closest_pose_to_polygon(&[]).is_none());

        let single = band.find_closest_pose_to_polygon(&[Vector2::new(2.2, 0.0)]).unwrap();
        assert_eq!(single.index, 2);

        let pair = band
            .find_closest_pose_to_polygon(&[Vector2::new(0.9, 1.0), Vector2::new(0.9, 3.0)])
            .unwrap();
        assert_eq!(pair.index, 1);
        assert_relative_eq!(pair.distance, (0.01f64 + 1.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_closest_to_obstacles() {
        let band = band(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);

        let point = band.find_closest_pose_to_obstacle(&Obstacle::point(2.9, 0.5)).unwrap();
        assert_eq!(point.index, 3);

        let line = band.find_closest_pose_to_obstacle(&Obstacle::line(1.1, 1.0, 1.1, 4.0)).unwrap();
        assert_eq!(line.index, 1);
        assert_relative_eq!(line.distance, (0.01f64 + 1.0).sqrt(), epsilon = 1e-12);

        let square = Obstacle::polygon(&[(1.8, 0.5), (2.2, 0.5), (2.2, 1.5), (1.8, 1.5)]);
        let poly = band.find_closest_pose_to_obstacle(&square).unwrap();
        assert_eq!(poly.index, 2);
        assert_relative_eq!(poly.distance, 0.5, epsilon = 1e-12);

        // circles are reduced to their centroid
        let circle = band.find_closest_pose_to_obstacle(&Obstacle::circle(0.2, 3.0, 1.0)).unwrap();
        assert_eq!(circle.index, 0);
        assert_relative_eq!(circle.distance, (0.04f64 + 9.0).sqrt(), epsilon = 1e-12);
    }
}
