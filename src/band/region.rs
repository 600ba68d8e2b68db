//! Containment check of the band around the robot

use super::timed_elastic_band::TimedElasticBand;

impl TimedElasticBand {
    /// Check that the trajectory stays within `radius` of the robot.
    ///
    /// Pose 0 is taken as the robot pose. Every `skip_poses + 1`-th pose from
    /// index 1 is checked. With `max_dist_behind_robot >= 0`, poses behind the
    /// robot (with respect to its heading) must additionally stay within that
    /// distance. An empty band is inside.
    pub fn is_trajectory_inside_region(&self, radius: f64, max_dist_behind_robot: f64, skip_poses: usize) -> bool {
        let Some(robot) = self.poses.first().map(|v| v.pose) else {
            return true;
        };

        let radius_sq = radius * radius;
        let max_dist_behind_robot_sq = max_dist_behind_robot * max_dist_behind_robot;
        let robot_orient = robot.orientation_unit_vec();

        for (i, vertex) in self.poses.iter().enumerate().skip(1).step_by(skip_poses + 1) {
            let dist_vec = vertex.pose.position() - robot.position();
            let dist_sq = dist_vec.norm_squared();

            if dist_sq > radius_sq {
                log::debug!("pose {} is outside the region around the robot", i);
                return false;
            }

            if max_dist_behind_robot >= 0.0
                && dist_vec.dot(&robot_orient) < 0.0
                && dist_sq > max_dist_behind_robot_sq
            {
                log::debug!("pose {} is too far behind the robot", i);
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(points: &[(f64, f64)]) -> TimedElasticBand {
        let mut band = TimedElasticBand::new();
        band.add_pose_xy(points[0].0, points[0].1, 0.0, true);
        for &(x, y) in &points[1..] {
            band.add_pose_and_time_diff_xy(x, y, 0.0, 0.5).unwrap();
        }
        band
    }

    #[test]
    fn test_radius() {
        let band = band(&[(0.0, 0.0), (0.0, 6.0)]);
        assert!(!band.is_trajectory_inside_region(5.0, -1.0, 0));
        assert!(band.is_trajectory_inside_region(7.0, -1.0, 0));
    }

    #[test]
    fn test_empty_band_is_inside() {
        assert!(TimedElasticBand::new().is_trajectory_inside_region(0.0, 0.0, 0));
    }

    #[test]
    fn test_behind_robot() {
        let band = band(&[(0.0, 0.0), (-2.0, 0.0), (3.0, 0.0)]);
        assert!(band.is_trajectory_inside_region(5.0, -1.0, 0));
        assert!(!band.is_trajectory_inside_region(5.0, 1.0, 0));
        assert!(band.is_trajectory_inside_region(5.0, 2.5, 0));
    }

    #[test]
    fn test_ahead_of_robot_only_bounded_by_radius() {
        let band = band(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
        assert!(band.is_trajectory_inside_region(5.0, 0.5, 0));
    }

    #[test]
    fn test_skip_poses() {
        let band = band(&[(0.0, 0.0), (1.0, 0.0), (9.0, 0.0), (2.0, 0.0)]);
        assert!(!band.is_trajectory_inside_region(5.0, -1.0, 0));
        // checks poses 1 and 3 only
        assert!(band.is_trajectory_inside_region(5.0, -1.0, 1));
    }
}
