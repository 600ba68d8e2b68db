//! Receding-horizon update of the band

use crate::common::PoseSE2;

use super::timed_elastic_band::TimedElasticBand;

/// Maximum number of poses searched ahead of the start for the robot pose
pub const MAX_PRUNE_LOOKAHEAD: usize = 10;

impl TimedElasticBand {
    /// Move the band's start to `new_start` and its end to `new_goal`.
    ///
    /// Poses already passed by the robot are pruned: starting at pose 1 the
    /// band is walked ahead while the distance to `new_start` keeps
    /// decreasing, for at most `min(size_poses - min_samples, 10)` poses and
    /// never onto the goal. Poses 1 up to the closest one are removed together
    /// with as many time diffs, then pose 0 is overwritten with `new_start`.
    /// The last pose is overwritten with `new_goal`.
    ///
    /// Pose 0 and the last pose keep their fixed flag: fixing protects poses
    /// against being moved by resizing or pruning, not against this overwrite.
    /// Returns the number of removed poses.
    pub fn update_and_prune(
        &mut self,
        new_start: Option<&PoseSE2>,
        new_goal: Option<&PoseSE2>,
        min_samples: usize,
    ) -> usize {
        let mut pruned = 0;

        if let Some(new_start) = new_start {
            if !self.poses.is_empty() {
                let target = new_start.position();
                let mut dist_cache = (target - self.pose(0).position()).norm();
                // the goal is never pruned, hence at least two poses remain
                let lookahead = self
                    .poses
                    .len()
                    .saturating_sub(min_samples.max(2))
                    .min(MAX_PRUNE_LOOKAHEAD);

                let mut nearest_idx = 0;
                for i in 1..=lookahead {
                    let dist = (target - self.pose(i).position()).norm();
                    if dist < dist_cache {
                        dist_cache = dist;
                        nearest_idx = i;
                    } else {
                        break;
                    }
                }

                if nearest_idx > 0 {
                    // pose 0 stays and is overwritten below, so the closest
                    // pose is dropped along with the ones before it
                    self.delete_poses(1, nearest_idx);
                    if !self.time_diffs.is_empty() {
                        self.delete_time_diffs(1, nearest_idx);
                    }
                    pruned = nearest_idx;
                }

                *self.pose_mut(0) = *new_start;
            }
        }

        if let Some(new_goal) = new_goal {
            if !self.poses.is_empty() {
                *self.back_pose_mut() = *new_goal;
            }
        }

        if pruned > 0 {
            log::debug!("update_and_prune: removed {} pose(s), {} left", pruned, self.poses.len());
        }

        pruned
    }
}
