//! Initial trajectories for an empty band
//!
//! Two strategies are provided: a straight line from start to goal sampled
//! at a fixed distance, and a resampling of a waypoint path produced by a
//! global planner. Both pin the start and goal poses and leave everything in
//! between free for the optimizer.

use std::f64::consts::PI;

use crate::common::geometry::normalize_theta;
use crate::common::{BandError, BandResult, PoseSE2, Waypoint};

use super::timed_elastic_band::TimedElasticBand;

/// Time difference used when no velocity bound is available [s]
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Time to move from `start` to `end` at constant velocity.
///
/// The slower of translation at `max_vel_x` and rotation at `max_vel_theta`
/// wins; a bound that is not positive is ignored.
pub fn estimate_delta_t(start: &PoseSE2, end: &PoseSE2, max_vel_x: f64, max_vel_theta: f64) -> f64 {
    let mut dt = DEFAULT_TIME_STEP;
    if max_vel_x > 0.0 {
        dt = (end.position() - start.position()).norm() / max_vel_x;
    }
    if max_vel_theta > 0.0 {
        let rot_dist = normalize_theta(end.theta - start.theta).abs();
        dt = dt.max(rot_dist / max_vel_theta);
    }
    dt
}

/// Coincident poses yield a zero estimate, which is not a valid time diff
fn positive_or_default(dt: f64) -> f64 {
    if dt > 0.0 {
        dt
    } else {
        DEFAULT_TIME_STEP
    }
}

/// True when `goal` lies behind `start` with respect to its heading
fn is_goal_behind(start: &PoseSE2, goal: &PoseSE2) -> bool {
    (goal.position() - start.position()).dot(&start.orientation_unit_vec()) < 0.0
}

impl TimedElasticBand {
    /// Initialize the band on the straight line from `start` to `goal`.
    ///
    /// Intermediate poses are placed every `dist_step` along the line (none
    /// when `dist_step` is zero), all headed toward the goal, or away from
    /// it if `guess_backwards_motion` is set and the goal lies behind the
    /// start. Each step takes `dist_step / max_vel_x`. Start and goal are
    /// fixed.
    ///
    /// Fails with [`BandError::AlreadyInitialized`] on a non-empty band,
    /// which is then left untouched.
    pub fn init_trajectory_to_goal(
        &mut self,
        start: &PoseSE2,
        goal: &PoseSE2,
        dist_step: f64,
        max_vel_x: f64,
        min_samples: usize,
        guess_backwards_motion: bool,
    ) -> BandResult<()> {
        self.ensure_uninitialized()?;

        self.add_pose(*start, true);

        if dist_step != 0.0 {
            let point_to_goal = goal.position() - start.position();
            let dir_to_goal = point_to_goal[1].atan2(point_to_goal[0]);
            let step = dist_step.abs();
            let dx = step * dir_to_goal.cos();
            let dy = step * dir_to_goal.sin();

            let mut orient_init = dir_to_goal;
            if guess_backwards_motion && is_goal_behind(start, goal) {
                orient_init = normalize_theta(orient_init + PI);
            }

            let steps_exact = point_to_goal.norm() / step;
            let steps = steps_exact.floor() as usize;

            let timestep = if max_vel_x > 0.0 { step / max_vel_x } else { DEFAULT_TIME_STEP };

            for i in 1..=steps {
                // the last step would coincide with the goal
                if i == steps && steps_exact == steps as f64 {
                    break;
                }
                let pose = PoseSE2::new(start.x + i as f64 * dx, start.y + i as f64 * dy, orient_init);
                self.add_pose_and_time_diff(pose, timestep)?;
            }
        }

        self.densify_towards(goal, min_samples, |from, to| {
            if max_vel_x > 0.0 {
                (to.position() - from.position()).norm() / max_vel_x
            } else {
                DEFAULT_TIME_STEP
            }
        })?;

        let timestep = if max_vel_x > 0.0 {
            (goal.position() - self.back_pose().position()).norm() / max_vel_x
        } else {
            DEFAULT_TIME_STEP
        };
        self.add_pose_and_time_diff(*goal, positive_or_default(timestep))?;
        self.set_pose_fixed(self.size_poses() - 1, true);

        Ok(())
    }

    /// Initialize the band from a waypoint path.
    ///
    /// The first and last waypoints become the fixed start and goal. Interior
    /// headings come from the waypoints, or with `estimate_orient` from the
    /// direction to the next waypoint (reversed when backwards motion is
    /// guessed). Time differences follow [`estimate_delta_t`].
    ///
    /// Fails with [`BandError::AlreadyInitialized`] on a non-empty band and
    /// with [`BandError::InvalidParameter`] for fewer than two waypoints.
    pub fn init_trajectory_from_path(
        &mut self,
        plan: &[Waypoint],
        max_vel_x: f64,
        max_vel_theta: f64,
        estimate_orient: bool,
        min_samples: usize,
        guess_backwards_motion: bool,
    ) -> BandResult<()> {
        self.ensure_uninitialized()?;

        let (first, last) = match (plan.first(), plan.last()) {
            (Some(first), Some(last)) if plan.len() >= 2 => (first, last),
            _ => {
                return Err(BandError::InvalidParameter(format!(
                    "a path needs at least 2 waypoints, got {}",
                    plan.len()
                )))
            }
        };
        let start = first.pose();
        let goal = last.pose();

        self.add_pose(start, true);

        let backwards = guess_backwards_motion && is_goal_behind(&start, &goal);

        for (current, next) in plan.iter().zip(plan.iter().skip(1)).skip(1) {
            let theta = if estimate_orient {
                let dx = next.position.x - current.position.x;
                let dy = next.position.y - current.position.y;
                let yaw = dy.atan2(dx);
                if backwards {
                    normalize_theta(yaw + PI)
                } else {
                    yaw
                }
            } else {
                current.theta
            };

            let intermediate = PoseSE2::new(current.position.x, current.position.y, theta);
            let dt = estimate_delta_t(self.back_pose(), &intermediate, max_vel_x, max_vel_theta);
            self.add_pose_and_time_diff(intermediate, positive_or_default(dt))?;
        }

        self.densify_towards(&goal, min_samples, |from, to| {
            estimate_delta_t(from, to, max_vel_x, max_vel_theta)
        })?;

        let dt = estimate_delta_t(self.back_pose(), &goal, max_vel_x, max_vel_theta);
        self.add_pose_and_time_diff(goal, positive_or_default(dt))?;
        self.set_pose_fixed(self.size_poses() - 1, true);

        Ok(())
    }

    fn ensure_uninitialized(&self) -> BandResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        log::warn!(
            "cannot init the band between start and goal: it already holds {} poses and {} time diffs; \
             call this before adding states yourself",
            self.size_poses(),
            self.size_time_diffs()
        );
        Err(BandError::AlreadyInitialized {
            poses: self.size_poses(),
            time_diffs: self.size_time_diffs(),
        })
    }

    /// Append poses halfway between the last pose and `goal` until the band
    /// holds `min_samples - 1` poses (the goal still follows).
    ///
    /// Poses bunch up near the goal until the optimizer spreads them out.
    fn densify_towards<F>(&mut self, goal: &PoseSE2, min_samples: usize, time_diff: F) -> BandResult<()>
    where
        F: Fn(&PoseSE2, &PoseSE2) -> f64,
    {
        let target = min_samples.saturating_sub(1);
        if self.size_poses() >= target {
            return Ok(());
        }

        log::debug!(
            "initial trajectory has {} poses, fewer than min_samples {}; inserting more",
            self.size_poses(),
            min_samples
        );

        while self.size_poses() < target {
            let back = *self.back_pose();
            let intermediate = PoseSE2::average(&back, goal);
            let dt = time_diff(&back, &intermediate);
            self.add_pose_and_time_diff(intermediate, positive_or_default(dt))?;
        }
        Ok(())
    }
}
