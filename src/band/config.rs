//! Trajectory parameters for the band algorithms

use crate::common::{BandError, BandResult, PoseSE2, Waypoint};

use super::resize::ResizeReport;
use super::timed_elastic_band::TimedElasticBand;

/// Configuration of the band's discretization, initialization and region check
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryConfig {
    /// Reference time resolution [s]
    pub dt_ref: f64,
    /// Hysteresis around `dt_ref` [s]
    pub dt_hysteresis: f64,
    /// Minimum number of samples
    pub min_samples: usize,
    /// Maximum number of samples
    pub max_samples: usize,
    /// Single resize pass per call
    pub fast_mode: bool,
    /// Distance between poses of a straight-line initialization [m]
    pub dist_step: f64,
    /// Maximum forward velocity [m/s]
    pub max_vel_x: f64,
    /// Maximum angular velocity [rad/s]
    pub max_vel_theta: f64,
    /// Derive headings of a waypoint path from its geometry
    pub estimate_orientation: bool,
    /// Drive backwards if the goal lies behind the start
    pub guess_backwards_motion: bool,
    /// Radius of the region around the robot the band has to stay in [m]
    pub region_radius: f64,
    /// Allowed distance behind the robot, negative to disable [m]
    pub max_dist_behind_robot: f64,
    /// Poses skipped between two checked poses in the region check
    pub skip_poses: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            dt_ref: 0.3,
            dt_hysteresis: 0.1,
            min_samples: 3,
            max_samples: 500,
            fast_mode: false,
            dist_step: 0.3,
            max_vel_x: 0.4,
            max_vel_theta: 0.3,
            estimate_orientation: true,
            guess_backwards_motion: true,
            region_radius: f64::INFINITY,
            max_dist_behind_robot: -1.0,
            skip_poses: 0,
        }
    }
}

impl TrajectoryConfig {
    pub fn validate(&self) -> BandResult<()> {
        if !(self.dt_ref > 0.0) {
            return Err(BandError::InvalidParameter(format!("dt_ref must be positive, got {}", self.dt_ref)));
        }
        if !(self.dt_hysteresis >= 0.0) {
            return Err(BandError::InvalidParameter(format!(
                "dt_hysteresis must not be negative, got {}",
                self.dt_hysteresis
            )));
        }
        if self.min_samples > self.max_samples {
            return Err(BandError::InvalidParameter(format!(
                "min_samples ({}) exceeds max_samples ({})",
                self.min_samples, self.max_samples
            )));
        }
        if self.region_radius < 0.0 {
            return Err(BandError::InvalidParameter(format!(
                "region_radius must not be negative, got {}",
                self.region_radius
            )));
        }
        Ok(())
    }
}

impl TimedElasticBand {
    /// [`TimedElasticBand::auto_resize`] with the parameters of `config`
    pub fn auto_resize_with(&mut self, config: &TrajectoryConfig) -> ResizeReport {
        self.auto_resize(
            config.dt_ref,
            config.dt_hysteresis,
            config.min_samples,
            config.max_samples,
            config.fast_mode,
        )
    }

    /// [`TimedElasticBand::init_trajectory_to_goal`] with the parameters of `config`
    pub fn init_trajectory_to_goal_with(
        &mut self,
        start: &PoseSE2,
        goal: &PoseSE2,
        config: &TrajectoryConfig,
    ) -> BandResult<()> {
        config.validate()?;
        self.init_trajectory_to_goal(
            start,
            goal,
            config.dist_step,
            config.max_vel_x,
            config.min_samples,
            config.guess_backwards_motion,
        )
    }

    /// [`TimedElasticBand::init_trajectory_from_path`] with the parameters of `config`
    pub fn init_trajectory_from_path_with(&mut self, plan: &[Waypoint], config: &TrajectoryConfig) -> BandResult<()> {
        config.validate()?;
        self.init_trajectory_from_path(
            plan,
            config.max_vel_x,
            config.max_vel_theta,
            config.estimate_orientation,
            config.min_samples,
            config.guess_backwards_motion,
        )
    }

    /// [`TimedElasticBand::update_and_prune`] with the parameters of `config`
    pub fn update_and_prune_with(
        &mut self,
        new_start: Option<&PoseSE2>,
        new_goal: Option<&PoseSE2>,
        config: &TrajectoryConfig,
    ) -> usize {
        self.update_and_prune(new_start, new_goal, config.min_samples)
    }

    /// [`TimedElasticBand::is_trajectory_inside_region`] with the parameters of `config`
    pub fn is_trajectory_inside_region_with(&self, config: &TrajectoryConfig) -> bool {
        self.is_trajectory_inside_region(config.region_radius, config.max_dist_behind_robot, config.skip_poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrajectoryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let config = TrajectoryConfig { dt_ref: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(BandError::InvalidParameter(_))));

        let config = TrajectoryConfig { dt_hysteresis: -0.1, ..Default::default() };
        assert!(config.validate().is_err());

        let config = TrajectoryConfig { min_samples: 10, max_samples: 5, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_config_leaves_band_empty() {
        let mut band = TimedElasticBand::new();
        let config = TrajectoryConfig { dt_ref: -1.0, ..Default::default() };
        let goal = PoseSE2::new(1.0, 0.0, 0.0);
        assert!(band.init_trajectory_to_goal_with(&PoseSE2::origin(), &goal, &config).is_err());
        assert!(band.is_empty());
    }

    #[test]
    fn test_planning_cycle_with_config() {
        let config = TrajectoryConfig::default();
        let mut band = TimedElasticBand::new();
        let goal = PoseSE2::new(3.0, 0.0, 0.0);

        band.init_trajectory_to_goal_with(&PoseSE2::origin(), &goal, &config).unwrap();
        // 0.3 m steps at 0.4 m/s give 0.75 s, which gets split
        let report = band.auto_resize_with(&config);
        assert!(report.inserted > 0);
        assert!(band.is_consistent());
        for t in band.time_diffs() {
            assert!(t.dt <= config.dt_ref + config.dt_hysteresis + 1e-9);
        }

        band.update_and_prune_with(Some(&PoseSE2::new(0.2, 0.0, 0.0)), None, &config);
        assert!(band.is_consistent());
        assert!(band.is_trajectory_inside_region_with(&config));
    }
}
