//! Adaptive resampling of the band's time discretization
//!
//! Obstacles stretch the band and a shrinking distance to the goal shrinks
//! every time difference. Both leave the discretization far from the
//! reference resolution: too coarse to follow the optimum, or so fine that
//! the optimizer divides by tiny time differences. [`TimedElasticBand::auto_resize`]
//! inserts or removes (pose, time diff) pairs locally so the optimizer can
//! warm-start from the resized band.

use crate::common::PoseSE2;

use super::timed_elastic_band::TimedElasticBand;

/// Upper bound on resize passes, guards against oscillation
pub const MAX_RESIZE_PASSES: usize = 100;

/// Outcome of a resize call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeReport {
    /// Passes over the band that were executed
    pub passes: usize,
    /// Pose/time-diff pairs inserted by splitting
    pub inserted: usize,
    /// Pose/time-diff pairs removed by merging
    pub removed: usize,
}

impl ResizeReport {
    pub fn modified(&self) -> bool {
        self.inserted > 0 || self.removed > 0
    }
}

impl TimedElasticBand {
    /// Resize the band toward time differences in `dt_ref ± dt_hysteresis`.
    ///
    /// Each time difference that is too long is split (when it exceeds
    /// `2 * dt_ref`) or clamped to `dt_ref` with the excess pushed onto the
    /// next one; a time difference that is too short is merged into its
    /// neighbour. Splits only happen while the band has fewer than
    /// `max_samples` time differences, merges only while it has more than
    /// `min_samples`.
    ///
    /// Passes repeat until nothing was split or merged, at most
    /// [`MAX_RESIZE_PASSES`] times; `fast_mode` stops after the first pass.
    ///
    /// # Panics
    /// If the band violates the count invariant.
    pub fn auto_resize(
        &mut self,
        dt_ref: f64,
        dt_hysteresis: f64,
        min_samples: usize,
        max_samples: usize,
        fast_mode: bool,
    ) -> ResizeReport {
        assert!(self.is_consistent(), "auto_resize: inconsistent band");

        let mut report = ResizeReport::default();
        let mut modified = true;

        while modified && report.passes < MAX_RESIZE_PASSES {
            modified = false;
            report.passes += 1;

            // time diff i connects pose i with pose i + 1
            let mut i = 0;
            while i < self.time_diffs.len() {
                let dt = self.time_diffs[i].dt;
                let n = self.time_diffs.len();

                if dt > dt_ref + dt_hysteresis && n < max_samples {
                    if dt > 2.0 * dt_ref {
                        let half = 0.5 * dt;
                        self.time_diffs[i].dt = half;
                        let mid = PoseSE2::average(&self.poses[i].pose, &self.poses[i + 1].pose);
                        self.insert_pose(i + 1, mid);
                        self.insert_time_diff(i + 1, half);

                        report.inserted += 1;
                        modified = true;
                        // the halved interval may still be too long
                        continue;
                    }

                    if i + 1 < n {
                        self.time_diffs[i + 1].dt += dt - dt_ref;
                    }
                    self.time_diffs[i].dt = dt_ref;
                } else if dt < dt_ref - dt_hysteresis && n > min_samples {
                    if i + 1 < n {
                        self.time_diffs[i + 1].dt += dt;
                        self.delete_time_diff(i);
                        self.delete_pose(i + 1);

                        report.removed += 1;
                        modified = true;
                        continue;
                    }

                    if i > 0 {
                        // last interval: shift its time to the one before
                        self.time_diffs[i - 1].dt += dt;
                        self.delete_time_diff(i);
                        self.delete_pose(i);

                        report.removed += 1;
                        modified = true;
                    }
                }

                i += 1;
            }

            if fast_mode {
                break;
            }
        }

        log::debug!(
            "auto_resize: {} pass(es), {} inserted, {} removed, {} poses",
            report.passes,
            report.inserted,
            report.removed,
            self.poses.len()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn band_with_time_diffs(dts: &[f64]) -> TimedElasticBand {
        let mut band = TimedElasticBand::new();
        band.add_pose_xy(0.0, 0.0, 0.0, true);
        for (i, &dt) in dts.iter().enumerate() {
            band.add_pose_and_time_diff_xy((i + 1) as f64, 0.0, 0.0, dt).unwrap();
        }
        band.set_pose_fixed(dts.len(), true);
        band
    }

    fn time_diffs(band: &TimedElasticBand) -> Vec<f64> {
        band.time_diffs().iter().map(|t| t.dt).collect()
    }

    #[test]
    fn test_balanced_band_is_untouched() {
        let mut band = band_with_time_diffs(&[0.3, 0.35, 0.25]);
        let report = band.auto_resize(0.3, 0.1, 3, 500, false);
        assert_eq!(report, ResizeReport { passes: 1, inserted: 0, removed: 0 });
        assert_eq!(time_diffs(&band), vec![0.3, 0.35, 0.25]);
    }

    #[test]
    fn test_split_conserves_duration() {
        let mut band = band_with_time_diffs(&[1.0]);
        let report = band.auto_resize(0.3, 0.1, 1, 500, true);

        assert_eq!(report.inserted, 2);
        assert!(band.is_consistent());
        assert_relative_eq!(band.sum_of_all_time_diffs(), 1.0, epsilon = 1e-12);
        for dt in time_diffs(&band) {
            assert!(dt <= 0.6 + 1e-12);
        }
    }

    #[test]
    fn test_split_inserts_average_pose() {
        let mut band = TimedElasticBand::new();
        band.add_pose_xy(0.0, 0.0, 0.0, true);
        band.add_pose_and_time_diff_xy(2.0, 2.0, 0.5, 0.8).unwrap();

        band.auto_resize(0.3, 0.1, 1, 2, true);

        assert_eq!(band.size_poses(), 3);
        assert_eq!(time_diffs(&band), vec![0.4, 0.4]);
        let mid = band.pose(1);
        assert_relative_eq!(mid.x, 1.0);
        assert_relative_eq!(mid.y, 1.0);
        assert_relative_eq!(mid.theta, 0.25);
        assert!(!band.is_pose_fixed(1));
    }

    #[test]
    fn test_clamp_pushes_excess_forward() {
        let mut band = band_with_time_diffs(&[0.45, 0.2]);
        let report = band.auto_resize(0.3, 0.1, 1, 500, true);
        assert!(!report.modified());
        let dts = time_diffs(&band);
        assert_relative_eq!(dts[0], 0.3);
        assert_relative_eq!(dts[1], 0.35, epsilon = 1e-12);
        assert_relative_eq!(band.sum_of_all_time_diffs(), 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_discards_excess_at_tail() {
        let mut band = band_with_time_diffs(&[0.3, 0.5]);
        band.auto_resize(0.3, 0.1, 1, 500, true);
        assert_eq!(time_diffs(&band), vec![0.3, 0.3]);
        assert_relative_eq!(band.sum_of_all_time_diffs(), 0.6);
    }

    #[test]
    fn test_merge_forward() {
        let mut band = band_with_time_diffs(&[0.1, 0.25, 0.3]);
        let report = band.auto_resize(0.3, 0.1, 1, 500, false);
        assert_eq!(report.removed, 1);
        assert_eq!(band.size_poses(), 3);
        let dts = time_diffs(&band);
        assert_relative_eq!(dts[0], 0.35, epsilon = 1e-12);
        assert_relative_eq!(dts[1], 0.3);
        // pose 1 (x = 1) was removed
        assert_eq!(band.pose(1).x, 2.0);
        assert!(band.is_pose_fixed(0));
        assert!(band.is_pose_fixed(2));
    }

    #[test]
    fn test_merge_backward_at_tail() {
        let mut band = band_with_time_diffs(&[0.3, 0.3, 0.1]);
        band.auto_resize(0.3, 0.1, 1, 500, true);
        assert_eq!(band.size_time_diffs(), 2);
        let dts = time_diffs(&band);
        assert_relative_eq!(dts[1], 0.4, epsilon = 1e-12);
        // pose 2 (x = 2) was removed, the goal stays last
        assert_eq!(band.pose(2).x, 3.0);
        assert!(band.is_pose_fixed(2));
    }

    #[test]
    fn test_respects_min_samples() {
        let mut band = band_with_time_diffs(&[0.05, 0.05, 0.05, 0.05]);
        band.auto_resize(0.3, 0.1, 3, 500, false);
        assert_eq!(band.size_time_diffs(), 3);
        assert!(band.is_consistent());
    }

    #[test]
    fn test_respects_max_samples() {
        let mut band = band_with_time_diffs(&[10.0]);
        band.auto_resize(0.3, 0.1, 1, 4, false);
        assert_eq!(band.size_time_diffs(), 4);
        assert_relative_eq!(band.sum_of_all_time_diffs(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fast_mode_runs_single_pass() {
        let mut band = band_with_time_diffs(&[0.05, 0.05, 0.05, 0.05, 0.05, 0.05]);
        let report = band.auto_resize(0.3, 0.1, 1, 500, true);
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn test_random_bands_converge() {
        let mut rng = StdRng::seed_from_u64(7);
        let (dt_ref, hyst, min_samples, max_samples) = (0.3, 0.1, 3, 200);

        for _ in 0..50 {
            let n = rng.gen_range(1..30);
            let dts: Vec<f64> = (0..n).map(|_| rng.gen_range(0.01..2.0)).collect();
            let mut band = band_with_time_diffs(&dts);

            let report = band.auto_resize(dt_ref, hyst, min_samples, max_samples, false);

            assert!(report.passes <= MAX_RESIZE_PASSES);
            assert!(band.is_consistent());
            assert!(band.is_pose_fixed(0));
            assert!(band.is_pose_fixed(band.size_poses() - 1));

            let count = band.size_time_diffs();
            let at_bound = count <= min_samples || count >= max_samples;
            for dt in time_diffs(&band) {
                assert!(dt > 0.0);
                let inside = dt >= dt_ref - hyst - 1e-9 && dt <= dt_ref + hyst + 1e-9;
                assert!(inside || at_bound, "dt {} with {} samples", dt, count);
            }
        }
    }
}
