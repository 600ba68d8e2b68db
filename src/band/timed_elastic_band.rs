//! Storage and structural operations of the timed elastic band
//!
//! The band keeps two sequences: poses `s_0 .. s_{n-1}` and time differences
//! `dt_0 .. dt_{n-2}`, where `dt_i` is the time needed to move from `s_i` to
//! `s_{i+1}`. Apart from the empty band and the seeded band (a single pose,
//! no time differences), the number of time differences is always the number
//! of poses minus one once an operation that works on pose/time-diff pairs
//! returns.
//!
//! Index arguments are preconditions: an out-of-range index panics.

use itertools::Itertools;

use crate::common::{BandError, BandResult, Path2D, PoseSE2};

use super::vertex::{PoseVertex, TimeDiffVertex};

/// Discretized trajectory of alternating poses and time differences
#[derive(Debug, Clone, Default)]
pub struct TimedElasticBand {
    pub(super) poses: Vec<PoseVertex>,
    pub(super) time_diffs: Vec<TimeDiffVertex>,
}

impl TimedElasticBand {
    pub fn new() -> Self {
        Self { poses: Vec::new(), time_diffs: Vec::new() }
    }

    // ========================================================================
    // Append
    // ========================================================================

    /// Append a pose at the back.
    ///
    /// Does not append a time difference; the caller keeps the band consistent.
    pub fn add_pose(&mut self, pose: PoseSE2, fixed: bool) {
        self.poses.push(PoseVertex::new(pose, fixed));
    }

    pub fn add_pose_xy(&mut self, x: f64, y: f64, theta: f64, fixed: bool) {
        self.add_pose(PoseSE2::new(x, y, theta), fixed);
    }

    /// Append a time difference at the back.
    ///
    /// # Panics
    /// If `dt` is not strictly positive.
    pub fn add_time_diff(&mut self, dt: f64, fixed: bool) {
        self.time_diffs.push(TimeDiffVertex::new(dt, fixed));
    }

    /// Append a free (time difference, pose) pair.
    ///
    /// `dt` is the time from the current last pose to `pose`, so the band must
    /// already hold one more pose than time differences. Otherwise nothing is
    /// appended and [`BandError::InvalidStructure`] is returned.
    pub fn add_pose_and_time_diff(&mut self, pose: PoseSE2, dt: f64) -> BandResult<()> {
        if self.poses.len() == self.time_diffs.len() {
            log::error!(
                "add_pose_and_time_diff: add a single pose first; a time diff connects the last pose with the new one"
            );
            return Err(BandError::InvalidStructure(format!(
                "cannot append a pose/time-diff pair to a band with {} poses and {} time diffs",
                self.poses.len(),
                self.time_diffs.len()
            )));
        }
        self.add_pose(pose, false);
        self.add_time_diff(dt, false);
        Ok(())
    }

    pub fn add_pose_and_time_diff_xy(&mut self, x: f64, y: f64, theta: f64, dt: f64) -> BandResult<()> {
        self.add_pose_and_time_diff(PoseSE2::new(x, y, theta), dt)
    }

    // ========================================================================
    // Insert / delete
    // ========================================================================

    /// Insert a free pose before `index` (`index == size_poses()` appends)
    pub fn insert_pose(&mut self, index: usize, pose: PoseSE2) {
        assert!(
            index <= self.poses.len(),
            "insert_pose: index {} out of range (len {})",
            index,
            self.poses.len()
        );
        self.poses.insert(index, PoseVertex::free(pose));
    }

    /// Insert a free time difference before `index`
    pub fn insert_time_diff(&mut self, index: usize, dt: f64) {
        assert!(
            index <= self.time_diffs.len(),
            "insert_time_diff: index {} out of range (len {})",
            index,
            self.time_diffs.len()
        );
        self.time_diffs.insert(index, TimeDiffVertex::free(dt));
    }

    pub fn delete_pose(&mut self, index: usize) {
        assert!(
            index < self.poses.len(),
            "delete_pose: index {} out of range (len {})",
            index,
            self.poses.len()
        );
        self.poses.remove(index);
    }

    /// Delete `number` consecutive poses starting at `index`
    pub fn delete_poses(&mut self, index: usize, number: usize) {
        assert!(
            index + number <= self.poses.len(),
            "delete_poses: range {}..{} out of range (len {})",
            index,
            index + number,
            self.poses.len()
        );
        self.poses.drain(index..index + number);
    }

    pub fn delete_time_diff(&mut self, index: usize) {
        assert!(
            index < self.time_diffs.len(),
            "delete_time_diff: index {} out of range (len {})",
            index,
            self.time_diffs.len()
        );
        self.time_diffs.remove(index);
    }

    /// Delete `number` consecutive time differences starting at `index`
    pub fn delete_time_diffs(&mut self, index: usize, number: usize) {
        assert!(
            index + number <= self.time_diffs.len(),
            "delete_time_diffs: range {}..{} out of range (len {})",
            index,
            index + number,
            self.time_diffs.len()
        );
        self.time_diffs.drain(index..index + number);
    }

    /// Remove all poses and time differences
    pub fn clear(&mut self) {
        self.poses.clear();
        self.time_diffs.clear();
    }

    // ========================================================================
    // Fixed flags
    // ========================================================================

    pub fn set_pose_fixed(&mut self, index: usize, fixed: bool) {
        assert!(
            index < self.poses.len(),
            "set_pose_fixed: index {} out of range (len {})",
            index,
            self.poses.len()
        );
        self.poses[index].fixed = fixed;
    }

    pub fn set_time_diff_fixed(&mut self, index: usize, fixed: bool) {
        assert!(
            index < self.time_diffs.len(),
            "set_time_diff_fixed: index {} out of range (len {})",
            index,
            self.time_diffs.len()
        );
        self.time_diffs[index].fixed = fixed;
    }

    pub fn is_pose_fixed(&self, index: usize) -> bool {
        self.poses[index].fixed
    }

    pub fn is_time_diff_fixed(&self, index: usize) -> bool {
        self.time_diffs[index].fixed
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn pose(&self, index: usize) -> &PoseSE2 {
        &self.poses[index].pose
    }

    pub fn pose_mut(&mut self, index: usize) -> &mut PoseSE2 {
        &mut self.poses[index].pose
    }

    /// # Panics
    /// On an empty band.
    pub fn back_pose(&self) -> &PoseSE2 {
        &self.poses.last().expect("back_pose on an empty band").pose
    }

    pub fn back_pose_mut(&mut self) -> &mut PoseSE2 {
        &mut self.poses.last_mut().expect("back_pose_mut on an empty band").pose
    }

    pub fn time_diff(&self, index: usize) -> f64 {
        self.time_diffs[index].dt
    }

    pub fn time_diff_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.time_diffs[index].dt
    }

    pub fn back_time_diff(&self) -> f64 {
        self.time_diffs.last().expect("back_time_diff without time diffs").dt
    }

    pub fn poses(&self) -> &[PoseVertex] {
        &self.poses
    }

    pub fn time_diffs(&self) -> &[TimeDiffVertex] {
        &self.time_diffs
    }

    pub fn size_poses(&self) -> usize {
        self.poses.len()
    }

    pub fn size_time_diffs(&self) -> usize {
        self.time_diffs.len()
    }

    /// True once the band holds at least one pose/time-diff pair
    pub fn is_init(&self) -> bool {
        !self.poses.is_empty() && !self.time_diffs.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty() && self.time_diffs.is_empty()
    }

    /// Count invariant: no time diffs, or exactly one less than poses
    pub fn is_consistent(&self) -> bool {
        self.time_diffs.is_empty() || self.time_diffs.len() + 1 == self.poses.len()
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Total duration of the trajectory
    pub fn sum_of_all_time_diffs(&self) -> f64 {
        self.time_diffs.iter().map(|t| t.dt).sum()
    }

    /// Time to reach pose `index`, i.e. the sum of time diffs `[0, index)`
    pub fn sum_of_time_diffs_up_to_idx(&self, index: usize) -> f64 {
        assert!(
            index <= self.time_diffs.len(),
            "sum_of_time_diffs_up_to_idx: index {} out of range (len {})",
            index,
            self.time_diffs.len()
        );
        self.time_diffs[..index].iter().map(|t| t.dt).sum()
    }

    /// Length of the polyline through all pose positions
    pub fn accumulated_distance(&self) -> f64 {
        self.poses
            .iter()
            .tuple_windows::<(_, _)>()
            .map(|(a, b)| (b.pose.position() - a.pose.position()).norm())
            .sum()
    }

    /// Pose positions as a path
    pub fn to_path(&self) -> Path2D {
        Path2D::from_points(self.poses.iter().map(|v| v.pose.point()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_band(n: usize, dt: f64) -> TimedElasticBand {
        let mut band = TimedElasticBand::new();
        band.add_pose_xy(0.0, 0.0, 0.0, true);
        for i in 1..n {
            band.add_pose_and_time_diff_xy(i as f64, 0.0, 0.0, dt).unwrap();
        }
        band
    }

    #[test]
    fn test_new_band_is_empty() {
        let band = TimedElasticBand::new();
        assert!(band.is_empty());
        assert!(!band.is_init());
        assert!(band.is_consistent());
        assert_eq!(band.sum_of_all_time_diffs(), 0.0);
        assert_eq!(band.accumulated_distance(), 0.0);
    }

    #[test]
    fn test_seeded_band_is_consistent() {
        let mut band = TimedElasticBand::new();
        band.add_pose(PoseSE2::origin(), true);
        assert!(band.is_consistent());
        assert!(!band.is_init());
    }

    #[test]
    fn test_add_pose_and_time_diff_requires_seed() {
        let mut band = TimedElasticBand::new();
        let result = band.add_pose_and_time_diff_xy(1.0, 0.0, 0.0, 0.5);
        assert!(matches!(result, Err(BandError::InvalidStructure(_))));
        assert!(band.is_empty());

        band.add_pose_xy(0.0, 0.0, 0.0, false);
        band.add_pose_and_time_diff_xy(1.0, 0.0, 0.0, 0.5).unwrap();
        assert_eq!(band.size_poses(), 2);
        assert_eq!(band.size_time_diffs(), 1);
        assert!(!band.is_pose_fixed(1));
        assert!(!band.is_time_diff_fixed(0));
    }

    #[test]
    fn test_sums_and_distance() {
        let band = straight_band(5, 0.5);
        assert_relative_eq!(band.sum_of_all_time_diffs(), 2.0);
        assert_relative_eq!(band.sum_of_time_diffs_up_to_idx(0), 0.0);
        assert_relative_eq!(band.sum_of_time_diffs_up_to_idx(3), 1.5);
        assert_relative_eq!(band.sum_of_time_diffs_up_to_idx(4), 2.0);
        assert_relative_eq!(band.accumulated_distance(), 4.0);
    }

    #[test]
    #[should_panic(expected = "sum_of_time_diffs_up_to_idx")]
    fn test_sum_up_to_idx_out_of_range() {
        straight_band(3, 1.0).sum_of_time_diffs_up_to_idx(3);
    }

    #[test]
    fn test_insert_and_delete_pair() {
        let mut band = straight_band(3, 1.0);
        band.insert_pose(1, PoseSE2::new(0.5, 0.0, 0.0));
        band.insert_time_diff(1, 0.25);
        assert!(band.is_consistent());
        assert_eq!(band.pose(1).x, 0.5);
        assert_eq!(band.time_diff(1), 0.25);

        band.delete_pose(1);
        band.delete_time_diff(1);
        assert!(band.is_consistent());
        assert_eq!(band.size_poses(), 3);
        assert_eq!(band.pose(1).x, 1.0);
    }

    #[test]
    fn test_delete_ranges() {
        let mut band = straight_band(6, 1.0);
        band.delete_poses(1, 3);
        band.delete_time_diffs(1, 3);
        assert!(band.is_consistent());
        let xs: Vec<f64> = band.poses().iter().map(|v| v.pose.x).collect();
        assert_eq!(xs, vec![0.0, 4.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "delete_pose")]
    fn test_delete_pose_out_of_range() {
        straight_band(2, 1.0).delete_pose(2);
    }

    #[test]
    #[should_panic(expected = "set_time_diff_fixed")]
    fn test_set_time_diff_fixed_out_of_range() {
        straight_band(2, 1.0).set_time_diff_fixed(1, true);
    }

    #[test]
    #[should_panic(expected = "positive dt")]
    fn test_add_negative_time_diff() {
        let mut band = TimedElasticBand::new();
        band.add_time_diff(-1.0, false);
    }

    #[test]
    fn test_fixed_flags_and_mutation() {
        let mut band = straight_band(3, 1.0);
        band.set_pose_fixed(2, true);
        band.set_time_diff_fixed(0, true);
        assert!(band.is_pose_fixed(0));
        assert!(band.is_pose_fixed(2));
        assert!(band.is_time_diff_fixed(0));

        *band.time_diff_mut(1) = 0.7;
        band.pose_mut(1).y = 2.0;
        assert_eq!(band.time_diff(1), 0.7);
        assert_eq!(band.back_time_diff(), 0.7);
        assert_eq!(band.pose(1).y, 2.0);
    }

    #[test]
    fn test_clear() {
        let mut band = straight_band(4, 1.0);
        band.clear();
        assert!(band.is_empty());
        assert_eq!(band.size_poses(), 0);
        assert_eq!(band.size_time_diffs(), 0);
    }

    #[test]
    fn test_to_path() {
        let band = straight_band(3, 1.0);
        let path = band.to_path();
        assert_eq!(path.x_coords(), vec![0.0, 1.0, 2.0]);
        assert_eq!(band.back_pose().x, 2.0);
    }
}
