//! Optimization variables stored in the band

use crate::common::PoseSE2;

/// Pose variable of the band.
///
/// A fixed pose must not be changed by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseVertex {
    pub pose: PoseSE2,
    pub fixed: bool,
}

impl PoseVertex {
    pub fn new(pose: PoseSE2, fixed: bool) -> Self {
        Self { pose, fixed }
    }

    pub fn free(pose: PoseSE2) -> Self {
        Self::new(pose, false)
    }
}

/// Time difference between two consecutive poses.
///
/// `dt` is strictly positive for every vertex created through [`TimeDiffVertex::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDiffVertex {
    pub dt: f64,
    pub fixed: bool,
}

impl TimeDiffVertex {
    /// # Panics
    /// If `dt` is not strictly positive.
    pub fn new(dt: f64, fixed: bool) -> Self {
        assert!(dt > 0.0, "time difference requires a positive dt, got {}", dt);
        Self { dt, fixed }
    }

    pub fn free(dt: f64) -> Self {
        Self::new(dt, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let p = PoseVertex::free(PoseSE2::new(1.0, 2.0, 0.0));
        assert!(!p.fixed);
        let t = TimeDiffVertex::new(0.3, true);
        assert!(t.fixed);
        assert_eq!(t.dt, 0.3);
    }

    #[test]
    #[should_panic(expected = "positive dt")]
    fn test_zero_time_diff_panics() {
        TimeDiffVertex::free(0.0);
    }

    #[test]
    #[should_panic(expected = "positive dt")]
    fn test_nan_time_diff_panics() {
        TimeDiffVertex::free(f64::NAN);
    }
}
