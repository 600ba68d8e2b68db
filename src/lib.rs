//! timed_elastic_band - Rust implementation of the Timed Elastic Band trajectory
//!
//! This crate provides the trajectory container of a TEB local planner:
//! initialization from a goal or a global plan, adaptive resampling of the
//! time discretization, receding-horizon pruning, and proximity queries
//! against obstacles.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod band;

// Re-export common types for convenience
pub use common::{Point2D, PoseSE2, Path2D, Waypoint, Obstacle, Visualizable};
pub use common::{BandError, BandResult};
pub use band::{TimedElasticBand, TrajectoryConfig, ResizeReport, ClosestPose};
