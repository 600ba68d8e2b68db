//! Timed Elastic Band
//!
//! A trajectory discretized into poses and the time differences between
//! them, kept well-conditioned while a local planner replans every cycle.
//!
//! # Components
//!
//! - `timed_elastic_band`: storage and structural operations
//! - `vertex`: pose and time-diff variables with their fixed flags
//! - `resize`: adaptive insertion/removal of samples
//! - `init`: straight-line and waypoint-path initialization
//! - `horizon`: receding-horizon pruning
//! - `proximity`: closest pose to points, segments, polygons and obstacles
//! - `region`: containment check around the robot
//! - `config`: parameter set with defaults
//!
//! # Example
//!
//! ```
//! use timed_elastic_band::band::{TimedElasticBand, TrajectoryConfig};
//! use timed_elastic_band::common::PoseSE2;
//!
//! let config = TrajectoryConfig::default();
//! let mut band = TimedElasticBand::new();
//!
//! let start = PoseSE2::new(0.0, 0.0, 0.0);
//! let goal = PoseSE2::new(2.0, 1.0, 0.0);
//! band.init_trajectory_to_goal_with(&start, &goal, &config).unwrap();
//!
//! // every planning cycle
//! band.update_and_prune_with(Some(&PoseSE2::new(0.1, 0.0, 0.0)), None, &config);
//! band.auto_resize_with(&config);
//! assert!(band.is_consistent());
//! ```
//!
//! # References
//!
//! - C. Rösmann et al., "Trajectory modification considering dynamic
//!   constraints of autonomous robots", ROBOTIK 2012
//! - C. Rösmann et al., "Efficient trajectory optimization using a sparse
//!   model", ECMR 2013

pub mod vertex;
pub mod timed_elastic_band;
pub mod resize;
pub mod init;
pub mod horizon;
pub mod proximity;
pub mod region;
pub mod config;

// Re-exports
pub use vertex::{PoseVertex, TimeDiffVertex};
pub use timed_elastic_band::TimedElasticBand;
pub use resize::{ResizeReport, MAX_RESIZE_PASSES};
pub use init::{estimate_delta_t, DEFAULT_TIME_STEP};
pub use horizon::MAX_PRUNE_LOOKAHEAD;
pub use proximity::ClosestPose;
pub use config::TrajectoryConfig;
