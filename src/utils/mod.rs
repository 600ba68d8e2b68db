//! Utility modules for timed_elastic_band

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
