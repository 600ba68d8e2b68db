//! Common types, geometry helpers, and error definitions for timed_elastic_band
//!
//! This module provides the foundational building blocks the band and its
//! algorithms are built on.

pub mod types;
pub mod geometry;
pub mod obstacle;
pub mod error;
pub mod traits;

pub use types::*;
pub use obstacle::*;
pub use error::*;
pub use traits::*;
