//! Common traits shared by the band and its inputs

use crate::band::TimedElasticBand;
use crate::common::obstacle::Obstacle;
use crate::utils::{PathStyle, Visualizer};

/// Trait for things that can draw themselves
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut Visualizer);
}

impl Visualizable for TimedElasticBand {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_band(self, &PathStyle::default(), 0.2);
    }
}

impl Visualizable for Obstacle {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_obstacle(self);
    }
}

impl<T: Visualizable> Visualizable for [T] {
    fn visualize(&self, vis: &mut Visualizer) {
        for item in self {
            item.visualize(vis);
        }
    }
}
