//! Timed Elastic Band Initialization Example
//!
//! Builds bands from a straight line to the goal and from a noisy global
//! plan, resizes them toward the reference resolution and plots the result.
//!
//! Run with: cargo run --example teb_initialization

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use timed_elastic_band::band::{TimedElasticBand, TrajectoryConfig};
use timed_elastic_band::common::{Obstacle, Path2D, PoseSE2, Visualizable, Waypoint};
use timed_elastic_band::utils::{colors, PathStyle, Visualizer};

fn main() {
    env_logger::init();

    println!("Timed Elastic Band Initialization Example");
    println!("=========================================\n");

    let config = TrajectoryConfig::default();

    // Test 1: Straight line to the goal
    init_to_goal(&config);

    // Test 2: Global plan with noise
    init_from_plan(&config);

    println!("\nTimed Elastic Band initialization finished!");
}

fn print_summary(band: &TimedElasticBand) {
    println!(
        "  {} poses, {} time diffs, duration {:.2} s, length {:.2} m",
        band.size_poses(),
        band.size_time_diffs(),
        band.sum_of_all_time_diffs(),
        band.accumulated_distance()
    );
}

fn init_to_goal(config: &TrajectoryConfig) {
    println!("Test 1: Straight line to the goal");
    println!("---------------------------------");

    let start = PoseSE2::new(0.0, 0.0, 0.0);
    let goal = PoseSE2::new(4.0, 2.0, PI / 2.0);

    let mut band = TimedElasticBand::new();
    if let Err(e) = band.init_trajectory_to_goal_with(&start, &goal, config) {
        eprintln!("Initialization failed: {}", e);
        return;
    }
    print_summary(&band);

    let report = band.auto_resize_with(config);
    println!(
        "  resize: {} passes, {} inserted, {} removed",
        report.passes, report.inserted, report.removed
    );
    print_summary(&band);

    let mut vis = Visualizer::new();
    vis.set_title("Timed Elastic Band - Straight Line");
    band.visualize(&mut vis);
    vis.plot_start(start.point());
    vis.plot_goal(goal.point());

    if let Err(e) = vis.save_png("img/teb/init_to_goal.png", 800, 600) {
        eprintln!("Failed to save PNG: {}", e);
    }
    println!("Plot saved to: img/teb/init_to_goal.png");
    println!();
}

fn init_from_plan(config: &TrajectoryConfig) {
    println!("Test 2: Global plan with noise");
    println!("------------------------------");

    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.05).unwrap();

    // quarter circle as produced by a global planner
    let plan: Vec<Waypoint> = (0..=20)
        .map(|i| {
            let angle = PI / 2.0 * i as f64 / 20.0;
            let x = 3.0 * angle.sin() + noise.sample(&mut rng);
            let y = 3.0 * (1.0 - angle.cos()) + noise.sample(&mut rng);
            Waypoint::new(x, y, angle).with_stamp(0.25 * i as f64)
        })
        .collect();

    let mut band = TimedElasticBand::new();
    if let Err(e) = band.init_trajectory_from_path_with(&plan, config) {
        eprintln!("Initialization failed: {}", e);
        return;
    }
    print_summary(&band);

    band.auto_resize_with(config);
    print_summary(&band);

    let obstacles = vec![
        Obstacle::circle(2.5, 0.5, 0.3),
        Obstacle::polygon(&[(0.5, 1.5), (1.2, 1.5), (1.2, 2.2), (0.5, 2.2)]),
        Obstacle::pill(3.5, 2.0, 3.5, 3.5, 0.2),
    ];
    for obstacle in &obstacles {
        if let Some(closest) = band.find_closest_pose_to_obstacle(obstacle) {
            println!(
                "  obstacle at ({:.2}, {:.2}): closest pose {} at {:.2} m",
                obstacle.centroid()[0],
                obstacle.centroid()[1],
                closest.index,
                closest.distance
            );
        }
    }

    let mut vis = Visualizer::new();
    vis.set_title("Timed Elastic Band - Global Plan");
    let plan_path = Path2D::from_points(plan.iter().map(|w| w.position).collect());
    vis.plot_path(
        &plan_path,
        &PathStyle::new(colors::PLAN, "Plan").with_line_width(1.0),
    );
    band.visualize(&mut vis);
    obstacles.as_slice().visualize(&mut vis);

    if let Err(e) = vis.save_png("img/teb/init_from_plan.png", 800, 600) {
        eprintln!("Failed to save PNG: {}", e);
    }
    println!("Plot saved to: img/teb/init_from_plan.png");
}
