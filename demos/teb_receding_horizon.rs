//! Timed Elastic Band Receding Horizon Example
//!
//! Simulates a robot that follows its band: every cycle the measured pose
//! (with odometry noise) becomes the new start, the band is pruned and
//! resized, and the loop stops once the robot leaves the band's region or
//! reaches the goal.
//!
//! Run with: cargo run --example teb_receding_horizon

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use timed_elastic_band::band::{TimedElasticBand, TrajectoryConfig};
use timed_elastic_band::common::{Obstacle, PoseSE2, Visualizable};
use timed_elastic_band::utils::{colors, PathStyle, Visualizer};

const MAX_CYCLES: usize = 200;
const GOAL_TOLERANCE: f64 = 0.1;

fn main() {
    env_logger::init();

    println!("Timed Elastic Band Receding Horizon Example");
    println!("===========================================\n");

    let config = TrajectoryConfig {
        region_radius: 8.0,
        max_dist_behind_robot: 0.5,
        skip_poses: 1,
        ..Default::default()
    };

    let start = PoseSE2::new(0.0, 0.0, 0.0);
    let goal = PoseSE2::new(6.0, 3.0, 0.0);
    let obstacle = Obstacle::circle(3.0, 1.0, 0.4);

    let mut band = TimedElasticBand::new();
    if let Err(e) = band.init_trajectory_to_goal_with(&start, &goal, &config) {
        eprintln!("Initialization failed: {}", e);
        return;
    }
    band.auto_resize_with(&config);

    let mut rng = StdRng::seed_from_u64(3);
    let odom_noise = Normal::new(0.0, 0.01).unwrap();

    let mut vis = Visualizer::new();
    vis.set_title("Timed Elastic Band - Receding Horizon");
    vis.plot_band(&band, &PathStyle::new(colors::GRAY, "Initial band").with_line_width(1.0), 0.0);
    obstacle.visualize(&mut vis);

    let mut robot = start;
    for cycle in 0..MAX_CYCLES {
        // drive to the next pose of the band
        let target = if band.size_poses() > 1 { *band.pose(1) } else { *band.back_pose() };
        robot = PoseSE2::new(
            target.x + odom_noise.sample(&mut rng),
            target.y + odom_noise.sample(&mut rng),
            target.theta,
        );

        let pruned = band.update_and_prune_with(Some(&robot), Some(&goal), &config);
        let report = band.auto_resize_with(&config);

        if let Some(closest) = band.find_closest_pose_to_obstacle(&obstacle) {
            log::debug!("cycle {}: obstacle closest to pose {} ({:.2} m)", cycle, closest.index, closest.distance);
        }

        println!(
            "cycle {:3}: robot ({:.2}, {:.2}), pruned {}, {} poses, {:.2} s to go",
            cycle,
            robot.x,
            robot.y,
            pruned,
            band.size_poses(),
            band.sum_of_all_time_diffs()
        );
        if report.modified() {
            log::debug!("cycle {}: band resized in {} passes", cycle, report.passes);
        }

        if !band.is_trajectory_inside_region_with(&config) {
            println!("Band left the region around the robot, replanning required");
            break;
        }
        if (goal.position() - robot.position()).norm() < GOAL_TOLERANCE {
            println!("Goal reached after {} cycles", cycle + 1);
            break;
        }
    }

    band.visualize(&mut vis);
    vis.plot_robot(&robot, 1.0);
    vis.plot_start(start.point());
    vis.plot_goal(goal.point());

    if let Err(e) = vis.save_png("img/teb/receding_horizon.png", 800, 600) {
        eprintln!("Failed to save PNG: {}", e);
    }
    println!("Plot saved to: img/teb/receding_horizon.png");
}
