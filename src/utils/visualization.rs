//! Visualization utilities for timed_elastic_band
//!
//! Plots bands, obstacles and robot poses through gnuplot.

use std::f64::consts::PI;

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use nalgebra::Vector2;

use crate::band::TimedElasticBand;
use crate::common::{Obstacle, Path2D, Point2D, PoseSE2};

/// Number of segments used to draw circular arcs
const ARC_RESOLUTION: usize = 24;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const CYAN: &str = "#00FFFF";
    pub const ORANGE: &str = "#FFA500";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const BAND: &str = RED;
    pub const PLAN: &str = GRAY;
    pub const ROBOT: &str = CYAN;
    pub const HEADING: &str = ORANGE;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::BAND.to_string(),
            line_width: 2.0,
            caption: "Band".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Plot a path as a polyline
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.figure.axes2d().lines(
            &path.x_coords(),
            &path.y_coords(),
            &[Caption(&style.caption), Color(&style.color), LineWidth(style.line_width)],
        );
        self
    }

    /// Plot the band: its poses connected in order, plus a short heading
    /// stroke per pose of length `heading_len`
    pub fn plot_band(&mut self, band: &TimedElasticBand, style: &PathStyle, heading_len: f64) -> &mut Self {
        let path = band.to_path();
        self.plot_path(&path, style);
        self.figure.axes2d().points(
            &path.x_coords(),
            &path.y_coords(),
            &[Color(&style.color), PointSymbol('O'), PointSize(0.6)],
        );

        if heading_len > 0.0 {
            for vertex in band.poses() {
                let (x, y) = heading_stroke(&vertex.pose, heading_len);
                self.figure.axes2d().lines(&x, &y, &[Color(colors::HEADING), LineWidth(1.0)]);
            }
        }
        self
    }

    /// Plot an obstacle by its outline
    pub fn plot_obstacle(&mut self, obstacle: &Obstacle) -> &mut Self {
        let (x, y) = obstacle_outline(obstacle);
        let axes = self.figure.axes2d();
        if x.len() == 1 {
            axes.points(&x, &y, &[Color(colors::OBSTACLE), PointSymbol('S'), PointSize(0.8)]);
        } else {
            axes.lines(&x, &y, &[Color(colors::OBSTACLE), LineWidth(1.5)]);
        }
        self
    }

    pub fn plot_obstacles(&mut self, obstacles: &[Obstacle]) -> &mut Self {
        for obstacle in obstacles {
            self.plot_obstacle(obstacle);
        }
        self
    }

    /// Plot a single point (start, goal, etc.)
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.figure.axes2d().points(
            &[point.x],
            &[point.y],
            &[
                Caption(&style.caption),
                Color(&style.color),
                PointSymbol(style.symbol),
                PointSize(style.size),
            ],
        );
        self
    }

    /// Plot robot pose with direction indicator
    pub fn plot_robot(&mut self, pose: &PoseSE2, size: f64) -> &mut Self {
        self.plot_point(pose.point(), &PointStyle::new(colors::ROBOT, "Robot").with_size(size));

        let (x, y) = heading_stroke(pose, size * 0.5);
        self.figure.axes2d().lines(&x, &y, &[Color(colors::ROBOT), LineWidth(2.0)]);
        self
    }

    pub fn plot_start(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> Result<(), String> {
        self.apply_settings();
        self.figure.show().map_err(|e| e.to_string()).map(|_| ())
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> Result<(), String> {
        self.apply_settings();
        self.figure.save_to_png(path, width, height).map_err(|e| e.to_string())
    }

    fn apply_settings(&mut self) {
        let axes = self.figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Line from the pose position along its heading
fn heading_stroke(pose: &PoseSE2, length: f64) -> ([f64; 2], [f64; 2]) {
    let end = pose.position() + length * pose.orientation_unit_vec();
    ([pose.x, end[0]], [pose.y, end[1]])
}

/// Closed outline of an obstacle as x and y coordinates.
///
/// Points yield a single coordinate pair, polygons repeat their first vertex
/// at the end.
pub fn obstacle_outline(obstacle: &Obstacle) -> (Vec<f64>, Vec<f64>) {
    match obstacle {
        Obstacle::Point(p) => (vec![p[0]], vec![p[1]]),
        Obstacle::Line { start, end } => (vec![start[0], end[0]], vec![start[1], end[1]]),
        Obstacle::Polygon(vertices) => vertices
            .iter()
            .chain(vertices.first())
            .map(|v| (v[0], v[1]))
            .unzip(),
        Obstacle::Circle { center, radius } => (0..=ARC_RESOLUTION)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / ARC_RESOLUTION as f64;
                (center[0] + radius * angle.cos(), center[1] + radius * angle.sin())
            })
            .unzip(),
        Obstacle::Pill { start, end, radius } => {
            let dir = end - start;
            let yaw = dir[1].atan2(dir[0]);
            // half circle around each end point, joined by the straight sides
            let half = ARC_RESOLUTION / 2;
            let arc = |center: Vector2<f64>, from: f64| {
                (0..=half).map(move |i| {
                    let angle = from + PI * i as f64 / half as f64;
                    (center[0] + radius * angle.cos(), center[1] + radius * angle.sin())
                })
            };
            let mut outline: Vec<(f64, f64)> = arc(*end, yaw - PI / 2.0).chain(arc(*start, yaw + PI / 2.0)).collect();
            if let Some(&first) = outline.first() {
                outline.push(first);
            }
            outline.into_iter().unzip()
        }
    }
}
