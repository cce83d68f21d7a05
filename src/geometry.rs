//!
//! Closed-form 2D geometry for portrait glyphs and Taylor diagram decorations.

/// Circle, line and axis intersections.
pub mod intersect;

/// Unit square partitioning.
pub mod sector;

pub use intersect::{
    angle_with_x_axis, find_circle_intersection, find_circle_y_axis_intersection,
    find_line_circle_intersection,
};
pub use sector::{partition, Partition};

/// A point in data coordinates.
pub type Point = (f64, f64);

/// Signed area of a closed polygon (shoelace formula).
pub fn polygon_area(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += xs[i] * ys[j] - xs[j] * ys[i];
    }
    sum / 2.0
}
