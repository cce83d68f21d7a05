use super::Point;

/// Find the intersection points of two circles.
///
/// Returns an empty list when the circles are too far apart, when one lies
/// inside the other, or when they are identical.
/// # Examples
///
/// ```
/// # use esmbenchviz::geometry::find_circle_intersection;
/// let points = find_circle_intersection(0.0, 0.0, 5.0, 4.0, 0.0, 3.0);
/// assert_eq!(points, vec![(4.0, -3.0), (4.0, 3.0)]);
/// ```
pub fn find_circle_intersection(x1: f64, y1: f64, r1: f64, x2: f64, y2: f64, r2: f64) -> Vec<Point> {
    let d = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();

    if d > r1 + r2 || d < (r1 - r2).abs() {
        return vec![];
    }
    // identical circles intersect everywhere; callers fall back to default angles
    if d == 0.0 && r1 == r2 {
        return vec![];
    }

    let a = (r1.powi(2) - r2.powi(2) + d.powi(2)) / (2.0 * d);
    let h = (r1.powi(2) - a.powi(2)).abs().sqrt();

    let x3 = x1 + a * (x2 - x1) / d;
    let y3 = y1 + a * (y2 - y1) / d;

    vec![
        (x3 + h * (y2 - y1) / d, y3 - h * (x2 - x1) / d),
        (x3 - h * (y2 - y1) / d, y3 + h * (x2 - x1) / d),
    ]
}

/// Find where a circle crosses the y-axis (`x = 0`).
/// # Examples
///
/// ```
/// # use esmbenchviz::geometry::find_circle_y_axis_intersection;
/// let points = find_circle_y_axis_intersection(3.0, 0.0, 5.0);
/// assert_eq!(points, vec![(0.0, 4.0), (0.0, -4.0)]);
/// ```
pub fn find_circle_y_axis_intersection(x1: f64, y1: f64, r: f64) -> Vec<Point> {
    let discriminant = r.powi(2) - x1.powi(2);
    if discriminant < 0.0 {
        return vec![];
    }
    let offset = discriminant.sqrt();
    vec![(0.0, y1 + offset), (0.0, y1 - offset)]
}

/// Angle in degrees, in `[0, 360)`, between the x-axis and the line from
/// `(x1, y1)` to `(x2, y2)`.
pub fn angle_with_x_axis(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x2 == x1 {
        if y2 > y1 {
            return 90.0;
        } else {
            return 270.0;
        }
    }
    let mut angle = (y2 - y1).atan2(x2 - x1).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}

/// Find the intersection points of the line through `(x1, y1)` and
/// `(x2, y2)` with the circle centred at `(x3, y3)`.
pub fn find_line_circle_intersection(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    r: f64,
) -> Vec<Point> {
    if x1 == x2 {
        let discriminant = r.powi(2) - (x1 - x3).powi(2);
        if discriminant < 0.0 {
            return vec![];
        }
        let offset = discriminant.sqrt();
        return vec![(x1, y3 + offset), (x1, y3 - offset)];
    }

    let m = (y2 - y1) / (x2 - x1);
    let b = y1 - m * x1;

    // substitute y = mx + b into (x - x3)^2 + (y - y3)^2 = r^2
    let qa = 1.0 + m.powi(2);
    let qb = 2.0 * (m * (b - y3) - x3);
    let qc = x3.powi(2) + (b - y3).powi(2) - r.powi(2);

    let discriminant = qb.powi(2) - 4.0 * qa * qc;
    if discriminant < 0.0 {
        return vec![];
    }
    let root = discriminant.sqrt();
    let x_int1 = (-qb + root) / (2.0 * qa);
    let x_int2 = (-qb - root) / (2.0 * qa);
    vec![(x_int1, m * x_int1 + b), (x_int2, m * x_int2 + b)]
}

/// Intersection of the ray from `origin` along `direction` with the segment
/// `a`–`b`, if any.
pub fn ray_segment_intersection(origin: Point, direction: Point, a: Point, b: Point) -> Option<Point> {
    let edge = (b.0 - a.0, b.1 - a.1);
    let denom = direction.0 * edge.1 - direction.1 * edge.0;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let diff = (a.0 - origin.0, a.1 - origin.1);
    let t = (diff.0 * edge.1 - diff.1 * edge.0) / denom;
    let u = (diff.0 * direction.1 - diff.1 * direction.0) / denom;
    let tolerance = 1e-12;
    if t >= -tolerance && u >= -tolerance && u <= 1.0 + tolerance {
        Some((origin.0 + t * direction.0, origin.1 + t * direction.1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_circle_intersection() {
        let points = find_circle_intersection(0.0, 0.0, 5.0, 4.0, 0.0, 3.0);
        assert_eq!(points.len(), 2);
        assert!(close(points[0].0, 4.0) && close(points[0].1, -3.0));
        assert!(close(points[1].0, 4.0) && close(points[1].1, 3.0));
    }

    #[test]
    fn test_circle_intersection_degenerate() {
        assert!(find_circle_intersection(0.0, 0.0, 1.0, 0.0, 0.0, 1.0).is_empty());
        assert!(find_circle_intersection(0.0, 0.0, 1.0, 5.0, 0.0, 1.0).is_empty());
        assert!(find_circle_intersection(0.0, 0.0, 5.0, 0.5, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_circle_y_axis_intersection() {
        assert_eq!(
            find_circle_y_axis_intersection(3.0, 0.0, 5.0),
            vec![(0.0, 4.0), (0.0, -4.0)]
        );
        assert!(find_circle_y_axis_intersection(1.0, 0.0, 0.4).is_empty());
    }

    #[test]
    fn test_angle_with_x_axis() {
        assert!(close(angle_with_x_axis(1.0, 1.0, 4.0, 5.0), 53.13010235415598));
        assert_eq!(angle_with_x_axis(0.0, 0.0, 0.0, 1.0), 90.0);
        assert_eq!(angle_with_x_axis(0.0, 0.0, 0.0, -1.0), 270.0);
        assert!(close(angle_with_x_axis(0.0, 0.0, 1.0, -1.0), 315.0));
    }

    #[test]
    fn test_line_circle_intersection() {
        let points = find_line_circle_intersection(1.0, 2.0, 4.0, 6.0, 3.0, 3.0, 5.0);
        assert_eq!(points.len(), 2);
        for (x, y) in points {
            assert!(close((x - 3.0).powi(2) + (y - 3.0).powi(2), 25.0));
            assert!(close(y, 4.0 / 3.0 * x + 2.0 / 3.0));
        }
        let vertical = find_line_circle_intersection(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0);
        assert_eq!(vertical, vec![(0.0, 2.0), (0.0, -2.0)]);
        assert!(find_line_circle_intersection(0.0, 5.0, 1.0, 5.0, 0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_ray_segment_intersection() {
        let hit = ray_segment_intersection((0.5, 0.5), (0.0, 1.0), (0.0, 1.0), (1.0, 1.0));
        assert_eq!(hit, Some((0.5, 1.0)));
        let miss = ray_segment_intersection((0.5, 0.5), (0.0, -1.0), (0.0, 1.0), (1.0, 1.0));
        assert_eq!(miss, None);
    }
}
