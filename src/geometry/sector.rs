use crate::error;
use crate::utils::round_dp;

use super::intersect::ray_segment_intersection;
use super::Point;

const CENTER: Point = (0.5, 0.5);

/// Edges of the unit square, checked in this order when casting rays.
const EDGES: [(Point, Point); 4] = [
    ((0.0, 1.0), (1.0, 1.0)),
    ((1.0, 1.0), (1.0, 0.0)),
    ((1.0, 0.0), (0.0, 0.0)),
    ((0.0, 0.0), (0.0, 1.0)),
];

const CORNERS: [Point; 4] = [(1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0)];

/// A set of polygons tiling the unit square, one per division.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    pub xs: Vec<Vec<f64>>,
    pub ys: Vec<Vec<f64>>,
    pub positions: Vec<String>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn polygon(&self, index: usize) -> (&[f64], &[f64]) {
        (&self.xs[index], &self.ys[index])
    }

    fn from_points(polygons: Vec<Vec<Point>>, positions: Vec<String>) -> Partition {
        let mut xs = vec![];
        let mut ys = vec![];
        for polygon in polygons {
            xs.push(polygon.iter().map(|p| round_dp(p.0, 2)).collect());
            ys.push(polygon.iter().map(|p| round_dp(p.1, 2)).collect());
        }
        Partition { xs, ys, positions }
    }
}

fn position_labels(count: usize) -> Vec<String> {
    let labels: Vec<&str> = match count {
        1 => vec!["box"],
        2 => vec!["upper", "lower"],
        3 => vec!["top", "lower-left", "lower-right"],
        4 => vec!["top", "right", "bottom", "left"],
        _ => return (0..count).map(|i| format!("sector-{}", i)).collect(),
    };
    labels.iter().map(|s| s.to_string()).collect()
}

fn boundary_hit(angle_deg: f64) -> Point {
    let direction = (angle_deg.to_radians().cos(), angle_deg.to_radians().sin());
    for (a, b) in EDGES.iter() {
        if let Some(point) = ray_segment_intersection(CENTER, direction, *a, *b) {
            return point;
        }
    }
    // a ray from the centre always leaves the square
    CENTER
}

fn corner_angle(corner: &Point) -> f64 {
    (corner.1 - CENTER.1).atan2(corner.0 - CENTER.0).to_degrees()
}

/// Partition the unit square into `count` angular sectors around its centre.
///
/// The first sector is centred on 90° and sectors follow clockwise. Square
/// corners that fall strictly inside a sector are inserted in boundary order.
pub fn angular_sectors(count: usize) -> Vec<Vec<Point>> {
    let span = 360.0 / count as f64;
    let tolerance = 1e-9;
    let mut polygons = vec![];
    for i in 0..count {
        let middle = 90.0 - i as f64 * span;
        let start = middle + span / 2.0;
        let end = middle - span / 2.0;
        let mut polygon = vec![CENTER, boundary_hit(start)];
        let mut corners: Vec<(f64, Point)> = CORNERS
            .iter()
            .map(|corner| ((start - corner_angle(corner)).rem_euclid(360.0), *corner))
            .filter(|(sweep, _)| *sweep > tolerance && *sweep < span - tolerance)
            .collect();
        corners.sort_by(|a, b| a.0.total_cmp(&b.0));
        polygon.extend(corners.into_iter().map(|(_, corner)| corner));
        polygon.push(boundary_hit(end));
        polygons.push(polygon);
    }
    polygons
}

/// Split a unit cell into `count` polygons, one per stacked division.
///
/// One division fills the square, two split it along the diagonal and three
/// use a top triangle over two lower halves. Four or more divisions use
/// angular sectors, so four gives the top/right/bottom/left triangles.
/// # Examples
///
/// ```
/// # use esmbenchviz::geometry::partition;
/// let square = partition(1).unwrap();
/// assert_eq!(square.xs[0], vec![0.0, 0.0, 1.0, 1.0]);
/// assert_eq!(square.ys[0], vec![0.0, 1.0, 1.0, 0.0]);
/// ```
pub fn partition(count: usize) -> Result<Partition, error::Error> {
    let polygons = match count {
        0 => return Err(error::Error::InvalidDivisionCount(count)),
        1 => vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]],
        2 => vec![
            vec![(0.0, 1.0), (0.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
        ],
        3 => vec![
            vec![(0.0, 1.0), (0.5, 0.5), (1.0, 1.0)],
            vec![(0.0, 1.0), (0.0, 0.0), (0.5, 0.0), (0.5, 0.5)],
            vec![(1.0, 1.0), (0.5, 0.5), (0.5, 0.0), (1.0, 0.0)],
        ],
        _ => angular_sectors(count),
    };
    Ok(Partition::from_points(polygons, position_labels(count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_area;

    fn sorted(xs: &[f64], ys: &[f64]) -> Vec<(i64, i64)> {
        let mut points: Vec<(i64, i64)> = xs
            .iter()
            .zip(ys.iter())
            .map(|(x, y)| ((x * 100.0).round() as i64, (y * 100.0).round() as i64))
            .collect();
        points.sort();
        points
    }

    #[test]
    fn test_single_division() {
        let part = partition(1).unwrap();
        assert_eq!(part.len(), 1);
        assert_eq!(part.positions, vec!["box"]);
        assert_eq!(
            sorted(&part.xs[0], &part.ys[0]),
            vec![(0, 0), (0, 100), (100, 0), (100, 100)]
        );
    }

    #[test]
    fn test_two_divisions_share_diagonal() {
        let part = partition(2).unwrap();
        assert_eq!(part.len(), 2);
        for i in 0..2 {
            let points = sorted(&part.xs[i], &part.ys[i]);
            assert_eq!(points.len(), 3);
            assert!(points.contains(&(0, 0)));
            assert!(points.contains(&(100, 100)));
        }
    }

    #[test]
    fn test_three_divisions_top_and_halves() {
        let part = partition(3).unwrap();
        assert_eq!(part.positions, vec!["top", "lower-left", "lower-right"]);
        assert_eq!(part.xs[0], vec![0.0, 0.5, 1.0]);
        assert_eq!(part.ys[0], vec![1.0, 0.5, 1.0]);
        assert_eq!(
            sorted(&part.xs[1], &part.ys[1]),
            vec![(0, 0), (0, 100), (50, 0), (50, 50)]
        );
        assert_eq!(
            sorted(&part.xs[2], &part.ys[2]),
            vec![(50, 0), (50, 50), (100, 0), (100, 100)]
        );
    }

    #[test]
    fn test_four_divisions() {
        let part = partition(4).unwrap();
        assert_eq!(part.positions, vec!["top", "right", "bottom", "left"]);
        assert_eq!(
            sorted(&part.xs[0], &part.ys[0]),
            vec![(0, 100), (50, 50), (100, 100)]
        );
        assert_eq!(
            sorted(&part.xs[1], &part.ys[1]),
            vec![(50, 50), (100, 0), (100, 100)]
        );
        assert_eq!(
            sorted(&part.xs[2], &part.ys[2]),
            vec![(0, 0), (50, 50), (100, 0)]
        );
        assert_eq!(
            sorted(&part.xs[3], &part.ys[3]),
            vec![(0, 0), (0, 100), (50, 50)]
        );
    }

    #[test]
    fn test_partitions_tile_unit_square() {
        for count in 1..=12 {
            let part = partition(count).unwrap();
            assert_eq!(part.len(), count);
            let mut total = 0.0;
            for i in 0..count {
                let (xs, ys) = part.polygon(i);
                assert!(xs.iter().chain(ys.iter()).all(|v| (0.0..=1.0).contains(v)));
                let area = polygon_area(xs, ys).abs();
                assert!(area > 0.0, "empty sector {} of {}", i, count);
                total += area;
            }
            assert!((total - 1.0).abs() < 1e-9, "{} sectors cover {}", count, total);
        }
    }

    #[test]
    fn test_angular_sectors_include_corners() {
        let sectors = angular_sectors(3);
        // top sector spans 30..150 degrees and reaches both upper corners
        assert_eq!(sectors[0].len(), 5);
        assert!(sectors[0].contains(&(1.0, 1.0)));
        assert!(sectors[0].contains(&(0.0, 1.0)));
    }

    #[test]
    fn test_zero_divisions() {
        assert!(partition(0).is_err());
    }
}
