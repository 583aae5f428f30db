use crate::domain::Point;

/// Perpendicular distance from `point` to the infinite line through `start` and `end`
///
/// When the two line points coincide there is no direction to measure against,
/// so the plain Euclidean distance to `start` is returned instead.
pub fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    let (x0, y0) = point.x_y();
    let (x1, y1) = start.x_y();
    let (x2, y2) = end.x_y();

    if x1 == x2 && y1 == y2 {
        return euclidean(point, start);
    }

    let dx = x2 - x1;
    let dy = y2 - y1;
    let numerator = (dy * x0 - dx * y0 + x2 * y1 - y2 * x1).abs();
    let denominator = dx.hypot(dy);

    // Subnormal deltas can still square to zero
    if denominator == 0.0 {
        return euclidean(point, start);
    }

    numerator / denominator
}

fn euclidean(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
