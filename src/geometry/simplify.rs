//! Douglas-Peucker vertex reduction
//!
//! The recursion is unrolled onto an explicit stack of index ranges so that
//! adversarial rings (split point hugging one end every time) cannot exhaust
//! the call stack. The kept set is identical to the recursive formulation.

use super::distance::perpendicular_distance;
use crate::domain::Point;

/// Reduce `points` so that every dropped vertex lies within `tolerance` of the
/// chord that replaced it.
///
/// Sequences of two points or fewer are returned unchanged. The first and last
/// input points are always part of the output.
pub fn reduce_line(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[last] = true;

    let mut stack = vec![(0, last)];
    while let Some((start, end)) = stack.pop() {
        if let Some(split) = farthest_beyond(points, start, end, tolerance) {
            kept[split] = true;
            stack.push((split, end));
            stack.push((start, split));
        }
    }

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}

/// Index of the interior point of `start..=end` farthest from the chord, if
/// that distance exceeds `tolerance`. Ties keep the earliest index.
fn farthest_beyond(points: &[Point], start: usize, end: usize, tolerance: f64) -> Option<usize> {
    if end <= start + 1 {
        return None;
    }

    let mut max_distance = 0.0;
    let mut max_index = None;

    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_distance {
            max_distance = d;
            max_index = Some(i);
        }
    }

    max_index.filter(|_| max_distance > tolerance)
}
