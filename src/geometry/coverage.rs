//! Coverage guard applied after line reduction
//!
//! Aggressive tolerances can collapse a ring to its two endpoints, which is no
//! longer a polygon boundary. When the reduced ring falls below the minimum
//! vertex count, the reduction is thrown away and the original ring is sampled
//! at a uniform stride instead.

use crate::domain::Point;

/// Enforce `minimum` vertices on `reduced`, falling back to a strided sample of
/// `original`, and return a closed ring.
///
/// # Closure repair
/// - Reduced ring accepted: an open result has its last point overwritten with
///   the first.
/// - Strided sample: the original closing point is appended when the sample
///   stopped short of it, otherwise the last sample is overwritten with the
///   first.
/// - Anything still open at that point (open input rings) gets the first point
///   appended.
pub fn guard_coverage(original: &[Point], reduced: Vec<Point>, minimum: usize) -> Vec<Point> {
    let mut ring = if reduced.len() >= minimum {
        let mut ring = reduced;
        overwrite_closure(&mut ring);
        ring
    } else {
        let mut ring = stride_sample(original, minimum);
        if let (Some(&first), Some(&last), Some(&original_last)) =
            (ring.first(), ring.last(), original.last())
        {
            if first != last {
                if last != original_last {
                    ring.push(original_last);
                } else {
                    overwrite_closure(&mut ring);
                }
            }
        }
        ring
    };

    close_ring(&mut ring);
    ring
}

/// Every `len / target`-th point of `points` (at least every point), starting
/// at the first. Yields roughly `target` points for long inputs.
pub fn stride_sample(points: &[Point], target: usize) -> Vec<Point> {
    let stride = (points.len() / target.max(1)).max(1);
    points.iter().step_by(stride).copied().collect()
}

/// Append the first point if the ring is open
pub fn close_ring(points: &mut Vec<Point>) {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last {
            points.push(first);
        }
    }
}

fn overwrite_closure(points: &mut [Point]) {
    if let Some(&first) = points.first() {
        if let Some(last) = points.last_mut() {
            *last = first;
        }
    }
}
