use super::ring::process_ring;
use crate::config::SimplificationConfig;
use crate::domain::{Polygon, Ring};
use crate::geometry::{Quantize, close_ring, stride_sample};

/// Usable rings of `polygon`, outer first
///
/// Unusable holes are dropped. An unusable outer ring loses the whole polygon:
/// holes are never promoted to outer boundaries, so the result is empty.
pub fn surviving_rings(polygon: &Polygon, config: &SimplificationConfig) -> Vec<Ring> {
    let Some(outer) = polygon.outer() else {
        return Vec::new();
    };
    let Some(outer) = process_ring(outer, config).into_usable() else {
        return Vec::new();
    };

    let mut rings = vec![outer];
    rings.extend(
        polygon
            .holes()
            .iter()
            .filter_map(|hole| process_ring(hole, config).into_usable()),
    );
    rings
}

/// Simplify a polygon, never returning it without an outer boundary
///
/// When the outer ring does not survive, the original outer ring is sampled
/// down to about `outer_fallback_vertices` points and used alone. Only an input
/// without any outer points comes back empty.
pub fn process_polygon(polygon: &Polygon, config: &SimplificationConfig) -> Polygon {
    let rings = surviving_rings(polygon, config);
    if !rings.is_empty() {
        return Polygon::new(rings);
    }

    match polygon.outer() {
        Some(outer) if !outer.0.is_empty() => Polygon::new(vec![fallback_ring(
            outer,
            config.outer_fallback_vertices,
            config.coordinate_precision,
        )]),
        _ => Polygon::default(),
    }
}

/// Strided, closed and rounded copy of `ring` with roughly `target` points
pub(crate) fn fallback_ring(ring: &Ring, target: usize, decimals: u32) -> Ring {
    let mut points = stride_sample(&ring.0, target);
    close_ring(&mut points);
    Ring::new(points).quantize(decimals)
}
