//! Per-geometry simplification: ring → polygon → multi-polygon

pub mod multi;
pub mod polygon;
pub mod ring;

pub use multi::{process_multi_polygon, rank_polygons};
pub use polygon::{process_polygon, surviving_rings};
pub use ring::{MIN_USABLE_RING, ProcessedRing, process_ring};

use crate::config::SimplificationConfig;
use crate::domain::Geometry;

/// Simplify one feature geometry
///
/// Polygons and multi-polygons are reduced; every other geometry type is
/// returned as given. Never fails.
pub fn simplify(geometry: Geometry, config: &SimplificationConfig) -> Geometry {
    match geometry {
        Geometry::Polygon(polygon) => Geometry::Polygon(process_polygon(&polygon, config)),
        Geometry::MultiPolygon(multi) => {
            Geometry::MultiPolygon(process_multi_polygon(&multi, config))
        }
        other => other,
    }
}
