use super::polygon::{fallback_ring, surviving_rings};
use super::ring::MIN_USABLE_RING;
use crate::config::SimplificationConfig;
use crate::domain::{MultiPolygon, Polygon};

/// Indices of the polygons to keep, largest outer ring first
///
/// Outer-ring vertex count stands in for visual weight. The sort is stable, so
/// equal counts keep their original order. Polygons without outer points never
/// rank.
pub fn rank_polygons(multi: &MultiPolygon, limit: Option<usize>) -> Vec<usize> {
    let mut ranked: Vec<(usize, usize)> = multi
        .polygons()
        .iter()
        .enumerate()
        .filter(|(_, polygon)| polygon.outer_len() > 0)
        .map(|(i, polygon)| (polygon.outer_len(), i))
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked.into_iter().map(|(_, i)| i).collect()
}

/// Simplify the retained polygons of a multi-polygon
///
/// Retained polygons that lose their outer ring are dropped. If none are
/// left, the first original polygon with a usable-sized outer ring is sampled
/// down to about `multi_fallback_vertices` points and emitted alone. Only a
/// multi-polygon with no such polygon comes back empty.
pub fn process_multi_polygon(multi: &MultiPolygon, config: &SimplificationConfig) -> MultiPolygon {
    let polygons: Vec<Polygon> = rank_polygons(multi, config.max_polygons_retained.count())
        .into_iter()
        .map(|i| surviving_rings(&multi.0[i], config))
        .filter(|rings| !rings.is_empty())
        .map(Polygon::new)
        .collect();

    if !polygons.is_empty() {
        return MultiPolygon::new(polygons);
    }

    multi
        .polygons()
        .iter()
        .filter_map(Polygon::outer)
        .find(|outer| outer.0.len() >= MIN_USABLE_RING)
        .map(|outer| {
            let ring = fallback_ring(
                outer,
                config.multi_fallback_vertices,
                config.coordinate_precision,
            );
            MultiPolygon::new(vec![Polygon::new(vec![ring])])
        })
        .unwrap_or_default()
}
