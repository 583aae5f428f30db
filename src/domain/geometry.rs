use super::{MultiPolygon, Polygon};

/// The geometry of one feature as seen by the simplifier
///
/// Anything that is not a polygon or multi-polygon is carried along untouched
/// in `Other` so it can be written back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    Other(geojson::Value),
}

impl Geometry {
    /// Short type tag, matching the GeoJSON `type` member
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Other(value) => match value {
                geojson::Value::Point(_) => "Point",
                geojson::Value::MultiPoint(_) => "MultiPoint",
                geojson::Value::LineString(_) => "LineString",
                geojson::Value::MultiLineString(_) => "MultiLineString",
                geojson::Value::Polygon(_) => "Polygon",
                geojson::Value::MultiPolygon(_) => "MultiPolygon",
                geojson::Value::GeometryCollection(_) => "GeometryCollection",
            },
        }
    }

    /// Number of coordinates held by polygonal geometries; `Other` counts as 0
    pub fn coord_count(&self) -> usize {
        match self {
            Geometry::Polygon(polygon) => polygon.coord_count(),
            Geometry::MultiPolygon(multi) => multi.coord_count(),
            Geometry::Other(_) => 0,
        }
    }

    /// Planar unsigned area in squared coordinate units
    pub fn area(&self) -> f64 {
        use geo::Area;

        match self {
            Geometry::Polygon(polygon) => polygon.to_geo().map_or(0.0, |p| p.unsigned_area()),
            Geometry::MultiPolygon(multi) => multi
                .polygons()
                .iter()
                .filter_map(Polygon::to_geo)
                .map(|p| p.unsigned_area())
                .sum(),
            Geometry::Other(_) => 0.0,
        }
    }
}
