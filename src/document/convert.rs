//! Conversion between GeoJSON geometry values and the simplifier's types
//!
//! Positions keep longitude and latitude only; a third (altitude) value is
//! dropped, as boundary data carries none worth keeping.

use geojson::{PolygonType, Position};

use super::DocumentError;
use crate::domain::{Geometry, MultiPolygon, Point, Polygon, Ring};

pub fn to_geometry(value: &geojson::Value) -> Result<Geometry, DocumentError> {
    match value {
        geojson::Value::Polygon(rings) => Ok(Geometry::Polygon(to_polygon(rings)?)),
        geojson::Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(|rings| to_polygon(rings))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        other => Ok(Geometry::Other(other.clone())),
    }
}

pub fn to_value(geometry: Geometry) -> geojson::Value {
    match geometry {
        Geometry::Polygon(polygon) => geojson::Value::Polygon(from_polygon(&polygon)),
        Geometry::MultiPolygon(multi) => {
            geojson::Value::MultiPolygon(multi.polygons().iter().map(from_polygon).collect())
        }
        Geometry::Other(value) => value,
    }
}

fn to_polygon(rings: &PolygonType) -> Result<Polygon, DocumentError> {
    let rings = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| to_point(position))
                .collect::<Result<Vec<_>, _>>()
                .map(Ring::new)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(rings))
}

fn to_point(position: &Position) -> Result<Point, DocumentError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Point { x: *x, y: *y }),
        _ => Err(DocumentError::InvalidPosition(position.len())),
    }
}

fn from_polygon(polygon: &Polygon) -> PolygonType {
    polygon
        .rings
        .iter()
        .map(|ring| ring.0.iter().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_round_trip() {
        let value = geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]);

        let geometry = to_geometry(&value).unwrap();
        assert_eq!(geometry.kind(), "Polygon");
        assert_eq!(geometry.coord_count(), 4);
        assert_eq!(to_value(geometry), value);
    }

    #[test]
    fn test_altitude_dropped() {
        let value = geojson::Value::MultiPolygon(vec![vec![vec![
            vec![1.0, 2.0, 300.0],
            vec![3.0, 4.0, 300.0],
        ]]]);

        let geometry = to_geometry(&value).unwrap();

        assert_eq!(
            to_value(geometry),
            geojson::Value::MultiPolygon(vec![vec![vec![vec![1.0, 2.0], vec![3.0, 4.0]]]])
        );
    }

    #[test]
    fn test_short_position_rejected() {
        let value = geojson::Value::Polygon(vec![vec![vec![1.0, 2.0], vec![3.0]]]);
        assert!(matches!(
            to_geometry(&value),
            Err(DocumentError::InvalidPosition(1))
        ));
    }

    #[test]
    fn test_other_kept() {
        let value = geojson::Value::Point(vec![1.0, 2.0]);
        let geometry = to_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::Other(value.clone()));
        assert_eq!(geometry.kind(), "Point");
        assert_eq!(to_value(geometry), value);
    }
}
