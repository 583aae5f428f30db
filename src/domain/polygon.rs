use geo::CoordsIter;

use super::Ring;

/// A boundary polygon: the first ring is the outer edge, any further rings are holes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(outer);
        rings.extend(holes);
        Self { rings }
    }

    pub fn outer(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Vertex count of the outer ring, 0 when there is none
    pub fn outer_len(&self) -> usize {
        self.outer().map_or(0, |ring| ring.0.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn coord_count(&self) -> usize {
        self.rings.iter().map(|ring| ring.coords_count()).sum()
    }

    /// Build the `geo` polygon used for area measurements
    pub fn to_geo(&self) -> Option<geo::Polygon<f64>> {
        let outer = self.outer()?.clone();
        Some(geo::Polygon::new(outer, self.holes().to_vec()))
    }
}

/// An ordered set of polygons sharing one feature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coord_count(&self) -> usize {
        self.0.iter().map(Polygon::coord_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, line_string};

    fn square() -> Ring {
        line_string![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn test_outer_and_holes() {
        let hole = line_string![
            (x: 0.5, y: 0.5),
            (x: 0.5, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 0.5, y: 0.5),
        ];
        let polygon = Polygon::with_holes(square(), vec![hole.clone()]);

        assert_eq!(polygon.outer_len(), 5);
        assert_eq!(polygon.holes(), &[hole]);
        assert_eq!(polygon.coord_count(), 9);
    }

    #[test]
    fn test_empty_polygon() {
        let polygon = Polygon::default();
        assert!(polygon.is_empty());
        assert_eq!(polygon.outer_len(), 0);
        assert!(polygon.holes().is_empty());
        assert!(polygon.to_geo().is_none());
    }

    #[test]
    fn test_to_geo_area() {
        let polygon = Polygon::new(vec![square()]);
        let area = polygon.to_geo().unwrap().unsigned_area();
        assert!((area - 4.0).abs() < 1e-12);
    }
}
