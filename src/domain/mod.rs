pub mod geometry;
pub mod polygon;

pub use geometry::Geometry;
pub use polygon::{MultiPolygon, Polygon};

/// A `(longitude, latitude)` pair; x is longitude, y is latitude
pub type Point = geo::Coord<f64>;

/// One boundary loop of a polygon
pub type Ring = geo::LineString<f64>;
