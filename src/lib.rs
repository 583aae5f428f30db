//! geoslim - Shrink polygon-heavy GeoJSON boundary files while keeping their coverage

pub mod batch;
pub mod config;
pub mod document;
pub mod domain;
pub mod geometry;
pub mod processor;

pub use config::{MinRingVertices, PolygonLimit, Profile, SimplificationConfig};
pub use domain::{Geometry, MultiPolygon, Point, Polygon, Ring};
pub use processor::simplify;
