//! Decimal rounding of coordinate values
//!
//! Rounding is half away from zero (`f64::round` on the scaled value). The
//! trait is implemented for the leaves and for `Vec<T>`, so any nesting depth
//! of rings, polygons and multi-polygons composes from the same pieces.

use crate::domain::{MultiPolygon, Point, Polygon, Ring};

/// Largest number of decimal places that still fits in an f64 mantissa
pub const MAX_DECIMALS: u32 = 15;

pub trait Quantize {
    fn quantize(&self, decimals: u32) -> Self;
}

impl Quantize for f64 {
    fn quantize(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
        let scaled = self * factor;
        if !scaled.is_finite() {
            return *self;
        }
        scaled.round() / factor
    }
}

impl Quantize for Point {
    fn quantize(&self, decimals: u32) -> Self {
        Point {
            x: self.x.quantize(decimals),
            y: self.y.quantize(decimals),
        }
    }
}

impl Quantize for Ring {
    fn quantize(&self, decimals: u32) -> Self {
        Ring::new(self.0.quantize(decimals))
    }
}

impl<T: Quantize> Quantize for Vec<T> {
    fn quantize(&self, decimals: u32) -> Self {
        self.iter().map(|item| item.quantize(decimals)).collect()
    }
}

impl Quantize for Polygon {
    fn quantize(&self, decimals: u32) -> Self {
        Polygon::new(self.rings.quantize(decimals))
    }
}

impl Quantize for MultiPolygon {
    fn quantize(&self, decimals: u32) -> Self {
        MultiPolygon::new(self.0.quantize(decimals))
    }
}
