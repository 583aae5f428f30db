use crate::config::SimplificationConfig;
use crate::domain::Ring;
use crate::geometry::{Quantize, guard_coverage, reduce_line};

/// Fewest points a closed ring needs to enclose any area (3 vertices + closure)
pub const MIN_USABLE_RING: usize = 4;

/// A ring after reduction, coverage guarding and rounding
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRing {
    pub ring: Ring,
    pub usable: bool,
}

impl ProcessedRing {
    /// The ring, if it is worth keeping
    pub fn into_usable(self) -> Option<Ring> {
        self.usable.then_some(self.ring)
    }
}

/// Run one ring through reduction, the coverage guard and quantization
pub fn process_ring(ring: &Ring, config: &SimplificationConfig) -> ProcessedRing {
    let original = ring.0.as_slice();
    let reduced = reduce_line(original, config.tolerance);
    let minimum = config.min_ring_vertices.resolve(original.len());
    let guarded = guard_coverage(original, reduced, minimum);
    let ring = Ring::new(guarded).quantize(config.coordinate_precision);
    let usable = ring.0.len() >= MIN_USABLE_RING;

    ProcessedRing { ring, usable }
}
