pub mod coverage;
pub mod distance;
pub mod precision;
pub mod simplify;

pub use coverage::{close_ring, guard_coverage, stride_sample};
pub use distance::perpendicular_distance;
pub use precision::Quantize;
pub use simplify::reduce_line;
