pub mod line;
pub mod vector;

use thiserror::Error;

pub use line::{closest_point_on_line, is_left_of, line_distance, Line3};
pub use vector::{distance, perpendicular_unit_vector, Point3};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("zero vector has no perpendicular direction")]
    DegenerateVector,
    #[error("line through {start:?} and {end:?} has no direction")]
    DegenerateLine { start: Point3, end: Point3 },
}
