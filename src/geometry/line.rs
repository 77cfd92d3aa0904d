use serde::{Deserialize, Serialize};

use super::vector::{add, cross, dot, is_finite, norm, scale, sub, Point3};
use super::GeometryError;

/// An infinite line through two distinct points.
///
/// The constructor rejects coincident points, so every operation here can
/// divide by the line length without checking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    start: Point3,
    end: Point3,
}

impl Line3 {
    pub fn new(start: Point3, end: Point3) -> Result<Self, GeometryError> {
        if !is_finite(&start) || !is_finite(&end) || norm(&sub(&end, &start)) == 0.0 {
            return Err(GeometryError::DegenerateLine { start, end });
        }
        Ok(Line3 { start, end })
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    pub fn direction(&self) -> Point3 {
        sub(&self.end, &self.start)
    }

    pub fn length(&self) -> f64 {
        norm(&self.direction())
    }
}

/// Perpendicular distance from `point` to the infinite line.
pub fn line_distance(line: &Line3, point: &Point3) -> f64 {
    let d = line.direction();
    norm(&cross(&d, &sub(&line.start, point))) / norm(&d)
}

/// Projection of `point` onto the infinite line. Points beyond either end
/// project outside the segment.
pub fn closest_point_on_line(line: &Line3, point: &Point3) -> Point3 {
    let d = line.direction();
    let a = dot(&sub(point, &line.start), &d) / dot(&d, &d);
    add(&line.start, &scale(&d, a))
}

/// Whether `point` is on or to the left of the line when viewed from above
/// (only X/Y are considered).
pub fn is_left_of(line: &Line3, point: &Point3) -> bool {
    let [ax, ay, _] = line.start;
    let [bx, by, _] = line.end;
    let val = (bx - ax) * (point[1] - ay) - (by - ay) * (point[0] - ax);
    val >= 0.0
}
