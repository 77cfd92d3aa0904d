use super::GeometryError;

/// A point or direction in simulation space.
pub type Point3 = [f64; 3];

/// Allowed deviation from 1.0 when checking that a vector is normalised.
pub const UNIT_NORM_TOLERANCE: f64 = 1e-9;

#[inline]
pub fn add(a: &Point3, b: &Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: &Point3, b: &Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(v: &Point3, s: f64) -> Point3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn dot(a: &Point3, b: &Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: &Point3, b: &Point3) -> Point3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(v: &Point3) -> f64 {
    dot(v, v).sqrt()
}

pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    add(a, &scale(&sub(b, a), 0.5))
}

pub fn is_finite(v: &Point3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Euclidean distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    norm(&sub(a, b))
}

/// Distance between two points using only their X/Y components.
pub fn planar_distance(a: &Point3, b: &Point3) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

pub fn is_unit(v: &Point3) -> bool {
    (norm(v) - 1.0).abs() < UNIT_NORM_TOLERANCE
}

/// Returns a unit vector orthogonal to `v`, lying in the X/Y plane whenever
/// `v` has a horizontal component.
///
/// A purely vertical `v` yields `(0, 1, 0)`; the zero vector has no
/// orthogonal direction and is rejected.
pub fn perpendicular_unit_vector(v: &Point3) -> Result<Point3, GeometryError> {
    if v[0] == 0.0 && v[1] == 0.0 {
        if v[2] == 0.0 {
            return Err(GeometryError::DegenerateVector);
        }
        return Ok([0.0, 1.0, 0.0]);
    }

    let flat = [-v[1], v[0], 0.0];
    let unit = scale(&flat, 1.0 / norm(&flat));
    debug_assert!(is_unit(&unit), "perpendicular vector is not normalised");
    Ok(unit)
}
