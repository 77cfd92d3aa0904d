use log::{debug, trace};
use serde::Serialize;

use super::{
    PlanError, BISECTION_TOLERANCE, MAX_BISECTION_ITERATIONS, MIN_OM_RADIUS, SNARE_RADIUS,
};
use crate::geometry::vector::{add, is_finite, midpoint, scale, sub};
use crate::geometry::{distance, line_distance, perpendicular_unit_vector, Line3, Point3};
use crate::Location;

/// Snare placement for travel from `source` to `destination`.
///
/// Built once per location pair by [`SnarePlan::new`] and never modified;
/// plan again if either location changes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnarePlan {
    source: Location,
    destination: Location,
    /// Line from source to destination.
    route_line: Line3,
    centerline: Point3,
    point_of_physics: Point3,
    hypotenuse: Line3,
    min_pullout_point: Point3,
    min_pullout_distance: f64,
    optimal_pullout_point: Point3,
    optimal_pullout_distance: f64,
    coverage: f64,
}

/// Figures a presentation layer needs to describe a plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanSummary {
    pub source: String,
    pub destination: String,
    pub coverage: f64,
    pub full_coverage: bool,
    pub centerline_length: f64,
    pub source_grid_radius: f64,
    pub destination_grid_radius: f64,
    pub min_pullout_distance: f64,
    pub optimal_pullout_distance: f64,
    /// How far off the centerline one may sit at the optimal pullout.
    pub optimal_leeway: f64,
    /// Distance from the optimal pullout to the destination's physics grid.
    pub optimal_grid_clearance: f64,
}

impl SnarePlan {
    pub fn new(source: Location, destination: Location) -> Result<Self, PlanError> {
        validate(&source, &destination)?;

        let source_point = source.position();
        let destination_point = destination.position();

        // Surfaces coincident endpoints before anything divides by their distance.
        let puv = perpendicular_unit_vector(&sub(&destination_point, &source_point))?;
        let route_line = Line3::new(source_point, destination_point)?;

        let centerline = sub(&source_point, &destination_point);
        let centerline_length = source.distance(&destination);
        if destination.grid_radius >= centerline_length {
            return Err(PlanError::GridExceedsCenterline {
                destination: destination.display_name(),
                grid_radius: destination.grid_radius,
                centerline_length,
            });
        }

        // Where the centerline enters the destination's physics grid.
        let point_of_physics = add(
            &destination_point,
            &scale(&centerline, destination.grid_radius / centerline_length),
        );

        // Worst case: a traveler leaving from an OM point perpendicular to
        // the centerline.
        let arbitrary_om_point =
            add(&source_point, &scale(&puv, source.effective_om_radius()));
        let hypotenuse = Line3::new(arbitrary_om_point, destination_point)?;

        // Earliest point still within snare range of the worst-case line.
        let min_pullout_point =
            bisect("earliest pullout", source_point, point_of_physics, |h| {
                line_distance(&hypotenuse, h) < SNARE_RADIUS
            })?;
        let min_pullout_distance = distance(&min_pullout_point, &destination_point);

        // Point where the remaining distance to the grid equals the remaining
        // leeway off the centerline.
        let optimal_pullout_point =
            bisect("optimal pullout", min_pullout_point, point_of_physics, |h| {
                let leeway = SNARE_RADIUS - line_distance(&hypotenuse, h);
                distance(h, &point_of_physics) <= leeway
            })?;
        let optimal_pullout_distance = distance(&optimal_pullout_point, &destination_point);

        // Ratio of disc areas, pi cancels.
        let point_of_physics_radius = line_distance(&hypotenuse, &point_of_physics);
        let coverage =
            (SNARE_RADIUS * SNARE_RADIUS) / (point_of_physics_radius * point_of_physics_radius);

        debug!(
            "planned snare {} -> {}: coverage {:.3}, earliest pullout {:.2}, optimal pullout {:.2}",
            source.display_name(),
            destination.display_name(),
            coverage,
            min_pullout_distance,
            optimal_pullout_distance
        );

        Ok(SnarePlan {
            source,
            destination,
            route_line,
            centerline,
            point_of_physics,
            hypotenuse,
            min_pullout_point,
            min_pullout_distance,
            optimal_pullout_point,
            optimal_pullout_distance,
            coverage,
        })
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn route_line(&self) -> &Line3 {
        &self.route_line
    }

    /// Source minus destination.
    pub fn centerline(&self) -> Point3 {
        self.centerline
    }

    pub fn centerline_length(&self) -> f64 {
        self.route_line.length()
    }

    pub fn point_of_physics(&self) -> Point3 {
        self.point_of_physics
    }

    pub fn hypotenuse(&self) -> &Line3 {
        &self.hypotenuse
    }

    pub fn min_pullout_point(&self) -> Point3 {
        self.min_pullout_point
    }

    pub fn min_pullout_distance(&self) -> f64 {
        self.min_pullout_distance
    }

    pub fn optimal_pullout_point(&self) -> Point3 {
        self.optimal_pullout_point
    }

    pub fn optimal_pullout_distance(&self) -> f64 {
        self.optimal_pullout_distance
    }

    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// A single snare can catch every approach angle.
    pub fn has_full_coverage(&self) -> bool {
        self.coverage >= 1.0
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            source: self.source.display_name(),
            destination: self.destination.display_name(),
            coverage: self.coverage,
            full_coverage: self.has_full_coverage(),
            centerline_length: self.centerline_length(),
            source_grid_radius: self.source.grid_radius,
            destination_grid_radius: self.destination.grid_radius,
            min_pullout_distance: self.min_pullout_distance,
            optimal_pullout_distance: self.optimal_pullout_distance,
            optimal_leeway: SNARE_RADIUS
                - line_distance(&self.hypotenuse, &self.optimal_pullout_point),
            optimal_grid_clearance: distance(
                &self.optimal_pullout_point,
                &self.point_of_physics,
            ),
        }
    }
}

fn validate(source: &Location, destination: &Location) -> Result<(), PlanError> {
    for loc in [source, destination] {
        if !is_finite(&loc.position()) {
            return Err(PlanError::InvalidLocation {
                name: loc.display_name(),
                field: "position",
            });
        }
    }
    if !destination.grid_radius.is_finite() || destination.grid_radius < 0.0 {
        return Err(PlanError::InvalidLocation {
            name: destination.display_name(),
            field: "GRIDRadius",
        });
    }
    // Zero and negative radii fall back to the default instead.
    let om_too_tight = |r: f64| !r.is_finite() || (r > 0.0 && r < MIN_OM_RADIUS);
    if matches!(source.orbital_marker_radius, Some(r) if om_too_tight(r)) {
        return Err(PlanError::InvalidLocation {
            name: source.display_name(),
            field: "OrbitalMarkerRadius",
        });
    }
    Ok(())
}

/// Bisects between `start` and `end`, moving `end` onto every candidate that
/// satisfies `reached` and `start` onto every candidate that does not. Returns the
/// last candidate once the bracket is within [`BISECTION_TOLERANCE`].
fn bisect<F>(
    search: &'static str,
    start: Point3,
    end: Point3,
    reached: F,
) -> Result<Point3, PlanError>
where
    F: Fn(&Point3) -> bool,
{
    let mut sp = start;
    let mut dp = end;
    let mut candidate = midpoint(&sp, &dp);
    let mut iterations = 0;

    while distance(&sp, &dp) > BISECTION_TOLERANCE {
        if iterations == MAX_BISECTION_ITERATIONS {
            return Err(PlanError::NoConvergence { search, iterations });
        }
        candidate = midpoint(&sp, &dp);
        if reached(&candidate) {
            dp = candidate;
        } else {
            sp = candidate;
        }
        iterations += 1;
    }

    trace!("{} search converged after {} iterations", search, iterations);
    Ok(candidate)
}
