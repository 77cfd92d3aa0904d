use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ContainmentError, SnarePlan, BISECTION_TOLERANCE, SNARE_RADIUS};
use crate::geometry::vector::planar_distance;
use crate::geometry::{closest_point_on_line, distance, is_left_of, line_distance, Point3};

/// Which way to move, as seen when facing the destination with up pointing
/// to simulation north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub magnitude: f64,
    pub direction: Direction,
}

/// Evaluation of a candidate snare position against a [`SnarePlan`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub destination_distance: f64,
    pub centerline_distance: f64,
    /// Negative inside the snare cone.
    pub snare_cone_margin: f64,
    pub vertical: Correction,
    pub lateral: Correction,
    pub along_centerline: Correction,
    pub closest_edge: f64,
    /// Nominally 0 to 10, deliberately unclamped.
    pub location_score: f64,
}

impl Route {
    pub fn within_snare_cone(&self) -> bool {
        self.snare_cone_margin <= 0.0
    }
}

impl SnarePlan {
    /// Scores `candidate` as a snare position for this plan.
    ///
    /// Positions inside the destination's physics grid are rejected.
    pub fn score(&self, candidate: Point3) -> Result<Route, ContainmentError> {
        let destination = self.destination();
        let destination_point = destination.position();
        let grid_radius = destination.grid_radius;

        let destination_distance = destination.distance_to_point(candidate);
        if destination_distance < grid_radius {
            return Err(ContainmentError::WithinPhysicsGrid {
                distance: destination_distance,
                grid_radius,
            });
        }

        let route_line = self.route_line();
        let closest = closest_point_on_line(route_line, &candidate);
        let centerline_distance = line_distance(route_line, &candidate);
        let max_coverage_at_point = SNARE_RADIUS - line_distance(self.hypotenuse(), &closest);
        let snare_cone_margin = centerline_distance - max_coverage_at_point;

        let vertical = Correction {
            magnitude: (closest[2] - candidate[2]).abs(),
            direction: if closest[2] > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            },
        };
        let lateral = Correction {
            magnitude: planar_distance(&closest, &candidate),
            direction: if is_left_of(route_line, &candidate) {
                Direction::Right
            } else {
                Direction::Left
            },
        };
        let along = distance(&closest, &destination_point) - self.optimal_pullout_distance();
        let along_centerline = Correction {
            magnitude: along.abs(),
            direction: if along > 0.0 {
                Direction::Forward
            } else {
                Direction::Backward
            },
        };

        let closest_edge = f64::min(
            SNARE_RADIUS - line_distance(self.hypotenuse(), &candidate),
            destination_distance - grid_radius,
        );
        // Plans without full coverage put the optimal pullout on the grid edge.
        let span = (self.optimal_pullout_distance() - grid_radius).max(BISECTION_TOLERANCE);
        let location_score = closest_edge / span * 10.0;

        Ok(Route {
            destination_distance,
            centerline_distance,
            snare_cone_margin,
            vertical,
            lateral,
            along_centerline,
            closest_edge,
            location_score,
        })
    }
}
