//! Snare placement planning and scoring of candidate positions.

pub mod plan;
pub mod route;

use thiserror::Error;

use crate::geometry::GeometryError;

pub use plan::{PlanSummary, SnarePlan};
pub use route::{Correction, Direction, Route};

/// Radius a single snare is guaranteed to cover.
pub const SNARE_RADIUS: f64 = 20_000.0;

/// Orbital marker radius assumed for sources without one.
pub const DEFAULT_OM_RADIUS: f64 = 20_000.0;

/// Smallest orbital marker radius accepted when a location specifies one.
/// Anything tighter collapses the worst-case line onto the centerline.
pub const MIN_OM_RADIUS: f64 = 1_000.0;

/// Bisection stops once the bracketing points are this close.
pub const BISECTION_TOLERANCE: f64 = 0.01;

pub const MAX_BISECTION_ITERATIONS: usize = 200;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("invalid planning input: {0}")]
    InvalidInput(#[from] GeometryError),
    #[error("location {name} has an invalid {field}")]
    InvalidLocation { name: String, field: &'static str },
    #[error(
        "physics grid of {destination} ({grid_radius}) reaches past \
         the centerline length {centerline_length}"
    )]
    GridExceedsCenterline {
        destination: String,
        grid_radius: f64,
        centerline_length: f64,
    },
    #[error("{search} search did not converge within {iterations} iterations")]
    NoConvergence {
        search: &'static str,
        iterations: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContainmentError {
    #[error(
        "position is {distance} from the destination, inside its physics grid of {grid_radius}"
    )]
    WithinPhysicsGrid { distance: f64, grid_radius: f64 },
}
