pub mod catalog;
pub mod config;
pub mod data;
pub mod geometry;
pub mod report;
pub mod snare;

use serde::{Deserialize, Serialize};

use crate::geometry::{distance, Point3};
use crate::snare::DEFAULT_OM_RADIUS;

/// A named body or station from the location catalog.
///
/// Field names follow the catalog JSON so records deserialize directly.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(rename = "InternalName")]
    pub internal_name: String,
    #[serde(rename = "ObjectContainer", default)]
    pub object_container: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "System", default)]
    pub system: String,
    #[serde(rename = "XCoord")]
    pub x: f64,
    #[serde(rename = "YCoord")]
    pub y: f64,
    #[serde(rename = "ZCoord")]
    pub z: f64,
    /// Radius of the physics grid around the body.
    #[serde(rename = "GRIDRadius", default)]
    pub grid_radius: f64,
    #[serde(rename = "OrbitalMarkerRadius", default)]
    pub orbital_marker_radius: Option<f64>,
}

impl Location {
    pub fn position(&self) -> Point3 {
        [self.x, self.y, self.z]
    }

    pub fn distance(&self, other: &Location) -> f64 {
        distance(&self.position(), &other.position())
    }

    pub fn distance_to_point(&self, p: Point3) -> f64 {
        distance(&self.position(), &p)
    }

    /// Orbital marker radius, falling back to [`DEFAULT_OM_RADIUS`] when the
    /// catalog has none (or zero).
    pub fn effective_om_radius(&self) -> f64 {
        match self.orbital_marker_radius {
            Some(r) if r > 0.0 => r,
            _ => DEFAULT_OM_RADIUS,
        }
    }

    /// Human-readable name used for lookups and reports.
    pub fn display_name(&self) -> String {
        let container = self.object_container.trim();
        match self.kind.as_str() {
            "RestStop" | "Refinery Station" | "Naval Station" => {
                let name = self.internal_name.replace("Station", "");
                format!("{} - {}", name.trim(), container).trim().to_string()
            }
            "Moon" | "Planet" => container.to_string(),
            _ => format!("{} - {}", self.internal_name.trim(), container)
                .trim()
                .to_string(),
        }
    }
}
