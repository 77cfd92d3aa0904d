//! Helpers for turning engine values into text and back.

use thiserror::Error;

use crate::geometry::Point3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    #[error("expected 3 coordinates, found {0}")]
    MissingCoordinates(usize),
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

/// Formats a distance in metres, switching to kilometres above 1,000.
pub fn pretty_distance(value: f64) -> String {
    if value > 1_000.0 {
        format!("{} km", group_thousands(value / 1_000.0))
    } else {
        format!("{} m", group_thousands(value))
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.1}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "0"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.0" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Parses the output of the in-game `/showlocation` command, e.g.
/// `Coordinates: x:-18930546125.537 y:-2610043519.896 z:0.000`.
///
/// The leading label is ignored; every following token contributes the part
/// after its last `:`.
pub fn parse_show_location(text: &str) -> Result<Point3, ReportError> {
    let values = text
        .split_whitespace()
        .skip(1)
        .map(|token| {
            let raw = token.rsplit(':').next().unwrap_or(token);
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ReportError::InvalidCoordinate(token.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        other => Err(ReportError::MissingCoordinates(other.len())),
    }
}
