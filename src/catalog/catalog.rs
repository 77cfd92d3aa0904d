use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Location;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed location catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown location {0:?}")]
    UnknownLocation(String),
}

/// Which catalog entries are usable as snare endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub system: String,
    /// Location types that are never offered.
    pub type_blacklist: Vec<String>,
    /// Internal-name fragments that exclude a location.
    pub name_blacklist: Vec<String>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        CatalogFilter {
            system: "Stanton".into(),
            type_blacklist: ["Star", "Lagrange", "JumpPoint", "Lagrange Point", "Naval Station"]
                .into_iter()
                .map(String::from)
                .collect(),
            name_blacklist: ["-L5-", "-L4-", "ARC-L3-A"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl CatalogFilter {
    pub fn accepts(&self, location: &Location) -> bool {
        location.system == self.system
            && !self.type_blacklist.iter().any(|t| *t == location.kind)
            && !self
                .name_blacklist
                .iter()
                .any(|fragment| location.internal_name.contains(fragment.as_str()))
    }
}

/// Locations addressable by display name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationCatalog {
    pub locations: Vec<Location>,
    #[serde(skip)]
    name_index: HashMap<String, usize>,
}

impl LocationCatalog {
    pub fn new(locations: Vec<Location>) -> Self {
        let mut catalog = LocationCatalog {
            locations,
            name_index: HashMap::new(),
        };
        catalog.rebuild_indices();
        catalog
    }

    /// Parses a raw catalog JSON array and keeps only entries accepted by `filter`.
    pub fn from_json_reader<R: Read>(
        reader: R,
        filter: &CatalogFilter,
    ) -> Result<Self, CatalogError> {
        let all: Vec<Location> = serde_json::from_reader(reader)?;
        let total = all.len();
        let locations: Vec<Location> = all.into_iter().filter(|l| filter.accepts(l)).collect();
        debug!(
            "kept {} of {} catalog locations for system {}",
            locations.len(),
            total,
            filter.system
        );
        Ok(Self::new(locations))
    }

    pub fn from_json_str(json: &str, filter: &CatalogFilter) -> Result<Self, CatalogError> {
        Self::from_json_reader(json.as_bytes(), filter)
    }

    pub fn from_json_file<P: AsRef<Path>>(
        path: P,
        filter: &CatalogFilter,
    ) -> Result<Self, CatalogError> {
        let file = fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file), filter)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Result<&Location, CatalogError> {
        self.index_of_name(name)
            .map(|idx| &self.locations[idx])
            .ok_or_else(|| CatalogError::UnknownLocation(name.to_string()))
    }

    pub fn display_names(&self) -> Vec<String> {
        self.locations.iter().map(Location::display_name).collect()
    }

    /// Distinct location types, sorted.
    pub fn location_types(&self) -> Vec<String> {
        self.locations
            .iter()
            .map(|l| l.kind.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First entry wins when two locations share a display name.
    pub fn rebuild_indices(&mut self) {
        self.name_index = HashMap::with_capacity(self.locations.len());
        for (idx, location) in self.locations.iter().enumerate() {
            self.name_index.entry(location.display_name()).or_insert(idx);
        }
    }
}
