use std::fs;
use std::io::Cursor;
use std::path::Path;

use bincode::ErrorKind;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::LocationCatalog;

/// Compression level used when encoding serialized catalog bundles.
///
/// Bundles are written once by `build_catalog` and read at every cold start,
/// so the slowest level is fine.
const CATALOG_COMPRESSION_LEVEL: i32 = 19;

/// Bumped whenever the bincode layout of `Location` changes.
pub const CATALOG_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] Box<ErrorKind>),
    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),
    #[error("catalog bundle has format version {found}, expected {expected}; rebuild it")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Serialize)]
struct BundleRef<'a> {
    version: u32,
    catalog: &'a LocationCatalog,
}

#[derive(Deserialize)]
struct Bundle {
    version: u32,
    catalog: LocationCatalog,
}

pub fn serialize_catalog(catalog: &LocationCatalog) -> Result<Vec<u8>, DataError> {
    let encoded = bincode::serialize(&BundleRef {
        version: CATALOG_FORMAT_VERSION,
        catalog,
    })?;
    let mut cursor = Cursor::new(encoded);
    zstd::stream::encode_all(&mut cursor, CATALOG_COMPRESSION_LEVEL)
        .map_err(DataError::Compression)
}

pub fn deserialize_catalog(bytes: &[u8]) -> Result<LocationCatalog, DataError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = zstd::stream::decode_all(&mut cursor).map_err(DataError::Compression)?;
    // The version leads the encoding, so read it alone before trusting the rest.
    let version: u32 = bincode::deserialize(&decoded)?;
    if version != CATALOG_FORMAT_VERSION {
        return Err(DataError::UnsupportedVersion {
            found: version,
            expected: CATALOG_FORMAT_VERSION,
        });
    }
    let Bundle {
        version,
        mut catalog,
    } = bincode::deserialize(&decoded)?;
    catalog.rebuild_indices();
    debug!(
        "loaded v{} catalog bundle with {} locations",
        version,
        catalog.len()
    );
    Ok(catalog)
}

pub fn write_catalog_to_file<P: AsRef<Path>>(
    catalog: &LocationCatalog,
    path: P,
) -> Result<(), DataError> {
    let bytes = serialize_catalog(catalog)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<LocationCatalog, DataError> {
    let bytes = fs::read(path)?;
    deserialize_catalog(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn catalog() -> LocationCatalog {
        LocationCatalog::new(vec![Location {
            internal_name: "Stanton2".into(),
            object_container: "Crusader".into(),
            kind: "Planet".into(),
            system: "Stanton".into(),
            x: -18_962_176_000.0,
            y: -2_664_960_000.0,
            z: 0.0,
            grid_radius: 7_450_000.0,
            orbital_marker_radius: None,
        }])
    }

    #[test]
    fn bundle_restores_name_index() {
        let bytes = serialize_catalog(&catalog()).expect("serializes");
        let restored = deserialize_catalog(&bytes).expect("deserializes");
        assert_eq!(restored.locations, catalog().locations);
        assert_eq!(restored.index_of_name("Crusader"), Some(0));
    }

    #[test]
    fn bundle_from_another_format_version_is_rejected() {
        let stale = catalog();
        let encoded = bincode::serialize(&BundleRef {
            version: CATALOG_FORMAT_VERSION + 1,
            catalog: &stale,
        })
        .expect("serializes");
        let bytes = zstd::stream::encode_all(Cursor::new(encoded), 1).expect("compresses");

        let err = deserialize_catalog(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DataError::UnsupportedVersion { found, expected }
                if found == CATALOG_FORMAT_VERSION + 1 && expected == CATALOG_FORMAT_VERSION
        ));
    }

    #[test]
    fn garbage_is_a_compression_error() {
        let err = deserialize_catalog(b"definitely not zstd").unwrap_err();
        assert!(matches!(err, DataError::Compression(_)));
    }
}
