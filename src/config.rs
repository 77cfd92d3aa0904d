use std::env;
use std::path::PathBuf;

use crate::catalog::CatalogFilter;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.bin";

/// Settings shared by the binaries, read from the environment.
///
/// | variable | meaning |
/// |---|---|
/// | `SNARE_CATALOG_PATH` | catalog bundle, or raw JSON when it ends in `.json` |
/// | `SNARE_SYSTEM` | system whose locations are kept |
/// | `SNARE_TYPE_BLACKLIST` | comma-separated location types to drop |
/// | `SNARE_NAME_BLACKLIST` | comma-separated internal-name fragments to drop |
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub catalog_path: PathBuf,
    pub filter: CatalogFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            filter: CatalogFilter::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();
        if let Some(path) = lookup("SNARE_CATALOG_PATH").filter(|p| !p.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path.trim());
        }
        if let Some(system) = lookup("SNARE_SYSTEM").filter(|s| !s.trim().is_empty()) {
            config.filter.system = system.trim().to_string();
        }
        if let Some(list) = lookup("SNARE_TYPE_BLACKLIST") {
            config.filter.type_blacklist = split_list(&list);
        }
        if let Some(list) = lookup("SNARE_NAME_BLACKLIST") {
            config.filter.name_blacklist = split_list(&list);
        }
        config
    }

    pub fn catalog_is_json(&self) -> bool {
        self.catalog_path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
