pub mod catalog;

pub use catalog::{CatalogError, CatalogFilter, LocationCatalog};
