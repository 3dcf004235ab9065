//! # plan-catalog
//!
//! The vGPU profile catalog: authoritative reference data for which profile
//! names are valid for which GPU models, and their capacity limits.
//!
//! The catalog is loaded once at process start (from a YAML file or from the
//! builtin reference data) and is read-only thereafter; concurrent lookups
//! need no locking. Malformed records are rejected at load time as a whole -
//! there is no partial-catalog degraded mode.
//!
//! ## Example
//!
//! ```rust
//! use plan_catalog::ProfileCatalog;
//! use plan_core::GpuModel;
//!
//! let catalog = ProfileCatalog::builtin().unwrap();
//! let profile = catalog.best_fit(&GpuModel::new("A40"), 8).unwrap();
//! assert_eq!(profile.name, "A40-8Q");
//! ```

pub mod catalog;
pub mod schema;

pub use catalog::ProfileCatalog;
pub use schema::{CatalogDocument, GpuSpecRecord};
