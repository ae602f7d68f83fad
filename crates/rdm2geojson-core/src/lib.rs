// crates/rdm2geojson-core/src/lib.rs

//! rdm2geojson-core
//! ================
//!
//! Turns the `instance` table of an RDM database into a GeoJSON
//! `FeatureCollection`: quest areas become polygons, raid and IV circles
//! become multi-points, and hand-authored features from a customs
//! directory can be prepended.
//!
//! The library is synchronous. The live MySQL reader (feature `mysql`)
//! owns a small runtime internally so callers never see async code.
//!
//! ```no_run
//! use rdm2geojson_core::{export, Config, MySqlSource, Selection};
//! use std::path::Path;
//!
//! # fn main() -> rdm2geojson_core::Result<()> {
//! let config = Config::load_from_path("config.yml")?;
//! let selection = Selection { quest: true, ..Selection::default() };
//! let (collection, stats) = export(&config, &selection, Path::new("customs"), || {
//!     MySqlSource::connect(&config.database)
//! })?;
//! println!("{} features", stats.total());
//! rdm2geojson_core::write_collection("out.geojson", &collection)?;
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod common;
pub mod config;
pub mod customs;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod source;

// Re-exports
pub use crate::category::Category;
pub use crate::common::ExportStats;
pub use crate::config::{
    AppConfig, CategoryFilter, Config, DatabaseConfig, Filters, LogLevel, ReplaceRule,
};
pub use crate::customs::load_custom_features;
pub use crate::error::{ExportError, Result};
pub use crate::geometry::{extract_feature, rename, round_coordinate};
pub use crate::output::{write_collection, FeatureCollection};
pub use crate::pipeline::{export, Selection};
pub use crate::source::{InstanceRow, InstanceSource, MemorySource};
#[cfg(feature = "mysql")]
pub use crate::source::MySqlSource;
