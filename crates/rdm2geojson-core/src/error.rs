// crates/rdm2geojson-core/src/error.rs

use crate::category::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure an export run can hit.
///
/// None of these are recovered from: the first error aborts the run and
/// no output file is written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("database connection failed: {0}")]
    DatabaseConnection(String),

    #[error("{category} query failed: {message}")]
    Query { category: Category, message: String },

    #[error("malformed area data for {category} instance '{name}': {reason}")]
    MalformedArea {
        category: Category,
        name: String,
        reason: String,
    },

    #[error("malformed custom feature file {}: {source}", path.display())]
    MalformedCustomFeatures {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read customs {}: {source}", path.display())]
    CustomsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
