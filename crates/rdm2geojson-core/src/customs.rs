// crates/rdm2geojson-core/src/customs.rs

//! # Custom Feature Loader
//!
//! Hand-authored features that bypass the database. Every regular file in
//! the customs directory is a JSON document with a `features` array of
//! ready-made GeoJSON features (usually a full `FeatureCollection`); the
//! arrays are concatenated in directory order and passed through as-is:
//! features stay raw JSON and are never re-modelled.

use crate::error::{ExportError, Result};
use geojson::JsonValue;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Placeholder that keeps an otherwise empty directory in git.
const KEEP_FILE_SUFFIX: &str = ".gitkeep";

#[derive(Debug, Deserialize)]
struct CustomDocument {
    features: Vec<JsonValue>,
}

/// Loads every feature from the documents in `dir`.
///
/// - directories and `.gitkeep` files are skipped
/// - a missing directory counts as empty
/// - a file that is not a valid document fails the whole load
pub fn load_custom_features(dir: impl AsRef<Path>) -> Result<Vec<JsonValue>> {
    let dir = dir.as_ref();
    let io_err = |source| ExportError::CustomsIo {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "customs directory not found, no custom features loaded");
            return Ok(Vec::new());
        }
        Err(e) => return Err(io_err(e)),
    };

    let mut features = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();

        // Follows symlinks, like a plain open() would.
        let is_file = std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        let is_keep_file = path.to_string_lossy().ends_with(KEEP_FILE_SUFFIX);
        if !is_file || is_keep_file {
            debug!(path = %path.display(), "skipping customs entry");
            continue;
        }

        let document = read_document(&path)?;
        debug!(path = %path.display(), count = document.features.len(), "loaded custom features");
        features.extend(document.features);
    }

    Ok(features)
}

fn read_document(path: &Path) -> Result<CustomDocument> {
    let file = File::open(path).map_err(|source| ExportError::CustomsIo {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ExportError::MalformedCustomFeatures {
        path: path.to_path_buf(),
        source,
    })
}
