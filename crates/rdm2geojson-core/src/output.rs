// crates/rdm2geojson-core/src/output.rs

use crate::error::{ExportError, Result};
use geojson::{Feature, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The exported document: `{"type":"FeatureCollection","features":[...]}`.
///
/// Features are kept as raw JSON so custom features pass through exactly
/// as authored (integer coordinates, unknown members, key order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<JsonValue>,
}

impl FeatureCollection {
    pub fn new(features: Vec<JsonValue>) -> Self {
        Self { features }
    }

    /// Appends a feature built by the extractor.
    pub fn push_feature(&mut self, feature: &Feature) {
        self.features
            .push(JsonValue::Object(JsonObject::from(feature)));
    }
}

/// Writes `collection` as compact JSON to `path`, replacing any existing file.
pub fn write_collection(path: impl AsRef<Path>, collection: &FeatureCollection) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ExportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    // Serialize fully before touching the file.
    let bytes = serde_json::to_vec(collection).map_err(|e| write_err(e.into()))?;
    std::fs::write(path, bytes).map_err(write_err)
}
