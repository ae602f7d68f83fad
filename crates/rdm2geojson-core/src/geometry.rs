// crates/rdm2geojson-core/src/geometry.rs

//! # Geometry Extractor
//!
//! Converts one raw `instance` row into one GeoJSON [`Feature`].
//!
//! The stored `data` document always has an `area` key, but its shape
//! depends on the category:
//!
//! - **quest:** `{"area": [[{"lat":..,"lon":..}, ...], ...]}` (list of
//!   rings, only the first one is used)
//! - **raid / iv:** `{"area": [{"lat":..,"lon":..}, ...]}` (circle centres)
//!
//! Coordinates are emitted as `[lon, lat]`, rounded to the configured
//! precision. Anything that does not match the expected shape is an error
//! for the whole row; nothing is emitted partially.

use crate::category::{Category, GeometryKind};
use crate::config::ReplaceRule;
use crate::error::{ExportError, Result};
use crate::source::InstanceRow;
use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One stored point. Extra keys (radius etc.) are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
struct AreaPoint {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct InstanceData<A> {
    area: A,
}

type Rings = Vec<Vec<AreaPoint>>;
type Points = Vec<AreaPoint>;

/// Rounds `value` to `precision` decimal digits.
///
/// Correctly rounded on the exact binary value; exact ties go to the even
/// digit (`0.125` -> `0.12`, while `117.9965`, stored just below the tie,
/// -> `117.996`).
#[inline]
pub fn round_coordinate(value: f64, precision: u32) -> f64 {
    format!("{:.*}", precision as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Applies `rules` in order, each replacing every literal occurrence of its
/// pattern in the result of the previous one.
///
/// ```
/// use rdm2geojson_core::{rename, ReplaceRule};
///
/// let rules = [ReplaceRule::new("A", "B"), ReplaceRule::new("B", "C")];
/// assert_eq!(rename("A", &rules), "C");
/// ```
pub fn rename(name: &str, rules: &[ReplaceRule]) -> String {
    rules.iter().fold(name.to_owned(), |acc, rule| {
        acc.replace(&rule.pattern, &rule.replacement)
    })
}

/// Builds the feature for `row`.
pub fn extract_feature(
    category: Category,
    row: &InstanceRow,
    precision: u32,
    rules: &[ReplaceRule],
) -> Result<Feature> {
    let value = match category.geometry_kind() {
        GeometryKind::Polygon => {
            let rings: Rings = parse_area(category, row)?;
            let first = rings
                .into_iter()
                .next()
                .ok_or_else(|| malformed(category, row, "area has no rings".to_string()))?;
            Value::Polygon(vec![to_positions(&first, precision)])
        }
        GeometryKind::MultiPoint => {
            let points: Points = parse_area(category, row)?;
            Value::MultiPoint(to_positions(&points, precision))
        }
    };

    let mut properties = JsonObject::new();
    properties.insert(
        "name".to_string(),
        JsonValue::String(rename(&row.name, rules)),
    );
    properties.insert(
        "type".to_string(),
        JsonValue::String(category.as_str().to_string()),
    );
    properties.insert(
        "original_name".to_string(),
        JsonValue::String(row.name.clone()),
    );

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

fn parse_area<A: DeserializeOwned>(category: Category, row: &InstanceRow) -> Result<A> {
    let data = row
        .data
        .as_deref()
        .ok_or_else(|| malformed(category, row, "instance has no data".to_string()))?;

    serde_json::from_str::<InstanceData<A>>(data)
        .map(|d| d.area)
        .map_err(|e| malformed(category, row, e.to_string()))
}

fn to_positions(points: &[AreaPoint], precision: u32) -> Vec<Vec<f64>> {
    points
        .iter()
        .map(|p| {
            vec![
                round_coordinate(p.lon, precision),
                round_coordinate(p.lat, precision),
            ]
        })
        .collect()
}

fn malformed(category: Category, row: &InstanceRow, reason: String) -> ExportError {
    ExportError::MalformedArea {
        category,
        name: row.name.clone(),
        reason,
    }
}
