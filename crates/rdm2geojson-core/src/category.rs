// crates/rdm2geojson-core/src/category.rs

//! # Instance Categories
//!
//! The closed set of RDM instance kinds that can be exported. Each variant
//! carries everything the pipeline needs to know about it: which `type`
//! values select it in the `instance` table, how its stored area is shaped,
//! and which GeoJSON geometry it turns into.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Quest,
    Raid,
    Iv,
}

/// Output geometry of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    /// `area` is a list of rings; only the first ring is exported.
    Polygon,
    /// `area` is a flat list of circle centres.
    MultiPoint,
}

impl Category {
    /// Processing order of the pipeline.
    pub const ALL: [Category; 3] = [Category::Quest, Category::Raid, Category::Iv];

    /// Value written to `properties.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Quest => "quest",
            Category::Raid => "raid",
            Category::Iv => "iv",
        }
    }

    /// Literal values of `instance.type` belonging to this category.
    pub fn instance_types(self) -> &'static [&'static str] {
        match self {
            Category::Quest => &["auto_quest"],
            Category::Raid => &["circle_smart_raid", "circle_raid"],
            Category::Iv => &["circle_pokemon"],
        }
    }

    /// SQL predicate on the `type` column.
    ///
    /// Built only from the static literals above, never from user input.
    pub fn type_clause(self) -> String {
        match self.instance_types() {
            [single] => format!("`type` = '{single}'"),
            many => {
                let list = many
                    .iter()
                    .map(|t| format!("'{t}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("`type` IN ({list})")
            }
        }
    }

    pub fn geometry_kind(self) -> GeometryKind {
        match self {
            Category::Quest => GeometryKind::Polygon,
            Category::Raid | Category::Iv => GeometryKind::MultiPoint,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
