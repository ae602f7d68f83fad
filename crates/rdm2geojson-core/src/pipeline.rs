// crates/rdm2geojson-core/src/pipeline.rs

//! # Pipeline
//!
//! Sequences one export run:
//!
//! 1. custom features (if selected)
//! 2. open one database session
//! 3. quest, raid, iv (each if selected), in that fixed order
//! 4. close the session
//!
//! Rows are appended in the order the source returns them, so the output
//! order is fully determined by the inputs.

use crate::category::Category;
use crate::common::ExportStats;
use crate::config::Config;
use crate::customs::load_custom_features;
use crate::error::Result;
use crate::geometry::extract_feature;
use crate::output::FeatureCollection;
use crate::source::InstanceSource;
use geojson::Feature;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to put in the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub quest: bool,
    pub raid: bool,
    pub iv: bool,
    pub customs: bool,
}

impl Selection {
    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Quest => self.quest,
            Category::Raid => self.raid,
            Category::Iv => self.iv,
        }
    }
}

/// Runs the export and returns the assembled collection.
///
/// `connect` is called exactly once, after the customs are loaded. Once
/// it succeeds the session is closed on every path, including when a
/// query or a row fails; the first error wins.
pub fn export<S, F>(
    config: &Config,
    selection: &Selection,
    customs_dir: &Path,
    connect: F,
) -> Result<(FeatureCollection, ExportStats)>
where
    S: InstanceSource,
    F: FnOnce() -> Result<S>,
{
    let started = Instant::now();
    let mut stats = ExportStats::default();

    let mut collection = if selection.customs {
        let customs = load_custom_features(customs_dir)?;
        info!(count = customs.len(), dir = %customs_dir.display(), "loaded custom features");
        FeatureCollection::new(customs)
    } else {
        FeatureCollection::default()
    };
    stats.customs = collection.features.len();

    let mut source = connect()?;
    let extracted = extract_selected(config, selection, &mut source, &mut collection, &mut stats);
    let closed = source.close();

    if let Err(e) = extracted {
        if let Err(close_err) = closed {
            warn!(error = %close_err, "failed to close database session");
        }
        return Err(e);
    }
    closed?;

    debug!(elapsed = ?started.elapsed(), "export finished");

    Ok((collection, stats))
}

fn extract_selected<S: InstanceSource>(
    config: &Config,
    selection: &Selection,
    source: &mut S,
    collection: &mut FeatureCollection,
    stats: &mut ExportStats,
) -> Result<()> {
    let precision = config.app.precision;

    for category in Category::ALL {
        if !selection.includes(category) {
            continue;
        }

        let filter = config.filters.get(category);
        let rows = source.fetch(category, &filter.enabled)?;
        debug!(%category, rows = rows.len(), pattern = %filter.enabled, "fetched instances");

        // Extract the whole batch first so a bad row leaves nothing behind.
        let batch = rows
            .iter()
            .map(|row| extract_feature(category, row, precision, &filter.replace))
            .collect::<Result<Vec<Feature>>>()?;

        stats.record(category, batch.len());
        for feature in &batch {
            collection.push_feature(feature);
        }
    }

    Ok(())
}
