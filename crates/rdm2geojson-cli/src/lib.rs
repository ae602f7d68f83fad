//! rdm2geojson-cli
//! ===============
//!
//! Command-line front end for [`rdm2geojson-core`]: exports the geofences
//! of an RDM database as one GeoJSON `FeatureCollection` file.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cp config.example.yml config.yml   # fill in database + filters
//! rdm2geojson -q -r -i -c -o areas.geojson
//! ```
//!
//! The binary is the primary deliverable. This library target holds the
//! argument parsing, logging setup and the [`run`] flow so they can be
//! tested without a database.
//!
//! [`rdm2geojson-core`]: rdm2geojson_core
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;
pub mod logging;

use crate::args::CliArgs;
use anyhow::Context;
use rdm2geojson_core::{export, write_collection, Config, ExportStats, InstanceSource};
use tracing::info;

/// One full export: build the collection, then write it to `args.output`.
///
/// The output file is only created once the whole collection exists, so
/// any earlier failure leaves the destination untouched.
pub fn run<S, F>(args: &CliArgs, config: &Config, connect: F) -> anyhow::Result<ExportStats>
where
    S: InstanceSource,
    F: FnOnce() -> rdm2geojson_core::Result<S>,
{
    info!("rdm2geojson started");
    let selection = args.selection();
    info!(
        "Processing... Q {} R {} I {} C {}",
        selection.quest, selection.raid, selection.iv, selection.customs
    );

    let (collection, stats) =
        export(config, &selection, &args.customs_dir, connect).context("exporting instances")?;
    info!(
        customs = stats.customs,
        quest = stats.quest,
        raid = stats.raid,
        iv = stats.iv,
        "Fetched SQL data"
    );

    write_collection(&args.output, &collection).context("writing output")?;
    info!("Saved output to {}", args.output.display());

    Ok(stats)
}
