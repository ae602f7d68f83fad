//! rdm2geojson — export RDM instances as GeoJSON
//!
//! Reads the `instance` table of an RDM database and writes one GeoJSON
//! `FeatureCollection`: quest areas as polygons, raid and IV circles as
//! multi-points, optionally prefixed by the hand-made features found in
//! the customs directory.
//!
//! Usage examples
//! --------------
//!
//! - Everything, including customs
//!   $ rdm2geojson -q -r -i -c -o areas.geojson
//!
//! - Only IV circles, with a non-default config
//!   $ rdm2geojson --config /etc/rdm2geojson.yml -i -o iv.geojson
//!
//! - Customs only (the database is still opened, but nothing is queried)
//!   $ rdm2geojson -c -o customs.geojson
//!
//! Any failure (config, database, malformed area data, malformed custom
//! file, write) exits non-zero and leaves no output file behind.
use anyhow::Context;
use clap::Parser;
use rdm2geojson_cli::args::CliArgs;
use rdm2geojson_cli::{logging, run};
use rdm2geojson_core::Config;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = Config::load_from_path(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    logging::init(config.app.log_level);

    run(&args, &config, || connect(&config))?;
    Ok(())
}

#[cfg(feature = "mysql")]
fn connect(config: &Config) -> rdm2geojson_core::Result<rdm2geojson_core::MySqlSource> {
    rdm2geojson_core::MySqlSource::connect(&config.database)
}

#[cfg(not(feature = "mysql"))]
fn connect(_config: &Config) -> rdm2geojson_core::Result<rdm2geojson_core::MemorySource> {
    Err(rdm2geojson_core::ExportError::DatabaseConnection(
        "built without the `mysql` feature".to_string(),
    ))
}
