use clap::Parser;
use rdm2geojson_core::Selection;
use std::path::PathBuf;

/// CLI arguments for rdm2geojson
#[derive(Debug, Parser)]
#[command(
    name = "rdm2geojson",
    version,
    about = "Export RDM quest, raid and IV instances as a GeoJSON FeatureCollection"
)]
pub struct CliArgs {
    /// Process Quest instances
    #[arg(short = 'q', long = "quest")]
    pub quest: bool,

    /// Process Raid instances
    #[arg(short = 'r', long = "raid")]
    pub raid: bool,

    /// Process IV instances
    #[arg(short = 'i', long = "iv")]
    pub iv: bool,

    /// Include the features from the customs directory
    #[arg(short = 'c', long = "customs")]
    pub customs: bool,

    /// Output filepath
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Path to the YAML config
    #[arg(long = "config", default_value = "config.yml")]
    pub config: PathBuf,

    /// Directory holding custom feature documents
    #[arg(long = "customs-dir", default_value = "customs")]
    pub customs_dir: PathBuf,
}

impl CliArgs {
    pub fn selection(&self) -> Selection {
        Selection {
            quest: self.quest,
            raid: self.raid,
            iv: self.iv,
            customs: self.customs,
        }
    }
}
