//! Command-line configuration for the `bgrid` binary.
//!
//! Every subcommand shares the global options below; the word-list directory
//! can also be set through the environment:
//!
//! - `BGRID_WORDLIST_DIR` - directory holding `bip39-<code>.json` files (default: bip39-wordlist)

use crate::geom::GeometryFormat;
use crate::index::{DEFAULT_MAX_LEVEL, GridPath};
use crate::wordlist::{DEFAULT_WORDLIST_DIR, Language};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default number of levels produced by `encode` and `csv`.
pub const DEFAULT_LEVELS: u32 = 3;

/// BGrid - encode coordinates into 2048-cell-per-level grid paths.
#[derive(Parser, Debug, Clone)]
#[command(name = "bgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing bip39-<code>.json word lists.
    #[arg(long, global = true, default_value = DEFAULT_WORDLIST_DIR, env = "BGRID_WORDLIST_DIR")]
    pub wordlist_dir: PathBuf,

    /// Enable debug logging (otherwise RUST_LOG or warn).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encode a latitude/longitude into a grid path.
    Encode(EncodeArgs),
    /// Decode a grid path into its bounds and center.
    Decode(DecodeArgs),
    /// List every child cell of one level as JSON lines or GeoParquet.
    Cells(CellsArgs),
    /// Add a bgrid column to a CSV file.
    Csv(CsvArgs),
}

/// Word rendering shared by `encode` and `decode`.
#[derive(Args, Debug, Clone)]
pub struct WordArgs {
    /// Read or write paths as words instead of numbers.
    #[arg(long)]
    pub words: bool,

    /// Word-list language code (en, es, fr, pt, zh).
    #[arg(long, default_value = "en")]
    pub lang: Language,
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Latitude in degrees (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Number of levels to encode.
    #[arg(short, long, default_value_t = DEFAULT_LEVELS)]
    pub levels: u32,

    #[command(flatten)]
    pub word_args: WordArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Comma-separated indices (or words with --words).
    pub path: String,

    #[command(flatten)]
    pub word_args: WordArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CellsArgs {
    /// Level to enumerate. Defaults to one below the parent.
    #[arg(long)]
    pub level: Option<u32>,

    /// Parent path as comma-separated indices.
    #[arg(long, default_value = "")]
    pub parent: GridPath,

    /// Deepest level that may be enumerated.
    #[arg(long, default_value_t = DEFAULT_MAX_LEVEL)]
    pub max_level: u32,

    /// Write a GeoParquet file instead of printing JSON lines.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CsvArgs {
    /// Input CSV file.
    pub input: PathBuf,

    /// Output CSV file.
    pub output: PathBuf,

    /// Column holding WKT or GeoJSON geometry.
    #[arg(long, conflicts_with_all = ["lon_column", "lat_column"])]
    pub geometry_column: Option<String>,

    /// Column holding longitudes.
    #[arg(long, requires = "lat_column")]
    pub lon_column: Option<String>,

    /// Column holding latitudes.
    #[arg(long, requires = "lon_column")]
    pub lat_column: Option<String>,

    /// Number of levels to encode.
    #[arg(short, long, default_value_t = DEFAULT_LEVELS)]
    pub levels: u32,

    /// Also write each cell's rectangle (wkt or geojson).
    #[arg(long)]
    pub cell_geometry: Option<GeometryFormat>,

    /// Extra columns to drop from the output.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub word_args: WordArgs,
}
