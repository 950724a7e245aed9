use bgrid_rs::config::{CellsArgs, Cli, Command, CsvArgs, DecodeArgs, EncodeArgs, WordArgs};
use bgrid_rs::{
    BGridError, ChildGrid, CsvBGridConfig, DisplayMode, GridCellsToGeoParquet, GridPath,
    WordList, WordListLoader, csv_to_bgrid_csv, decode, encode, enumerate_level, format_path,
    parse_words,
};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Encode(args) => run_encode(args, &cli.wordlist_dir),
        Command::Decode(args) => run_decode(args, &cli.wordlist_dir),
        Command::Cells(args) => run_cells(args),
        Command::Csv(args) => run_csv(args, &cli.wordlist_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "bgrid_rs=debug,bgrid=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_words(args: &WordArgs, dir: &Path) -> Result<Option<WordList>, BGridError> {
    if !args.words {
        return Ok(None);
    }
    let list = WordListLoader::new().base_dir(dir).load(args.lang)?;
    debug!(language = %args.lang, "loaded word list");
    Ok(Some(list))
}

fn run_encode(args: EncodeArgs, dir: &Path) -> Result<(), BGridError> {
    let path = encode(args.lat, args.lon, args.levels)?;
    let words = load_words(&args.word_args, dir)?;
    let mode = if words.is_some() {
        DisplayMode::Words
    } else {
        DisplayMode::Numbers
    };
    println!("{}", format_path(&path, mode, words.as_ref())?);
    Ok(())
}

fn run_decode(args: DecodeArgs, dir: &Path) -> Result<(), BGridError> {
    let path: GridPath = match load_words(&args.word_args, dir)? {
        Some(words) => parse_words(&args.path, &words)?,
        None => args.path.parse()?,
    };
    let region = decode(path.indices())?;
    let center = region.center();

    let output = json!({
        "path": path,
        "bounds": &region,
        "center": { "lat": center.y(), "lon": center.x() },
        "corners": region.corners(),
    });
    println!("{}", output);
    Ok(())
}

fn run_cells(args: CellsArgs) -> Result<(), BGridError> {
    let level = args.level.unwrap_or(args.parent.level() + 1);

    if let Some(output) = args.output {
        let grid = ChildGrid::from_parent(level, &args.parent, args.max_level)?;
        return grid.into_cells().to_geoparquet(output);
    }

    for cell in enumerate_level(level, &args.parent, args.max_level)? {
        let line =
            serde_json::to_string(&cell).map_err(|e| BGridError::IoError(e.to_string()))?;
        println!("{}", line);
    }
    Ok(())
}

fn run_csv(args: CsvArgs, dir: &Path) -> Result<(), BGridError> {
    let mut config = match (args.geometry_column, args.lon_column, args.lat_column) {
        (Some(geometry), _, _) => CsvBGridConfig::new(geometry, args.levels),
        (None, Some(lon), Some(lat)) => CsvBGridConfig::from_coords(lon, lat, args.levels),
        _ => {
            return Err(BGridError::InvalidInput(
                "either --geometry-column or both --lon-column and --lat-column are required"
                    .to_string(),
            ));
        }
    };

    if !args.exclude.is_empty() {
        config = config.exclude(args.exclude);
    }
    if let Some(format) = args.cell_geometry {
        config = config.with_cell_geometry(format);
    }
    if let Some(words) = load_words(&args.word_args, dir)? {
        config = config.words(words);
    }

    csv_to_bgrid_csv(&args.input, &args.output, &config)
}
