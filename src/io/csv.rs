use crate::cell::GridCell;
use crate::error::BGridError;
use crate::geom::{GeometryFormat, parse_geometry, polygon_to_string};
use crate::wordlist::{DisplayMode, WordList, format_path};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Name of the output column holding each row's grid path.
pub const BGRID_COLUMN: &str = "bgrid";

/// Name of the optional output column holding each cell's rectangle.
pub const CELL_GEOMETRY_COLUMN: &str = "cell_geometry";

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in lon/lat
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to BGrid conversion.
#[derive(Debug, Clone)]
pub struct CsvBGridConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub levels: u32,
    pub words: Option<WordList>,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvBGridConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use bgrid_rs::CsvBGridConfig;
    ///
    /// let config = CsvBGridConfig::new("geometry", 3);
    /// assert_eq!(config.levels, 3);
    /// ```
    pub fn new(geometry_column: impl Into<String>, levels: u32) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            levels,
            words: None,
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use bgrid_rs::{CsvBGridConfig, GeometryFormat};
    ///
    /// let config = CsvBGridConfig::from_coords("Longitude", "Latitude", 4)
    ///     .with_cell_geometry(GeometryFormat::Wkt);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        levels: u32,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            levels,
            words: None,
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Write paths as words from `words` instead of numbers.
    pub fn words(mut self, words: WordList) -> Self {
        self.words = Some(words);
        self
    }

    /// Include the cell rectangle in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    fn display_mode(&self) -> DisplayMode {
        if self.words.is_some() {
            DisplayMode::Words
        } else {
            DisplayMode::Numbers
        }
    }
}

pub trait CsvToBGrid {
    fn to_bgrid_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvBGridConfig,
    ) -> Result<(), BGridError>;
}

impl<P: AsRef<Path>> CsvToBGrid for P {
    fn to_bgrid_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvBGridConfig,
    ) -> Result<(), BGridError> {
        csv_to_bgrid_csv(self, output_path, config)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, BGridError> {
    if name.is_empty() {
        return Err(BGridError::CsvError(format!(
            "{} column name cannot be empty",
            role
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| BGridError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, BGridError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| BGridError::CsvError(format!("Missing {} column at index {}", role, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| BGridError::CsvError(format!("Invalid {}: '{}'", role, raw)))
}

/// Converts a CSV file with geometry or lon/lat columns to a CSV file with BGrid paths.
///
/// The source columns are dropped from the output, which starts with the
/// `bgrid` column (and `cell_geometry` when requested). A row whose geometry
/// maps to several cells is written once per cell. Output is streamed row by row.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use bgrid_rs::{csv_to_bgrid_csv, CsvBGridConfig};
///
/// let config = CsvBGridConfig::from_coords("lon", "lat", 3);
/// csv_to_bgrid_csv("stations.csv", "stations_bgrid.csv", &config).unwrap();
/// ```
pub fn csv_to_bgrid_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvBGridConfig,
) -> Result<(), BGridError> {
    if config.levels == 0 {
        return Err(BGridError::InvalidInput(
            "levels must be a positive integer".to_string(),
        ));
    }

    let file = File::open(csv_path).map_err(|e| BGridError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| BGridError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| BGridError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec![BGRID_COLUMN];
    if config.include_cell_geometry.is_some() {
        header_row.push(CELL_GEOMETRY_COLUMN);
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| BGridError::CsvError(e.to_string()))?;

    let mode = config.display_mode();
    let mut rows_in = 0usize;
    let mut rows_out = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| BGridError::CsvError(e.to_string()))?;
        rows_in += 1;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    BGridError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                GridCell::from_geometry(geom, config.levels)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_field(&record, *lon_idx, "longitude")?;
                let lat = parse_field(&record, *lat_idx, "latitude")?;
                vec![GridCell::from_coord(&(lon, lat), config.levels)?]
            }
        };

        if cells.is_empty() {
            debug!(row = rows_in, "row produced no cells");
        }

        for cell in cells {
            let mut row: Vec<String> = vec![format_path(&cell.path, mode, config.words.as_ref())?];

            if let Some(format) = config.include_cell_geometry {
                row.push(polygon_to_string(&cell.to_polygon(), format));
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| BGridError::CsvError(e.to_string()))?;
            rows_out += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| BGridError::CsvError(e.to_string()))?;

    info!(rows_in, rows_out, levels = config.levels, "converted csv to bgrid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::list::sample_words;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), BGridError> {
        let mut file = File::create(path).map_err(|e| BGridError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| BGridError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_output(path: &Path) -> Result<Vec<Vec<String>>, BGridError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| BGridError::CsvError(e.to_string()))?;
        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| BGridError::CsvError(e.to_string()))?;
            records.push(record.iter().map(String::from).collect());
        }
        Ok(records)
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), BGridError> {
        let dir = tempdir().map_err(|e| BGridError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("input.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["id,lon,lat,name", "1,0,0,Null Island", "2,-180,90,Corner"],
        )?;

        let config = CsvBGridConfig::from_coords("lon", "lat", 2);
        csv_to_bgrid_csv(&csv_path, &output_path, &config)?;

        let records = read_output(&output_path)?;
        assert_eq!(records[0], vec!["bgrid", "id", "name"]);
        assert_eq!(records[1], vec!["1057,1", "1", "Null Island"]);
        assert_eq!(records[2], vec!["1,1", "2", "Corner"]);
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_cell_geometry() -> Result<(), BGridError> {
        let dir = tempdir().map_err(|e| BGridError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("input.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ASSET_ID,geometry,extra",
                "A1,\"POINT(0 0)\",x",
                "A2,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[0,0]}\",y",
            ],
        )?;

        let config = CsvBGridConfig::new("geometry", 1)
            .exclude(vec!["extra".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        csv_to_bgrid_csv(&csv_path, &output_path, &config)?;

        let records = read_output(&output_path)?;
        assert_eq!(records[0], vec!["bgrid", "cell_geometry", "ASSET_ID"]);
        assert_eq!(records[1][0], "1057");
        assert!(records[1][1].starts_with("POLYGON"));
        assert_eq!(records[2][0], "1057");
        assert_eq!(records[2][2], "A2");
        Ok(())
    }

    #[test]
    fn test_csv_words() -> Result<(), BGridError> {
        let dir = tempdir().map_err(|e| BGridError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("input.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["lat,lon", "0,0"])?;

        let config =
            CsvBGridConfig::from_coords("lon", "lat", 2).words(WordList::new(sample_words())?);
        csv_path.to_bgrid_csv(&output_path, &config)?;

        let records = read_output(&output_path)?;
        assert_eq!(records[1][0], "w1057,w0001");
        Ok(())
    }

    #[test]
    fn test_csv_errors() -> Result<(), BGridError> {
        let dir = tempdir().map_err(|e| BGridError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("input.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["lon,lat", "abc,1"])?;

        let missing = CsvBGridConfig::from_coords("x", "lat", 1);
        assert!(matches!(
            csv_to_bgrid_csv(&csv_path, &output_path, &missing),
            Err(BGridError::CsvError(_))
        ));

        let bad_value = CsvBGridConfig::from_coords("lon", "lat", 1);
        assert!(matches!(
            csv_to_bgrid_csv(&csv_path, &output_path, &bad_value),
            Err(BGridError::CsvError(_))
        ));

        let zero_levels = CsvBGridConfig::from_coords("lon", "lat", 0);
        assert!(matches!(
            csv_to_bgrid_csv(&csv_path, &output_path, &zero_levels),
            Err(BGridError::InvalidInput(_))
        ));
        Ok(())
    }
}
