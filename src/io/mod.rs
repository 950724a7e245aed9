pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::GridCellsToArrow;
pub use self::csv::{
    BGRID_COLUMN, CELL_GEOMETRY_COLUMN, CoordinateSource, CsvBGridConfig, CsvToBGrid,
    csv_to_bgrid_csv,
};
pub use self::parquet::{GridCellsToGeoParquet, write_geoparquet};
