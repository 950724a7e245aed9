use crate::cell::GridCell;
use crate::error::BGridError;
use crate::io::arrow::GridCellsToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Writes a record batch with a geometry column to a WKB-encoded GeoParquet file.
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), BGridError> {
    let path = path.as_ref();
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();

    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    let file = File::create(path).map_err(|e| BGridError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    let encoded_batch = encoder
        .encode_record_batch(batch)
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    writer
        .write(&encoded_batch)
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    let kv_metadata = encoder
        .into_keyvalue()
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    writer.append_key_value_metadata(kv_metadata);
    writer
        .finish()
        .map_err(|e| BGridError::IoError(e.to_string()))?;

    info!(rows = batch.num_rows(), path = %path.display(), "wrote geoparquet");
    Ok(())
}

/// Writes collections of [`GridCell`]s to GeoParquet.
pub trait GridCellsToGeoParquet: GridCellsToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), BGridError>;
}

impl GridCellsToGeoParquet for [GridCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), BGridError> {
        let batch = self.to_record_batch()?;
        write_geoparquet(&batch, path)
    }
}

impl GridCellsToGeoParquet for Vec<GridCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), BGridError> {
        self.as_slice().to_geoparquet(path)
    }
}
