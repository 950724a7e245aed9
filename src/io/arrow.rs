use crate::cell::GridCell;
use crate::error::BGridError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt16Array, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`GridCell`]s to Arrow arrays.
///
/// Implemented for `[GridCell]` and `Vec<GridCell>`.
pub trait GridCellsToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cell bounds to an Arrow PolygonArray of rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with id, level, index, center, bounds and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, BGridError>;
}

impl GridCellsToArrow for [GridCell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &GridCell| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, BGridError> {
        let polygon_array = self.to_arrow_polygons();
        let ids: StringArray = self.iter().map(|c| Some(c.id())).collect();
        let levels: UInt32Array = self.iter().map(|c| Some(c.level())).collect();
        let indices: UInt16Array = self.iter().map(|c| Some(c.index)).collect();
        let center_lats: Float64Array = self.iter().map(|c| Some(c.lat())).collect();
        let center_lons: Float64Array = self.iter().map(|c| Some(c.lon())).collect();
        let min_lats: Float64Array = self.iter().map(|c| Some(c.bounds.min_lat())).collect();
        let min_lons: Float64Array = self.iter().map(|c| Some(c.bounds.min_lon())).collect();
        let max_lats: Float64Array = self.iter().map(|c| Some(c.bounds.max_lat())).collect();
        let max_lons: Float64Array = self.iter().map(|c| Some(c.bounds.max_lon())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("level", DataType::UInt32, false),
            Field::new("index", DataType::UInt16, false),
            Field::new("center_lat", DataType::Float64, false),
            Field::new("center_lon", DataType::Float64, false),
            Field::new("min_lat", DataType::Float64, false),
            Field::new("min_lon", DataType::Float64, false),
            Field::new("max_lat", DataType::Float64, false),
            Field::new("max_lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(ids),
                Arc::new(levels),
                Arc::new(indices),
                Arc::new(center_lats),
                Arc::new(center_lons),
                Arc::new(min_lats),
                Arc::new(min_lons),
                Arc::new(max_lats),
                Arc::new(max_lons),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| BGridError::IoError(e.to_string()))
    }
}

impl GridCellsToArrow for Vec<GridCell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, BGridError> {
        self.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::enumerate_level;
    use crate::index::GridPath;
    use geoarrow_array::GeoArrowArray;

    fn sample_cells() -> Result<Vec<GridCell>, BGridError> {
        Ok(vec![
            GridCell::from_coord(&(-0.1278, 51.5074), 2)?,
            GridCell::from_coord(&(151.2093, -33.8688), 2)?,
        ])
    }

    #[test]
    fn test_cells_to_arrow_points() -> Result<(), BGridError> {
        let point_array = sample_cells()?.to_arrow_points();
        assert_eq!(point_array.len(), 2);
        Ok(())
    }

    #[test]
    fn test_cells_to_arrow_polygons() -> Result<(), BGridError> {
        let polygon_array = sample_cells()?.to_arrow_polygons();
        assert_eq!(polygon_array.len(), 2);
        Ok(())
    }

    #[test]
    fn test_record_batch_columns() -> Result<(), BGridError> {
        let cells: Vec<GridCell> = enumerate_level(1, &GridPath::root(), 4)?.take(64).collect();
        let batch = cells.to_record_batch()?;

        assert_eq!(batch.num_rows(), 64);
        assert_eq!(batch.num_columns(), 10);
        assert_eq!(batch.schema().field(0).name(), "id");
        assert_eq!(batch.schema().field(9).name(), "geometry");

        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| BGridError::IoError("id column is not utf8".to_string()))?;
        assert_eq!(ids.value(0), "1");
        assert_eq!(ids.value(63), "64");
        Ok(())
    }

    #[test]
    fn test_single_cell_batch() -> Result<(), BGridError> {
        let cell = GridCell::from_coord(&(0.0, 0.0), 1)?;
        let batch = cell.to_record_batch()?;
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(cell.to_arrow_points().len(), 1);
        assert_eq!(cell.to_arrow_polygons().len(), 1);
        Ok(())
    }
}
