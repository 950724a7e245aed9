use crate::coord::Coordinate;
use crate::error::BGridError;
use crate::geom::BoundingRegion;
use crate::grid::{ChildCells, enumerate_level};
use crate::index::{GridPath, encode_coord};
use crate::io::arrow::GridCellsToArrow;
use crate::io::parquet::GridCellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use geoarrow_array::array::{PointArray, PolygonArray};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// A single cell in the BGrid index.
///
/// Each `GridCell` carries the full path from the globe down to itself, the
/// index it occupies within its parent, and its decoded geometry.
///
/// # Example
///
/// ```
/// use bgrid_rs::GridCell;
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// // London, two levels deep
/// let cell = GridCell::from_coord(&(-0.1278, 51.5074), 2)?;
/// println!("Cell path: {}", cell.id());
/// println!("Center: ({}, {})", cell.lat(), cell.lon());
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// Index of this cell within its parent (1-2048)
    pub index: u16,
    /// Path from the globe to this cell, `index` being its last entry
    pub path: GridPath,
    /// Center point (x = longitude, y = latitude)
    #[serde(serialize_with = "serialize_center")]
    pub center: Point<f64>,
    /// Bounding rectangle of the cell
    pub bounds: BoundingRegion,
}

fn serialize_center<S: serde::Serializer>(
    center: &Point<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut state = serializer.serialize_struct("Center", 2)?;
    state.serialize_field("lat", &center.y())?;
    state.serialize_field("lon", &center.x())?;
    state.end()
}

impl GridCell {
    /// Create a GridCell for the cell named by `path`.
    ///
    /// # Errors
    ///
    /// - [`BGridError::InvalidInput`] - the path is empty (the globe is not a cell)
    pub fn from_path(path: GridPath) -> Result<Self, BGridError> {
        let index = path.last_index().ok_or_else(|| {
            BGridError::InvalidInput("a cell path needs at least one level".to_string())
        })?;
        Ok(Self::from_non_empty_path(index, path))
    }

    pub(crate) fn from_non_empty_path(index: u16, path: GridPath) -> Self {
        let bounds = path.decode();
        Self {
            index,
            center: bounds.center(),
            path,
            bounds,
        }
    }

    /// Create the GridCell containing a WGS84 coordinate at the given depth.
    ///
    /// # Example
    /// ```
    /// use bgrid_rs::GridCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), bgrid_rs::BGridError> {
    /// // From (lon, lat) tuple
    /// let cell = GridCell::from_coord(&(0.0, 0.0), 1)?;
    /// assert_eq!(cell.index, 1057);
    /// // From Point
    /// let cell = GridCell::from_coord(&Point::new(0.0, 0.0), 2)?;
    /// assert_eq!(cell.path.indices(), &[1057, 1]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_coord(coord: &impl Coordinate, levels: u32) -> Result<Self, BGridError> {
        let path = encode_coord(coord, levels)?;
        Self::from_path(path)
    }

    /// Create GridCells from the vertices of a LineString, dropping repeats.
    pub fn from_line_string(line: &LineString, levels: u32) -> Result<Vec<Self>, BGridError> {
        let mut seen: HashSet<GridPath> = HashSet::with_capacity(line.0.len());
        let mut cells = Vec::with_capacity(line.0.len());

        for coord in line.coords() {
            let path = encode_coord(coord, levels)?;
            if seen.insert(path.clone()) {
                cells.push(Self::from_path(path)?);
            }
        }

        Ok(cells)
    }

    /// Create GridCells from an arbitrary lon/lat `geo_types::Geometry`.
    ///
    /// Points and polygon centroids produce a single cell; multi-geometries,
    /// line vertices and collections may produce many.
    pub fn from_geometry(geom: Geometry<f64>, levels: u32) -> Result<Vec<Self>, BGridError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_coord(&pt, levels)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_coord(pt, levels))
                .collect(),
            Geometry::LineString(line) => Self::from_line_string(&line, levels),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line, levels)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_coord(&centroid, levels)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => {
                let mut cells = Vec::new();
                for poly in &mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        cells.push(Self::from_coord(&centroid, levels)?);
                    }
                }
                Ok(cells)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g, levels)?);
                }
                Ok(all_cells)
            }
            _ => Err(BGridError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Textual identifier of the cell: its path as comma-joined indices.
    pub fn id(&self) -> String {
        self.path.to_string()
    }

    /// Depth of the cell (1 for the coarsest cells).
    pub fn level(&self) -> u32 {
        self.path.level()
    }

    /// Latitude of the cell center.
    pub fn lat(&self) -> f64 {
        self.center.y()
    }

    /// Longitude of the cell center.
    pub fn lon(&self) -> f64 {
        self.center.x()
    }

    /// Whether a lon/lat coordinate falls within this cell, edges included.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains(coord)
    }

    /// The 2048 cells one level below this one, or none past `max_level`.
    pub fn children(&self, max_level: u32) -> Result<ChildCells, BGridError> {
        enumerate_level(self.level() + 1, &self.path, max_level)
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` in lon/lat order, suitable for spatial
    /// operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, BGridError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), BGridError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}
