//! # bgrid-rs
//!
//! A hierarchical lat/lon grid where every level splits a cell into 2048
//! children, so each level of a path maps onto one word of a BIP39-style list.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use bgrid_rs::{decode, encode};
//!
//! # fn main() -> Result<(), bgrid_rs::BGridError> {
//! let path = encode(0.0, 0.0, 2)?;
//! assert_eq!(path.indices(), &[1057, 1]);
//!
//! let region = decode(path.indices())?;
//! assert!(region.contains(&(0.0, 0.0)));
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GridCell` and `ChildGrid` - Cells and Their Children
//!
//! ```
//! use bgrid_rs::{ChildGrid, GridCell};
//! use geo_types::point;
//!
//! # fn main() -> Result<(), bgrid_rs::BGridError> {
//! let cell = GridCell::from_coord(&(-0.1278, 51.5074), 1)?;
//!
//! let grid = ChildGrid::builder().parent(cell.path.clone()).build()?;
//! assert_eq!(grid.len(), 2048);
//!
//! let pt = point! { x: -0.1278, y: 51.5074 };
//! if let Some(child) = grid.get_cell_at(&pt) {
//!     println!("{}", child.id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Word Lists
//!
//! ```no_run
//! use bgrid_rs::{DisplayMode, Language, WordListLoader, encode, format_path};
//!
//! # fn main() -> Result<(), bgrid_rs::BGridError> {
//! let english = WordListLoader::new()
//!     .base_dir("bip39-wordlist")
//!     .load(Language::English)?;
//!
//! let path = encode(48.8566, 2.3522, 3)?;
//! println!("{}", format_path(&path, DisplayMode::Words, Some(&english))?);
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. `CsvToBGrid` - CSV File Conversion
//!
//! ```no_run
//! use bgrid_rs::{CsvBGridConfig, CsvToBGrid, GeometryFormat};
//!
//! let config = CsvBGridConfig::new("geometry", 3)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_bgrid_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;
pub mod wordlist;

pub use cell::GridCell;
pub use coord::Coordinate;
pub use error::BGridError;
pub use geom::{
    BoundingRegion, GeometryFormat, parse_geojson, parse_geometry, parse_wkt, polygon_to_string,
};
pub use grid::{ChildCells, ChildGrid, ChildGridBuilder, enumerate_level};
pub use index::{
    CELLS_PER_LEVEL, DEFAULT_EPSILON, DEFAULT_MAX_LEVEL, DivisorPair, GLOBE_EXTENTS, GridPath,
    MAX_LEVELS, NARROW_DIVISOR, WIDE_DIVISOR, decode, divisors_for_level, encode, encode_coord,
};
pub use io::{
    BGRID_COLUMN, CELL_GEOMETRY_COLUMN, CoordinateSource, CsvBGridConfig, CsvToBGrid,
    GridCellsToArrow, GridCellsToGeoParquet, csv_to_bgrid_csv, write_geoparquet,
};
pub use wordlist::{
    DEFAULT_WORDLIST_DIR, DisplayMode, Language, WordList, WordListLoader, format_path,
    is_supported_language, parse_words, to_words,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;
    use tempfile::tempdir;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), BGridError> {
        let path = encode(51.5074, -0.1278, 3)?;
        assert_eq!(path.level(), 3);

        let cell = GridCell::from_path(path.clone())?;
        assert!(cell.contains(&(-0.1278, 51.5074)));

        let text = path.to_string();
        let reparsed: GridPath = text.parse()?;
        assert_eq!(reparsed, path);

        let polygon = cell.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_grid_matches_direct_encoding() -> Result<(), BGridError> {
        let parent = encode(-33.8688, 151.2093, 1)?;
        let grid = ChildGrid::from_parent(2, &parent, DEFAULT_MAX_LEVEL)?;
        assert_eq!(grid.len(), CELLS_PER_LEVEL as usize);

        let pt = point! { x: 151.2093, y: -33.8688 };
        let from_grid = grid
            .get_cell_at(&pt)
            .ok_or_else(|| BGridError::InvalidInput("no cell".to_string()))?;
        let direct = GridCell::from_coord(&pt, 2)?;

        assert_eq!(from_grid.path, direct.path);
        assert_eq!(from_grid.index, direct.index);
        Ok(())
    }

    #[test]
    fn test_lazy_and_eager_enumeration_agree() -> Result<(), BGridError> {
        let parent = GridPath::new(vec![1057])?;
        let lazy: Vec<GridCell> = enumerate_level(2, &parent, DEFAULT_MAX_LEVEL)?.collect();
        let eager = ChildGrid::from_parent(2, &parent, DEFAULT_MAX_LEVEL)?;
        assert_eq!(lazy.as_slice(), eager.cells());
        Ok(())
    }

    #[test]
    fn test_words_round_trip_through_loader() -> Result<(), BGridError> {
        let dir = tempdir().map_err(|e| BGridError::IoError(e.to_string()))?;
        let words: Vec<String> = (1..=2048).map(|i| format!("mot{}", i)).collect();
        let json = serde_json::to_string(&words).map_err(|e| BGridError::IoError(e.to_string()))?;
        std::fs::write(dir.path().join("bip39-fr.json"), json)
            .map_err(|e| BGridError::IoError(e.to_string()))?;

        let list = WordListLoader::new()
            .base_dir(dir.path())
            .load_code("fr")?;
        let path = encode(48.8566, 2.3522, 3)?;

        let text = format_path(&path, DisplayMode::Words, Some(&list))?;
        assert_eq!(text.split(',').count(), 3);
        assert_eq!(parse_words(&text, &list)?, path);
        Ok(())
    }

    #[test]
    fn test_child_region_inside_parent() -> Result<(), BGridError> {
        let parent = decode(&[700])?;
        for index in [1u16, 1024, 2048] {
            let child = decode(&[700, index])?;
            assert!(parent.encloses(&child, DEFAULT_EPSILON));
        }
        Ok(())
    }
}
