use crate::cell::GridCell;
use crate::coord::Coordinate;
use crate::error::BGridError;
use crate::index::{DEFAULT_MAX_LEVEL, GridPath, divisors_for_level, encode_coord};
use geo_types::Polygon;
use rayon::prelude::*;
use tracing::debug;

/// Lazily yields the child cells of one parent path, index ascending.
///
/// Produced by [`enumerate_level`]. Cloning an untouched iterator gives an
/// independent pass over the same cells.
#[derive(Debug, Clone)]
pub struct ChildCells {
    parent: GridPath,
    next: u16,
    end: u16,
}

impl ChildCells {
    /// Iterator over children `1..=count` of `parent`; a count of 0 yields nothing.
    pub(crate) fn under(parent: GridPath, count: u16) -> Self {
        Self {
            parent,
            next: 1,
            end: count,
        }
    }

    /// The path whose children are being enumerated.
    pub fn parent(&self) -> &GridPath {
        &self.parent
    }

    fn remaining(&self) -> usize {
        if self.next > self.end {
            0
        } else {
            (self.end - self.next + 1) as usize
        }
    }
}

impl Iterator for ChildCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let mut indices = Vec::with_capacity(self.parent.len() + 1);
        indices.extend_from_slice(self.parent.indices());
        indices.push(index);

        Some(GridCell::from_non_empty_path(
            index,
            GridPath::from_validated(indices),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildCells {
    fn len(&self) -> usize {
        self.remaining()
    }
}

/// Enumerates every cell at `level` directly beneath `parent`.
///
/// Yields `dLon * dLat` (2048) cells in row-major order, each carrying its full
/// path and decoded geometry. When `level` exceeds `max_level` the iterator is
/// empty. Only one level is produced per call; walking deeper means calling
/// again with a longer `parent`.
///
/// # Example
/// ```
/// use bgrid_rs::{GridPath, enumerate_level};
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let cells = enumerate_level(1, &GridPath::root(), 4)?;
/// assert_eq!(cells.len(), 2048);
///
/// let first = cells.clone().next().unwrap();
/// assert_eq!(first.index, 1);
/// assert_eq!(first.bounds.max_lat(), 90.0);
///
/// assert_eq!(enumerate_level(5, &GridPath::root(), 4)?.count(), 0);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`BGridError::InvalidInput`] - `level` is 0
pub fn enumerate_level(
    level: u32,
    parent: &GridPath,
    max_level: u32,
) -> Result<ChildCells, BGridError> {
    if level == 0 {
        return Err(BGridError::InvalidInput(
            "level must be a positive integer".to_string(),
        ));
    }
    if level > max_level {
        return Ok(ChildCells::under(parent.clone(), 0));
    }

    let total = divisors_for_level(level).cell_count() as u16;
    Ok(ChildCells::under(parent.clone(), total))
}

/// A materialised set of sibling cells sharing one parent.
#[derive(Debug, Clone)]
pub struct ChildGrid {
    cells: Vec<GridCell>,
    parent: GridPath,
    level: u32,
}

impl ChildGrid {
    pub fn builder() -> ChildGridBuilder {
        ChildGridBuilder::new()
    }

    /// Builds all children of `parent` at `level`, in parallel.
    ///
    /// # Example
    /// ```
    /// use bgrid_rs::{ChildGrid, GridPath};
    ///
    /// # fn main() -> Result<(), bgrid_rs::BGridError> {
    /// let grid = ChildGrid::from_parent(1, &GridPath::root(), 4)?;
    /// assert_eq!(grid.len(), 2048);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_parent(level: u32, parent: &GridPath, max_level: u32) -> Result<Self, BGridError> {
        let total = enumerate_level(level, parent, max_level)?.len();
        let cells: Vec<GridCell> = if total == 0 {
            Vec::new()
        } else {
            (1..total + 1)
                .into_par_iter()
                .map(|index| {
                    let mut indices = Vec::with_capacity(parent.len() + 1);
                    indices.extend_from_slice(parent.indices());
                    indices.push(index as u16);
                    GridCell::from_non_empty_path(index as u16, GridPath::from_validated(indices))
                })
                .collect()
        };

        debug!(
            level,
            parent = %parent,
            cells = cells.len(),
            "built child grid"
        );

        Ok(Self {
            cells,
            parent: parent.clone(),
            level,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn parent(&self) -> &GridPath {
        &self.parent
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<GridCell> {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Returns the cell containing a lon/lat coordinate, if it lies under this grid's parent.
    pub fn get_cell_at(&self, coord: &impl Coordinate) -> Option<&GridCell> {
        if self.cells.is_empty() {
            return None;
        }
        let path = encode_coord(coord, self.parent.level() + 1).ok()?;
        if !self.parent.is_ancestor_of(&path) {
            return None;
        }
        let index = path.last_index()?;
        self.cells.get(index as usize - 1)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.par_iter().map(|cell| cell.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&GridCell>
    where
        F: Fn(&GridCell) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).collect()
    }
}

#[derive(Debug)]
pub struct ChildGridBuilder {
    level: Option<u32>,
    parent: GridPath,
    max_level: u32,
}

impl Default for ChildGridBuilder {
    fn default() -> Self {
        Self {
            level: None,
            parent: GridPath::root(),
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl ChildGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level to enumerate. Defaults to one below the parent.
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn parent(mut self, parent: GridPath) -> Self {
        self.parent = parent;
        self
    }

    /// Deepest level that may be enumerated. Defaults to [`DEFAULT_MAX_LEVEL`].
    pub fn max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn build(self) -> Result<ChildGrid, BGridError> {
        let level = self.level.unwrap_or(self.parent.level() + 1);
        ChildGrid::from_parent(level, &self.parent, self.max_level)
    }
}
