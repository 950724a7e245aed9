use crate::error::BGridError;
use crate::geom::BoundingRegion;
use crate::index::constants::CELLS_PER_LEVEL;
use crate::index::decode::decode_validated;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of 1-based cell indices, one per subdivision level.
///
/// Entry `i` is the cell picked at level `i + 1`. Every entry is checked to lie
/// in `1..=2048` on construction, so a `GridPath` always decodes.
///
/// # Example
/// ```
/// use bgrid_rs::GridPath;
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let path: GridPath = "1057,1".parse()?;
/// assert_eq!(path.level(), 2);
/// assert_eq!(path.to_string(), "1057,1");
///
/// let region = path.decode();
/// assert_eq!(region.max_lat(), 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct GridPath(Vec<u16>);

impl GridPath {
    /// Builds a path from raw indices, rejecting any entry outside `1..=2048`.
    pub fn new(indices: Vec<u16>) -> Result<Self, BGridError> {
        validate_indices(&indices)?;
        Ok(Self(indices))
    }

    /// The empty path, which denotes the whole globe.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth of the cell this path names. The root path is level 0.
    pub fn level(&self) -> u32 {
        self.0.len() as u32
    }

    pub fn indices(&self) -> &[u16] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &u16> {
        self.0.iter()
    }

    /// Index chosen at the deepest level, if any.
    pub fn last_index(&self) -> Option<u16> {
        self.0.last().copied()
    }

    /// The first `k` entries of this path. `k` larger than the path returns a copy.
    pub fn prefix(&self, k: usize) -> GridPath {
        GridPath(self.0[..k.min(self.0.len())].to_vec())
    }

    /// The enclosing path one level up, or `None` for the root.
    pub fn parent(&self) -> Option<GridPath> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.prefix(self.0.len() - 1))
        }
    }

    /// Extends this path by one level.
    pub fn child(&self, index: u16) -> Result<GridPath, BGridError> {
        validate_index(index, self.0.len())?;
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Ok(GridPath(indices))
    }

    /// Whether `other` lies within (or equals) the cell named by this path.
    pub fn is_ancestor_of(&self, other: &GridPath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Decodes the bounding region named by this path.
    pub fn decode(&self) -> BoundingRegion {
        decode_validated(&self.0)
    }

    pub(crate) fn from_validated(indices: Vec<u16>) -> Self {
        Self(indices)
    }

    pub fn into_inner(self) -> Vec<u16> {
        self.0
    }
}

pub(crate) fn validate_index(index: u16, position: usize) -> Result<(), BGridError> {
    if index == 0 || index > CELLS_PER_LEVEL {
        return Err(BGridError::InvalidInput(format!(
            "index {} at level {} is outside 1..={}",
            index,
            position + 1,
            CELLS_PER_LEVEL
        )));
    }
    Ok(())
}

pub(crate) fn validate_indices(indices: &[u16]) -> Result<(), BGridError> {
    for (position, &index) in indices.iter().enumerate() {
        validate_index(index, position)?;
    }
    Ok(())
}

impl TryFrom<Vec<u16>> for GridPath {
    type Error = BGridError;

    fn try_from(indices: Vec<u16>) -> Result<Self, Self::Error> {
        GridPath::new(indices)
    }
}

impl From<GridPath> for Vec<u16> {
    fn from(path: GridPath) -> Self {
        path.0
    }
}

impl AsRef<[u16]> for GridPath {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a GridPath {
    type Item = &'a u16;
    type IntoIter = std::slice::Iter<'a, u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Comma-joined decimal indices, e.g. `1057,1`.
impl fmt::Display for GridPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Parses comma-separated decimal indices. Surrounding whitespace and
/// `[`/`]` brackets are ignored; an empty string is the root path.
impl FromStr for GridPath {
    type Err = BGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        if trimmed.is_empty() {
            return Ok(GridPath::root());
        }

        let indices = trimmed
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u16>().map_err(|_| {
                    BGridError::InvalidInput(format!("'{}' is not a grid index", part))
                })
            })
            .collect::<Result<Vec<u16>, BGridError>>()?;

        GridPath::new(indices)
    }
}
