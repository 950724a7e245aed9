use crate::index::constants::{NARROW_DIVISOR, WIDE_DIVISOR};

/// Longitude and latitude divisors applied at one level.
///
/// Their product is always [`CELLS_PER_LEVEL`](crate::CELLS_PER_LEVEL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DivisorPair {
    /// Number of columns the level splits longitude into.
    pub lon: u32,
    /// Number of rows the level splits latitude into.
    pub lat: u32,
}

impl DivisorPair {
    /// Total number of cells at this level.
    pub fn cell_count(&self) -> u32 {
        self.lon * self.lat
    }
}

/// Returns the divisor pair for a 1-based level.
///
/// Odd levels split longitude 64 ways and latitude 32 ways, even levels the
/// other way round, so two consecutive levels average out to square cells.
///
/// # Example
/// ```
/// use bgrid_rs::divisors_for_level;
///
/// let first = divisors_for_level(1);
/// assert_eq!((first.lon, first.lat), (64, 32));
///
/// let second = divisors_for_level(2);
/// assert_eq!((second.lon, second.lat), (32, 64));
/// ```
pub fn divisors_for_level(level: u32) -> DivisorPair {
    if level % 2 == 1 {
        DivisorPair {
            lon: WIDE_DIVISOR,
            lat: NARROW_DIVISOR,
        }
    } else {
        DivisorPair {
            lon: NARROW_DIVISOR,
            lat: WIDE_DIVISOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::CELLS_PER_LEVEL;

    #[test]
    fn test_divisors_alternate() {
        for level in 1..=20 {
            let d = divisors_for_level(level);
            if level % 2 == 1 {
                assert_eq!((d.lon, d.lat), (64, 32), "level {}", level);
            } else {
                assert_eq!((d.lon, d.lat), (32, 64), "level {}", level);
            }
        }
    }

    #[test]
    fn test_cell_count_is_constant() {
        for level in 1..=20 {
            assert_eq!(
                divisors_for_level(level).cell_count(),
                CELLS_PER_LEVEL as u32
            );
        }
    }
}
