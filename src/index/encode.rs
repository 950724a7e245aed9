use crate::coord::Coordinate;
use crate::error::BGridError;
use crate::index::constants::MAX_LEVELS;
use crate::index::path::GridPath;
use crate::index::schedule::divisors_for_level;

/// Encodes a latitude/longitude pair into a grid path of `levels` entries.
///
/// The coordinate is normalised into a unit square with the origin at the
/// north-west corner, then each level picks a cell row-major and zooms into it.
///
/// Coordinates on the east edge (`lon = 180`) or south pole (`lat = -90`)
/// fall into the last column or row instead of overflowing, and so do finite
/// values outside the nominal ranges.
///
/// # Example
/// ```
/// use bgrid_rs::encode;
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let path = encode(0.0, 0.0, 2)?;
/// assert_eq!(path.indices(), &[1057, 1]);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`BGridError::InvalidInput`] - `lat` or `lon` is NaN or infinite, or `levels` is 0
///   or above [`MAX_LEVELS`](crate::MAX_LEVELS)
pub fn encode(lat: f64, lon: f64, levels: u32) -> Result<GridPath, BGridError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(BGridError::InvalidInput(format!(
            "lat/lon must be finite numbers, got ({}, {})",
            lat, lon
        )));
    }
    if levels == 0 {
        return Err(BGridError::InvalidInput(
            "levels must be a positive integer".to_string(),
        ));
    }
    if levels > MAX_LEVELS {
        return Err(BGridError::InvalidInput(format!(
            "levels must be at most {}, got {}",
            MAX_LEVELS, levels
        )));
    }

    let mut x = (lon + 180.0) / 360.0;
    let mut y = (90.0 - lat) / 180.0;
    let mut indices = Vec::new();

    for level in 1..=levels {
        let d = divisors_for_level(level);
        let d_lon = d.lon as f64;
        let d_lat = d.lat as f64;

        let col = cell_along(x * d_lon, d.lon);
        let row = cell_along(y * d_lat, d.lat);

        indices.push((row * d.lon + col + 1) as u16);

        x = x * d_lon - col as f64;
        y = y * d_lat - row as f64;
    }

    Ok(GridPath::from_validated(indices))
}

/// Encodes any [`Coordinate`] (x = longitude, y = latitude).
pub fn encode_coord<C: Coordinate>(coord: &C, levels: u32) -> Result<GridPath, BGridError> {
    encode(coord.y(), coord.x(), levels)
}

/// Floors a scaled position and clamps it to a valid column/row.
fn cell_along(scaled: f64, divisor: u32) -> u32 {
    let cell = scaled.floor();
    if cell <= 0.0 {
        0
    } else if cell >= (divisor - 1) as f64 {
        divisor - 1
    } else {
        cell as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::CELLS_PER_LEVEL;
    use geo_types::Point;

    #[test]
    fn test_origin() -> Result<(), BGridError> {
        assert_eq!(encode(0.0, 0.0, 1)?.indices(), &[1057]);
        assert_eq!(encode(0.0, 0.0, 3)?.indices(), &[1057, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_poles_and_antimeridian() -> Result<(), BGridError> {
        // North pole sits on row 0, south pole clamps to the last row.
        assert_eq!(encode(90.0, 0.0, 1)?.indices(), &[33]);
        assert_eq!(encode(-90.0, 0.0, 1)?.indices(), &[2017]);
        assert_eq!(encode(-90.0, 0.0, 2)?.indices(), &[2017, 2017]);

        assert_eq!(encode(0.0, -180.0, 1)?.indices(), &[1025]);
        assert_eq!(encode(0.0, 180.0, 1)?.indices(), &[1088]);
        assert_eq!(encode(-90.0, 180.0, 1)?.indices(), &[2048]);
        assert_eq!(encode(90.0, -180.0, 1)?.indices(), &[1]);
        Ok(())
    }

    #[test]
    fn test_out_of_range_is_clamped() -> Result<(), BGridError> {
        assert_eq!(encode(120.0, 0.0, 1)?.indices(), &[33]);
        assert_eq!(encode(0.0, 500.0, 1)?.indices(), &[1088]);
        assert_eq!(encode(-1e300, -1e300, 2)?.indices(), &[1985, 2017]);
        Ok(())
    }

    #[test]
    fn test_indices_in_range() -> Result<(), BGridError> {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                for index in encode(lat, lon, 4)?.iter() {
                    assert!((1..=CELLS_PER_LEVEL).contains(index));
                }
                lon += 7.3;
            }
            lat += 4.1;
        }
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), BGridError> {
        let a = encode(51.5074, -0.1278, 5)?;
        let b = encode(51.5074, -0.1278, 5)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_prefix_stable_across_levels() -> Result<(), BGridError> {
        let deep = encode(40.7128, -74.0060, 5)?;
        for k in 1..5 {
            assert_eq!(encode(40.7128, -74.0060, k)?, deep.prefix(k as usize));
        }
        Ok(())
    }

    #[test]
    fn test_encode_coord_matches_encode() -> Result<(), BGridError> {
        let from_tuple = encode_coord(&(-0.1278, 51.5074), 3)?;
        let from_point = encode_coord(&Point::new(-0.1278, 51.5074), 3)?;
        let direct = encode(51.5074, -0.1278, 3)?;
        assert_eq!(from_tuple, direct);
        assert_eq!(from_point, direct);
        Ok(())
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            encode(f64::NAN, 0.0, 1),
            Err(BGridError::InvalidInput(_))
        ));
        assert!(matches!(
            encode(0.0, f64::INFINITY, 1),
            Err(BGridError::InvalidInput(_))
        ));
        assert!(matches!(
            encode(0.0, 0.0, 0),
            Err(BGridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_levels_are_capped() -> Result<(), BGridError> {
        assert_eq!(encode(0.0, 0.0, MAX_LEVELS)?.len(), MAX_LEVELS as usize);
        assert!(matches!(
            encode(0.0, 0.0, MAX_LEVELS + 1),
            Err(BGridError::InvalidInput(_))
        ));
        assert!(matches!(
            encode(0.0, 0.0, u32::MAX),
            Err(BGridError::InvalidInput(_))
        ));
        Ok(())
    }
}
