use crate::error::BGridError;
use crate::geom::BoundingRegion;
use crate::index::constants::GLOBE_EXTENTS;
use crate::index::path::validate_indices;
use crate::index::schedule::divisors_for_level;

/// Decodes a sequence of grid indices into the region it names.
///
/// Each entry narrows the current region to one of its 2048 children, with
/// row 0 being the northmost row. An empty slice yields the whole globe.
///
/// # Example
/// ```
/// use bgrid_rs::decode;
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let region = decode(&[1057])?;
/// assert_eq!(region.min_lon(), 0.0);
/// assert_eq!(region.max_lon(), 5.625);
/// assert_eq!(region.min_lat(), -5.625);
/// assert_eq!(region.max_lat(), 0.0);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`BGridError::InvalidInput`] - an entry is outside `1..=2048`
pub fn decode(path: &[u16]) -> Result<BoundingRegion, BGridError> {
    validate_indices(path)?;
    Ok(decode_validated(path))
}

/// Decodes indices already known to be in range.
pub(crate) fn decode_validated(path: &[u16]) -> BoundingRegion {
    let mut min_lon = GLOBE_EXTENTS[0];
    let mut min_lat = GLOBE_EXTENTS[1];
    let mut max_lon = GLOBE_EXTENTS[2];
    let mut max_lat = GLOBE_EXTENTS[3];

    for (i, &index) in path.iter().enumerate() {
        let d = divisors_for_level(i as u32 + 1);
        let zero_index = (index - 1) as u32;
        let col = zero_index % d.lon;
        let row = zero_index / d.lon;

        let lon_width = (max_lon - min_lon) / d.lon as f64;
        let lat_height = (max_lat - min_lat) / d.lat as f64;

        min_lon += col as f64 * lon_width;
        max_lon = min_lon + lon_width;

        let new_max_lat = max_lat - row as f64 * lat_height;
        let new_min_lat = new_max_lat - lat_height;
        min_lat = new_min_lat;
        max_lat = new_max_lat;
    }

    BoundingRegion::new(min_lat, min_lon, max_lat, max_lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::DEFAULT_EPSILON;
    use crate::index::encode::encode;

    #[test]
    fn test_empty_path_is_globe() -> Result<(), BGridError> {
        let region = decode(&[])?;
        assert_eq!(region.min_lat(), -90.0);
        assert_eq!(region.max_lat(), 90.0);
        assert_eq!(region.min_lon(), -180.0);
        assert_eq!(region.max_lon(), 180.0);
        assert_eq!(region.center().x(), 0.0);
        assert_eq!(region.center().y(), 0.0);
        Ok(())
    }

    #[test]
    fn test_first_and_last_cells() -> Result<(), BGridError> {
        let first = decode(&[1])?;
        assert_eq!(first.min_lon(), -180.0);
        assert_eq!(first.max_lon(), -174.375);
        assert_eq!(first.max_lat(), 90.0);
        assert_eq!(first.min_lat(), 84.375);

        let last = decode(&[2048])?;
        assert_eq!(last.max_lon(), 180.0);
        assert_eq!(last.min_lon(), 174.375);
        assert_eq!(last.min_lat(), -90.0);
        assert_eq!(last.max_lat(), -84.375);
        Ok(())
    }

    #[test]
    fn test_second_level_vector() -> Result<(), BGridError> {
        let region = decode(&[1057, 1])?;
        assert_eq!(region.min_lon(), 0.0);
        assert_eq!(region.max_lon(), 0.17578125);
        assert_eq!(region.max_lat(), 0.0);
        assert_eq!(region.min_lat(), -0.087890625);
        assert_eq!(region.center().x(), 0.087890625);
        assert_eq!(region.center().y(), -0.0439453125);
        Ok(())
    }

    #[test]
    fn test_rejects_out_of_range_entries() {
        assert!(matches!(decode(&[0]), Err(BGridError::InvalidInput(_))));
        assert!(matches!(
            decode(&[12, 4096]),
            Err(BGridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_round_trip_containment() -> Result<(), BGridError> {
        let mut lat = -89.95;
        while lat < 90.0 {
            let mut lon = -179.95;
            while lon < 180.0 {
                for levels in 1..=5 {
                    let path = encode(lat, lon, levels)?;
                    let region = decode(path.indices())?;
                    assert!(
                        region.contains_with_tolerance(&(lon, lat), DEFAULT_EPSILON),
                        "({}, {}) not inside {:?} at {} levels",
                        lat,
                        lon,
                        region,
                        levels
                    );
                }
                lon += 13.7;
            }
            lat += 6.9;
        }
        Ok(())
    }

    #[test]
    fn test_clamped_edges_stay_inside_decoded_region() -> Result<(), BGridError> {
        let edges = [
            (-90.0, 180.0),
            (90.0, -180.0),
            (-90.0, 0.0),
            (0.0, 180.0),
            (90.0, 180.0),
            (-90.0, -180.0),
        ];
        for (lat, lon) in edges {
            for levels in 1..=6 {
                let region = decode(encode(lat, lon, levels)?.indices())?;
                assert!(
                    region.contains_with_tolerance(&(lon, lat), DEFAULT_EPSILON),
                    "({}, {}) not inside {:?} at {} levels",
                    lat,
                    lon,
                    region,
                    levels
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_monotonic_refinement() -> Result<(), BGridError> {
        let path = encode(-33.8688, 151.2093, 5)?;
        let full = decode(path.indices())?;
        for k in 0..path.len() {
            let coarse = decode(&path.indices()[..k])?;
            assert!(coarse.encloses(&full, DEFAULT_EPSILON));
        }
        Ok(())
    }
}
