use geo_types::{Coord, Point};

/// Trait for types that can provide a WGS84 longitude/latitude pair.
///
/// Implemented for `(f64, f64)` tuples ordered `(lon, lat)`, `geo_types::Point<f64>`
/// and `geo_types::Coord<f64>`, all with x = longitude and y = latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple_is_lon_lat() {
        let tuple = (-0.1278, 51.5074);
        assert_eq!(tuple.x(), -0.1278);
        assert_eq!(tuple.y(), 51.5074);
    }

    #[test]
    fn test_coordinate_trait_point_and_coord_agree() {
        let point = Point::new(151.2093, -33.8688);
        let coord = Coord {
            x: 151.2093,
            y: -33.8688,
        };
        assert_eq!(Coordinate::x(&point), coord.x());
        assert_eq!(Coordinate::y(&point), Coordinate::y(&coord));
    }
}
