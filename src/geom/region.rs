use crate::coord::Coordinate;
use geo_types::{Coord, Point, Polygon, Rect, coord};
use serde::Serialize;

/// The latitude/longitude rectangle covered by a grid path.
///
/// Only produced by decoding, so `min <= max` holds on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingRegion {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl BoundingRegion {
    pub(crate) fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Midpoint of the region as a point (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// South-west and north-east corners as `[[lat, lon], [lat, lon]]`.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [
            [self.min_lat, self.min_lon],
            [self.max_lat, self.max_lon],
        ]
    }

    /// Whether the coordinate lies inside the region, edges included.
    pub fn contains<C: Coordinate>(&self, coord: &C) -> bool {
        self.contains_with_tolerance(coord, 0.0)
    }

    /// Like [`contains`](Self::contains) but widens every edge by `epsilon` degrees.
    pub fn contains_with_tolerance<C: Coordinate>(&self, coord: &C, epsilon: f64) -> bool {
        let (lon, lat) = (coord.x(), coord.y());
        lat >= self.min_lat - epsilon
            && lat <= self.max_lat + epsilon
            && lon >= self.min_lon - epsilon
            && lon <= self.max_lon + epsilon
    }

    /// Whether `other` lies entirely inside this region, within `epsilon` degrees.
    pub fn encloses(&self, other: &BoundingRegion, epsilon: f64) -> bool {
        other.min_lat >= self.min_lat - epsilon
            && other.max_lat <= self.max_lat + epsilon
            && other.min_lon >= self.min_lon - epsilon
            && other.max_lon <= self.max_lon + epsilon
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Closed counter-clockwise ring starting at the south-west corner.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }

    pub fn min_coord(&self) -> Coord<f64> {
        coord! { x: self.min_lon, y: self.min_lat }
    }

    pub fn max_coord(&self) -> Coord<f64> {
        coord! { x: self.max_lon, y: self.max_lat }
    }
}
