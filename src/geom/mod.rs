mod parse;
mod region;

pub use parse::{GeometryFormat, parse_geojson, parse_geometry, parse_wkt, polygon_to_string};
pub use region::BoundingRegion;
