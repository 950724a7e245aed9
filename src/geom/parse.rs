use crate::error::BGridError;
use geo_types::{Geometry, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Text encodings for cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text, e.g. `POLYGON((0 -5.625,5.625 -5.625,...))`
    Wkt,
    /// GeoJSON geometry object
    GeoJson,
}

impl FromStr for GeometryFormat {
    type Err = BGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wkt" => Ok(GeometryFormat::Wkt),
            "geojson" | "json" => Ok(GeometryFormat::GeoJson),
            other => Err(BGridError::InvalidInput(format!(
                "unknown geometry format '{}', expected wkt or geojson",
                other
            ))),
        }
    }
}

/// Parses a lon/lat geometry string, treating a leading `{` as GeoJSON and anything else as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, BGridError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(BGridError::GeometryParseError(
            "Empty geometry string".to_string(),
        ));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or single feature.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, BGridError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| BGridError::GeometryParseError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            BGridError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(BGridError::GeometryParseError(
                "FeatureCollection not supported, use individual geometries".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(|e| BGridError::GeometryParseError(e.to_string()))
}

pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, BGridError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| BGridError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        BGridError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

/// Renders a cell polygon in the requested text format.
pub fn polygon_to_string(polygon: &Polygon<f64>, format: GeometryFormat) -> String {
    match format {
        GeometryFormat::Wkt => polygon.wkt_string(),
        GeometryFormat::GeoJson => geojson::Geometry::from(polygon).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_parse_geojson_point() -> Result<(), BGridError> {
        let json = r#"{"type":"Point","coordinates":[151.2093,-33.8688]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 151.2093).abs() < 1e-9);
                assert!((pt.y() + 33.8688).abs() < 1e-9);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), BGridError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[2.35,48.85]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));
        Ok(())
    }

    #[test]
    fn test_parse_wkt_linestring() -> Result<(), BGridError> {
        match parse_geometry("LINESTRING(-0.1 51.5, 2.35 48.85)")? {
            Geometry::LineString(line) => assert_eq!(line.0.len(), 2),
            _ => panic!("Expected LineString"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            parse_geometry("   "),
            Err(BGridError::GeometryParseError(_))
        ));
        assert!(matches!(
            parse_geometry("POINT(abc)"),
            Err(BGridError::GeometryParseError(_))
        ));
        assert!(matches!(
            parse_geometry(r#"{"type":"FeatureCollection","features":[]}"#),
            Err(BGridError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_polygon_to_string() {
        let poly = polygon![
            (x: 0.0, y: -5.625),
            (x: 5.625, y: -5.625),
            (x: 5.625, y: 0.0),
            (x: 0.0, y: 0.0),
            (x: 0.0, y: -5.625),
        ];
        assert!(polygon_to_string(&poly, GeometryFormat::Wkt).starts_with("POLYGON"));
        assert!(polygon_to_string(&poly, GeometryFormat::GeoJson).contains("\"Polygon\""));
    }

    #[test]
    fn test_geometry_format_from_str() -> Result<(), BGridError> {
        assert_eq!("WKT".parse::<GeometryFormat>()?, GeometryFormat::Wkt);
        assert_eq!("geojson".parse::<GeometryFormat>()?, GeometryFormat::GeoJson);
        assert!("svg".parse::<GeometryFormat>().is_err());
        Ok(())
    }
}
