//! Geographic coordinate types and parsing helpers.
//!
//! Positions are plain WGS84 degrees. The only validation applied is a
//! finiteness check: an address form that yields `NaN` must never reach the
//! routing service.

mod types;

pub use types::{CoordError, Coordinate, ViewportBounds};

/// Parses a `"lat,lon"` pair.
///
/// Whitespace around either number is ignored.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, CoordError> {
    let values = parse_numbers(input, 2)?;
    Coordinate::checked(values[0], values[1])
}

/// Parses a `"south,west,north,east"` bounding box.
pub fn parse_bounds(input: &str) -> Result<ViewportBounds, CoordError> {
    let values = parse_numbers(input, 4)?;
    if values[0] > values[2] || values[1] > values[3] {
        return Err(CoordError::Parse {
            input: input.to_string(),
            reason: "south/west must not exceed north/east".to_string(),
        });
    }
    Ok(ViewportBounds::from_edges(
        values[0], values[1], values[2], values[3],
    ))
}

fn parse_numbers(input: &str, expected: usize) -> Result<Vec<f64>, CoordError> {
    let values = input
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CoordError::Parse {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

    if values.len() != expected {
        return Err(CoordError::Parse {
            input: input.to_string(),
            reason: format!("expected {} comma-separated numbers", expected),
        });
    }

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CoordError::Parse {
            input: input.to_string(),
            reason: format!("{} is not a finite number", bad),
        });
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let coord = parse_coordinate("39.9242, -83.8089").unwrap();
        assert_eq!(coord, Coordinate::new(39.9242, -83.8089));
    }

    #[test]
    fn test_parse_coordinate_wrong_arity() {
        let result = parse_coordinate("39.9");
        assert!(matches!(result, Err(CoordError::Parse { .. })));
    }

    #[test]
    fn test_parse_coordinate_rejects_nan() {
        assert!(parse_coordinate("NaN,1.0").is_err());
        assert!(parse_coordinate("abc,1.0").is_err());
    }

    #[test]
    fn test_parse_bounds() {
        let bounds = parse_bounds("39.80,-83.10,39.90,-83.00").unwrap();
        assert_eq!(bounds.south(), 39.80);
        assert_eq!(bounds.west(), -83.10);
        assert_eq!(bounds.north(), 39.90);
        assert_eq!(bounds.east(), -83.00);
    }

    #[test]
    fn test_parse_bounds_inverted() {
        assert!(parse_bounds("39.90,-83.10,39.80,-83.00").is_err());
    }

    #[test]
    fn test_checked_rejects_non_finite() {
        assert!(matches!(
            Coordinate::checked(f64::NAN, 0.0),
            Err(CoordError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Coordinate::checked(0.0, f64::INFINITY),
            Err(CoordError::InvalidLongitude(_))
        ));
        assert!(Coordinate::checked(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_bounds_around_points() {
        let points = [
            Coordinate::new(39.9242, -83.8089),
            Coordinate::new(39.8031, -83.8898),
        ];
        let bounds = ViewportBounds::around(&points, 0.01).unwrap();

        assert!((bounds.south() - 39.7931).abs() < 1e-9);
        assert!((bounds.north() - 39.9342).abs() < 1e-9);
        assert!((bounds.west() - (-83.8998)).abs() < 1e-9);
        assert!((bounds.east() - (-83.7989)).abs() < 1e-9);
        assert!(points.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn test_bounds_around_empty() {
        assert!(ViewportBounds::around(&[], 0.01).is_none());
    }

    #[test]
    fn test_geo_conversion_axis_order() {
        let coord = Coordinate::new(39.85, -83.05);
        let geo_coord = coord.to_geo();
        assert_eq!(geo_coord.x, -83.05);
        assert_eq!(geo_coord.y, 39.85);
        assert_eq!(Coordinate::from_geo(geo_coord), coord);
    }
}
