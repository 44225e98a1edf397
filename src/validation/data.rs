//! Sanity checks on incoming fixes and configured points

use crate::core::{GeoPoint, PointOfInterest, PositionFix};
use crate::validation::error::{KinematicsError, Result};

/// Check a fix is usable: finite coordinates inside the WGS84 range and a
/// finite, non-negative speed. Heading is not checked, any value is either a
/// direction or the unknown sentinel.
pub fn validate_fix(fix: &PositionFix) -> Result<()> {
    validate_coordinates(fix)?;
    if !fix.speed_mps.is_finite() || fix.speed_mps < 0.0 {
        return Err(KinematicsError::InvalidSpeed {
            value: fix.speed_mps,
        });
    }
    Ok(())
}

pub fn validate_point(point: &PointOfInterest) -> Result<()> {
    validate_coordinates(point)
}

fn validate_coordinates<P: GeoPoint + ?Sized>(point: &P) -> Result<()> {
    let latitude = point.latitude();
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(KinematicsError::InvalidCoordinate {
            field: "latitude",
            value: latitude,
        });
    }
    let longitude = point.longitude();
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(KinematicsError::InvalidCoordinate {
            field: "longitude",
            value: longitude,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fix() {
        let fix = PositionFix::new(54.37738, 18.50218, 0).with_speed(3.0).with_heading(-1.0);
        assert!(validate_fix(&fix).is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let fix = PositionFix::new(95.0, 18.5, 0);
        assert!(matches!(
            validate_fix(&fix),
            Err(KinematicsError::InvalidCoordinate { field: "latitude", .. })
        ));

        let fix = PositionFix::new(54.0, -200.0, 0);
        assert!(matches!(
            validate_fix(&fix),
            Err(KinematicsError::InvalidCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_nan_coordinates() {
        let fix = PositionFix::new(f64::NAN, 18.5, 0);
        assert!(validate_fix(&fix).is_err());
        let point = PointOfInterest::new("nowhere", f64::NAN, 54.0);
        assert!(validate_point(&point).is_err());
    }

    #[test]
    fn test_bad_speed() {
        let fix = PositionFix::new(54.0, 18.5, 0).with_speed(-1.0);
        assert!(matches!(validate_fix(&fix), Err(KinematicsError::InvalidSpeed { .. })));
        let fix = PositionFix::new(54.0, 18.5, 0).with_speed(f32::NAN);
        assert!(validate_fix(&fix).is_err());
    }
}
