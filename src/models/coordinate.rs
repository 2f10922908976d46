// src/models/coordinate.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A device position in floating-point degrees.
/// Captured once per session and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// DTO for opening a quiz session.
///
/// The client reports the position the device gave it. Omitting both fields
/// means the user declined location access.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct LocateRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl LocateRequest {
    /// Returns the reported coordinate.
    ///
    /// * `Ok(None)`: nothing reported (permission denied).
    /// * `Err(_)`: only one of the two fields present.
    pub fn coordinate(&self) -> Result<Option<Coordinate>, &'static str> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinate::new(lat, lon))),
            (None, None) => Ok(None),
            _ => Err("latitude and longitude must be reported together"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let req = LocateRequest {
            latitude: Some(91.0),
            longitude: Some(0.0),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_out_of_range_longitude_rejected() {
        let req = LocateRequest {
            latitude: Some(0.0),
            longitude: Some(-180.5),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_half_reported_coordinate_is_an_error() {
        let req = LocateRequest {
            latitude: Some(-15.79),
            longitude: None,
        };
        assert!(req.validate().is_ok());
        assert!(req.coordinate().is_err());
    }

    #[test]
    fn test_nothing_reported_means_no_coordinate() {
        let req = LocateRequest::default();
        assert_eq!(req.coordinate(), Ok(None));
    }

    #[test]
    fn test_full_coordinate() {
        let req = LocateRequest {
            latitude: Some(-15.79),
            longitude: Some(-47.88),
        };
        assert_eq!(
            req.coordinate(),
            Ok(Some(Coordinate::new(-15.79, -47.88)))
        );
    }
}
