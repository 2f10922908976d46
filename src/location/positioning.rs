// src/location/positioning.rs

use async_trait::async_trait;

use super::LocationError;
use crate::models::coordinate::Coordinate;

/// Answer to a location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Access to the device's positioning capability.
#[async_trait]
pub trait Positioning: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Position reported by the client on the device's behalf.
///
/// A client that reports no coordinate is treated as a user who declined
/// the permission prompt.
#[derive(Debug, Clone, Copy)]
pub struct ReportedPositioning {
    coordinate: Option<Coordinate>,
}

impl ReportedPositioning {
    pub fn granted(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
        }
    }

    pub fn denied() -> Self {
        Self { coordinate: None }
    }
}

impl From<Option<Coordinate>> for ReportedPositioning {
    fn from(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Positioning for ReportedPositioning {
    async fn request_permission(&self) -> PermissionStatus {
        match self.coordinate {
            Some(_) => PermissionStatus::Granted,
            None => PermissionStatus::Denied,
        }
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        self.coordinate.ok_or(LocationError::PositionUnavailable)
    }
}
