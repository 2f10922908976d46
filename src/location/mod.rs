// src/location/mod.rs

//! Device position to country name.

pub mod geocoder;
pub mod positioning;

use thiserror::Error;

use crate::models::coordinate::Coordinate;
use geocoder::CountryResolver;
use positioning::{PermissionStatus, Positioning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("device position unavailable")]
    PositionUnavailable,
}

/// Result of the locating stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub coordinate: Coordinate,

    /// `None` when the geocoder failed or returned no country.
    pub country: Option<String>,
}

/// Asks for permission, reads the position, then resolves the country.
///
/// The steps run one after the other. A denial stops the flow before the
/// position is read or the geocoder is called.
pub async fn resolve_location(
    positioning: &dyn Positioning,
    resolver: &dyn CountryResolver,
) -> Result<Location, LocationError> {
    if positioning.request_permission().await == PermissionStatus::Denied {
        tracing::info!("Location permission denied");
        return Err(LocationError::PermissionDenied);
    }

    let coordinate = positioning.current_position().await?;
    let country = resolver.resolve_country(coordinate).await;
    tracing::info!(
        "Detected country: {:?} at ({}, {})",
        country,
        coordinate.latitude,
        coordinate.longitude
    );

    Ok(Location {
        coordinate,
        country,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::positioning::ReportedPositioning;
    use super::*;

    struct CountingResolver {
        country: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn new(country: Option<&'static str>) -> Self {
            Self {
                country,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CountryResolver for CountingResolver {
        async fn resolve_country(&self, _coordinate: Coordinate) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.country.map(str::to_string)
        }
    }

    #[tokio::test]
    async fn test_resolves_country() {
        let positioning = ReportedPositioning::granted(Coordinate::new(-15.78, -47.93));
        let resolver = CountingResolver::new(Some("Brasil"));

        let location = resolve_location(&positioning, &resolver).await.unwrap();

        assert_eq!(location.coordinate, Coordinate::new(-15.78, -47.93));
        assert_eq!(location.country.as_deref(), Some("Brasil"));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_country_is_not_an_error() {
        let positioning = ReportedPositioning::granted(Coordinate::new(0.0, 0.0));
        let resolver = CountingResolver::new(None);

        let location = resolve_location(&positioning, &resolver).await.unwrap();
        assert_eq!(location.country, None);
    }

    #[tokio::test]
    async fn test_denial_skips_geocoder() {
        let positioning = ReportedPositioning::denied();
        let resolver = CountingResolver::new(Some("Brasil"));

        let result = resolve_location(&positioning, &resolver).await;

        assert_eq!(result, Err(LocationError::PermissionDenied));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }
}
