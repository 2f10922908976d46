// src/location/geocoder.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::coordinate::Coordinate;

/// Maps a coordinate to a country name.
///
/// Implementations never fail: anything that prevents an answer is reported
/// as an unknown country (`None`).
#[async_trait]
pub trait CountryResolver: Send + Sync {
    async fn resolve_country(&self, coordinate: Coordinate) -> Option<String>;
}

/// Why a lookup produced no country. Only ever logged.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("invalid geocoder url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoder returned status {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Service root; `/reverse` is appended.
    pub base_url: String,

    /// Sent as `User-Agent`; public Nominatim instances reject anonymous clients.
    pub user_agent: String,

    /// Sent as `accept-language`. Controls the spelling of returned country names.
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    country: Option<String>,
}

/// Reverse geocoding against a Nominatim-compatible service.
///
/// One request per call, no retry and no timeout.
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl NominatimResolver {
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    fn reverse_url(&self, coordinate: Coordinate) -> Result<Url, GeocodeError> {
        let endpoint = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));

        let mut params = vec![
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
            ("format", "json".to_string()),
        ];
        if let Some(language) = &self.config.language {
            params.push(("accept-language", language.clone()));
        }

        Ok(Url::parse_with_params(&endpoint, &params)?)
    }

    /// Performs the lookup, keeping the failure reason.
    pub async fn lookup(&self, coordinate: Coordinate) -> Result<Option<String>, GeocodeError> {
        let url = self.reverse_url(coordinate)?;
        tracing::debug!("Reverse geocoding {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: ReverseResponse = serde_json::from_slice(&body)?;

        Ok(parsed
            .address
            .and_then(|address| address.country)
            .filter(|country| !country.is_empty()))
    }
}

#[async_trait]
impl CountryResolver for NominatimResolver {
    async fn resolve_country(&self, coordinate: Coordinate) -> Option<String> {
        match self.lookup(coordinate).await {
            Ok(Some(country)) => Some(country),
            Ok(None) => {
                tracing::debug!(
                    "No country in geocoder response for ({}, {})",
                    coordinate.latitude,
                    coordinate.longitude
                );
                None
            }
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, country unknown: {}", e);
                None
            }
        }
    }
}
