// src/config.rs

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use dotenvy::dotenv;

use crate::location::geocoder::GeocoderConfig;
use crate::scorer::DEFAULT_PASS_THRESHOLD;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_GEOCODER_LANGUAGE: &str = "pt-BR";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    pub geocoder: GeocoderConfig,
    /// JSON catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<String>,
    pub pass_threshold: f64,
    pub cors_origins: Vec<String>,
    /// Sessions older than this are dropped from memory.
    pub session_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            geocoder: GeocoderConfig {
                base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
                user_agent: default_user_agent(),
                language: Some(DEFAULT_GEOCODER_LANGUAGE.to_string()),
            },
            catalog_path: None,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// Unset variables take their defaults; malformed ones are an error so
    /// that startup stops instead of silently falling back.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let bind_addr = parse_bind_addr(env::var("BIND_ADDR").ok().as_deref())?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let geocoder = GeocoderConfig {
            base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string()),
            user_agent: env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            language: parse_language(env::var("GEOCODER_LANGUAGE").ok()),
        };

        let catalog_path = env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty());

        let pass_threshold = parse_pass_threshold(env::var("PASS_THRESHOLD").ok().as_deref())?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let session_ttl_secs = parse_session_ttl(env::var("SESSION_TTL_SECS").ok().as_deref())?;

        Ok(Self {
            bind_addr,
            rust_log,
            log_dir,
            geocoder,
            catalog_path,
            pass_threshold,
            cors_origins,
            session_ttl_secs,
        })
    }
}

fn default_user_agent() -> String {
    format!("geoquiz/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_bind_addr(raw: Option<&str>) -> anyhow::Result<SocketAddr> {
    let raw = raw.unwrap_or(DEFAULT_BIND_ADDR);
    raw.trim()
        .parse()
        .with_context(|| format!("invalid BIND_ADDR '{}'", raw))
}

/// Unset means the default language; an empty value disables the parameter.
fn parse_language(raw: Option<String>) -> Option<String> {
    match raw {
        None => Some(DEFAULT_GEOCODER_LANGUAGE.to_string()),
        Some(lang) if lang.trim().is_empty() => None,
        Some(lang) => Some(lang.trim().to_string()),
    }
}

fn parse_pass_threshold(raw: Option<&str>) -> anyhow::Result<f64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PASS_THRESHOLD);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid PASS_THRESHOLD '{}'", raw))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("PASS_THRESHOLD must be between 0 and 1, got {}", value);
    }
    Ok(value)
}

fn parse_session_ttl(raw: Option<&str>) -> anyhow::Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_SECS);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid SESSION_TTL_SECS '{}'", raw))?;
    if value == 0 {
        bail!("SESSION_TTL_SECS must be positive");
    }
    Ok(value)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
