// src/catalog.rs

//! Country-keyed question sets.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::question::Question;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("country key '{0}' is defined more than once")]
    DuplicateKey(String),

    #[error("catalog contains an empty country key")]
    EmptyKey,
}

/// One country's question list as written in a catalog file.
///
/// ```json
/// { "country": "Brasil", "aliases": ["Brazil"], "questions": [{"question": "...", "answer": "..."}] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub country: String,

    /// Other spellings the geocoder may return for the same country.
    #[serde(default)]
    pub aliases: Vec<String>,

    pub questions: Vec<Question>,
}

/// Fixed mapping from country name to an ordered question list.
///
/// Lookups use exact, case-sensitive string equality against the country
/// name or one of its aliases.
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    sets: Vec<Vec<Question>>,
    keys: HashMap<String, usize>,
    countries: Vec<String>,
}

impl QuizCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut sets = Vec::with_capacity(entries.len());
        let mut keys = HashMap::new();
        let mut countries = Vec::with_capacity(entries.len());

        for entry in entries {
            let slot = sets.len();
            for key in std::iter::once(&entry.country).chain(entry.aliases.iter()) {
                if key.is_empty() {
                    return Err(CatalogError::EmptyKey);
                }
                if keys.insert(key.clone(), slot).is_some() {
                    return Err(CatalogError::DuplicateKey(key.clone()));
                }
            }
            countries.push(entry.country);
            sets.push(entry.questions);
        }
        countries.sort();

        Ok(Self {
            sets,
            keys,
            countries,
        })
    }

    /// Parses a JSON array of [`CatalogEntry`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Questions for `country`, in display order. Unknown countries get an
    /// empty slice.
    pub fn questions_for(&self, country: &str) -> &[Question] {
        self.keys
            .get(country)
            .map(|&slot| self.sets[slot].as_slice())
            .unwrap_or(&[])
    }

    /// Primary country names, sorted.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }
}

impl Default for QuizCatalog {
    /// The built-in catalog. Aliases cover the names the geocoder returns
    /// for `accept-language=pt-BR` and common English spellings.
    fn default() -> Self {
        let entries = vec![
            CatalogEntry {
                country: "Brasil".into(),
                aliases: vec!["Brazil".into()],
                questions: vec![
                    Question::new("Qual a capital do Brasil?", "Brasília"),
                    Question::new("Quantos estados o Brasil tem?", "26"),
                    Question::new("Qual é a moeda do Brasil?", "Real"),
                ],
            },
            CatalogEntry {
                country: "EUA".into(),
                aliases: vec!["Estados Unidos".into(), "United States".into()],
                questions: vec![
                    Question::new("Qual a capital dos EUA?", "Washington, D.C."),
                    Question::new("Quantos estados existem?", "50"),
                    Question::new("Qual é a moeda dos EUA?", "Dólar"),
                ],
            },
            CatalogEntry {
                country: "Itália".into(),
                aliases: vec!["Italia".into(), "Italy".into()],
                questions: vec![
                    Question::new("Qual é a capital da Itália?", "Roma"),
                    Question::new("Qual é a língua oficial da Itália?", "Italiano"),
                    Question::new("Em que ano a Itália foi unificada?", "1861"),
                ],
            },
        ];

        // Static table with distinct, non-empty keys.
        match Self::new(entries) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("built-in catalog is invalid: {e}"),
        }
    }
}
