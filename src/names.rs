// Manager name resolution.
//
// Raw owner identifiers from the provider are lowercase "first last" strings
// (or opaque IDs for old seasons). An optional CSV with ID,Name headers maps
// them to the display names the league actually uses; anything unmapped
// falls back to title-casing the raw value.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum NameMapError {
    #[error("failed to read name map {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in name map {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// CSV row: `ID,Name`. Field names match the file's headers.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawNameRow {
    ID: String,
    Name: String,
}

/// Owner identifier -> display name mapping.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    names: HashMap<String, String>,
}

impl NameMap {
    /// An empty map: every lookup falls back to title-casing.
    pub fn empty() -> Self {
        NameMap::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(rdr);
        let mut names = HashMap::new();
        for result in reader.deserialize::<RawNameRow>() {
            match result {
                Ok(raw) => {
                    let id = raw.ID.trim().to_string();
                    if names.contains_key(&id) {
                        warn!("duplicate name map entry for '{}', using latest value", id);
                    }
                    names.insert(id, raw.Name.trim().to_string());
                }
                Err(e) => {
                    warn!("skipping malformed name map row: {}", e);
                }
            }
        }
        Ok(NameMap { names })
    }

    /// Load the map from a CSV file with `ID,Name` headers.
    pub fn from_path(path: &Path) -> Result<Self, NameMapError> {
        let file = std::fs::File::open(path).map_err(|e| NameMapError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file).map_err(|e| NameMapError::Csv {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Resolve a raw owner identifier to its display name. Unmapped values
    /// are title-cased as-is.
    pub fn resolve(&self, raw: &str) -> String {
        match self.names.get(raw.trim()) {
            Some(name) => name.clone(),
            None => title_case(raw.trim()),
        }
    }
}

/// Uppercase the first letter of each whitespace-separated word, lowercase
/// the rest.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
