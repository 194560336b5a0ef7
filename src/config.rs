// Copyright 2025 Cowboy AI, LLC.

//! Server configuration read from `CATTERY_*` environment variables

use crate::entity::{BreedId, NewBreed};
use crate::policy::{AllowAllBreeds, BreedSelectionPolicy, RetiredBreedsPolicy};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default SQLite database path
pub const DEFAULT_DATABASE: &str = "cattery.sqlite";

const BREED_NAME_MAX_LENGTH: usize = 255;
const BREED_DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used
    #[error("invalid {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending raw value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// The seed file could not be read
    #[error("cannot read seed file {path}: {source}")]
    SeedIo {
        /// Seed file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of breeds
    #[error("cannot parse seed file {path}: {source}")]
    SeedFormat {
        /// Seed file path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A seeded breed breaks the catalog rules
    #[error("invalid seed breed #{index}: {reason}")]
    InvalidSeedBreed {
        /// Position in the seed array
        index: usize,
        /// Which rule failed
        reason: String,
    },
}

/// Which store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite database at [`ServerConfig::database`]
    Sqlite,
    /// Process-local maps, lost on exit
    Memory,
}

/// Everything the server binary needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Store backend
    pub store: StoreKind,
    /// SQLite path, or `:memory:`
    pub database: PathBuf,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Breeds that may no longer be selected
    pub retired_breeds: Vec<BreedId>,
    /// Breeds inserted when the catalog is empty
    pub seed_breeds: Option<PathBuf>,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = var("CATTERY_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid("CATTERY_BIND", &bind_raw, e))?;

        let store = match var("CATTERY_STORE") {
            None => StoreKind::Sqlite,
            Some(raw) => match raw.trim() {
                "sqlite" => StoreKind::Sqlite,
                "memory" => StoreKind::Memory,
                _ => return Err(invalid("CATTERY_STORE", &raw, "expected sqlite or memory")),
            },
        };

        let log_json = match var("CATTERY_LOG_JSON") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| invalid("CATTERY_LOG_JSON", &raw, "expected a boolean"))?,
        };

        let retired_breeds = match var("CATTERY_RETIRED_BREEDS") {
            None => Vec::new(),
            Some(raw) => parse_breed_ids(&raw)?,
        };

        Ok(Self {
            bind,
            store,
            database: PathBuf::from(var("CATTERY_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string())),
            log_json,
            retired_breeds,
            seed_breeds: var("CATTERY_SEED_BREEDS").map(PathBuf::from),
        })
    }

    /// The policy implied by the retired breed list
    pub fn policy(&self) -> Arc<dyn BreedSelectionPolicy> {
        if self.retired_breeds.is_empty() {
            Arc::new(AllowAllBreeds)
        } else {
            Arc::new(RetiredBreedsPolicy::new(self.retired_breeds.iter().copied()))
        }
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_breed_ids(raw: &str) -> Result<Vec<BreedId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .ok()
                .and_then(BreedId::new)
                .ok_or_else(|| invalid("CATTERY_RETIRED_BREEDS", raw, format!("{s} is not a positive integer")))
        })
        .collect()
}

/// Read a JSON array of `{name, description}` breeds and check it against the catalog rules
pub fn load_seed_breeds(path: &Path) -> Result<Vec<NewBreed>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedIo {
        path: path.to_path_buf(),
        source,
    })?;
    let breeds: Vec<NewBreed> = serde_json::from_str(&raw).map_err(|source| ConfigError::SeedFormat {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, breed) in breeds.iter().enumerate() {
        let name_len = breed.name.encode_utf16().count();
        if !(1..=BREED_NAME_MAX_LENGTH).contains(&name_len) {
            return Err(ConfigError::InvalidSeedBreed {
                index,
                reason: format!("name must be 1 to {BREED_NAME_MAX_LENGTH} characters"),
            });
        }
        let description_len = breed.description.encode_utf16().count();
        if !(1..=BREED_DESCRIPTION_MAX_LENGTH).contains(&description_len) {
            return Err(ConfigError::InvalidSeedBreed {
                index,
                reason: format!("description must be 1 to {BREED_DESCRIPTION_MAX_LENGTH} characters"),
            });
        }
    }
    Ok(breeds)
}
