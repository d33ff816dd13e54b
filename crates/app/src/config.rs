//! Environment configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;

use merchdesk_infra::{InMemoryCatalog, SourceError};
use merchdesk_observability::{LogFormat, ParseLogFormatError};

pub const FIXTURES_VAR: &str = "MERCHDESK_FIXTURES";
pub const LOG_FORMAT_VAR: &str = "MERCHDESK_LOG_FORMAT";
pub const FAIL_PRODUCT_PUBLISH_VAR: &str = "MERCHDESK_FAIL_PRODUCT_PUBLISH";
pub const FAIL_INVENTORY_PUBLISH_VAR: &str = "MERCHDESK_FAIL_INVENTORY_PUBLISH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MERCHDESK_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),

    #[error("{var}: expected `true` or `false`, got `{value}`")]
    InvalidBool { var: &'static str, value: String },

    #[error("failed to read fixtures {path:?}: {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixtures {path:?} are not valid JSON: {source}")]
    FixtureJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixtures {path:?} do not describe a catalog: {source}")]
    FixtureCatalog {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// JSON document `{ "products": [...], "inventory": [...] }` seeding the catalog.
    pub fixtures: Option<PathBuf>,
    pub log_format: LogFormat,
    pub fail_product_publish: bool,
    pub fail_inventory_publish: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            fixtures: lookup(FIXTURES_VAR)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_format,
            fail_product_publish: parse_flag(FAIL_PRODUCT_PUBLISH_VAR, lookup(FAIL_PRODUCT_PUBLISH_VAR))?,
            fail_inventory_publish: parse_flag(
                FAIL_INVENTORY_PUBLISH_VAR,
                lookup(FAIL_INVENTORY_PUBLISH_VAR),
            )?,
        })
    }

    /// Build the in-memory catalog described by this configuration.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog, ConfigError> {
        let catalog = match &self.fixtures {
            Some(path) => load_fixtures(path)?,
            None => {
                tracing::warn!("{FIXTURES_VAR} not set; starting with an empty catalog");
                InMemoryCatalog::new()
            }
        };
        catalog.fail_product_publish(self.fail_product_publish);
        catalog.fail_inventory_publish(self.fail_inventory_publish);
        Ok(catalog)
    }
}

fn parse_flag(var: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

fn load_fixtures(path: &Path) -> Result<InMemoryCatalog, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ConfigError::FixtureJson {
            path: path.to_path_buf(),
            source,
        })?;
    InMemoryCatalog::from_fixture(&json).map_err(|source| ConfigError::FixtureCatalog {
        path: path.to_path_buf(),
        source,
    })
}
