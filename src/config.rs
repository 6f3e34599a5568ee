use camino::Utf8Path;

use crate::error::ConfigError;

/// The delimiter set used when nobody says otherwise.
pub const DEFAULT_DELIMITERS: &str = ",";

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characters that split a tag list string.
    ///
    /// Each character is its own delimiter, so `",;"` splits on commas *and*
    /// semicolons. The first one is used to glue lists back together.
    pub delimiters: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiters: String::from(DEFAULT_DELIMITERS),
        }
    }
}

impl Config {
    pub fn new(delimiters: impl Into<String>) -> Self {
        Self {
            delimiters: delimiters.into(),
        }
    }

    /// Attempts to read a previous `Config` from disk.
    ///
    /// Keys missing from the file take their default values.
    #[tracing::instrument]
    pub async fn from_disk(path: &Utf8Path) -> Result<Self, ConfigError> {
        // read the config from disk
        let s = tokio::fs::read_to_string(path)
            .await
            .inspect_err(|e| tracing::warn!("Failed to read tagging config. err: {e}"))
            .map_err(ConfigError::ReadFailed)?;

        Self::from_toml(&s)
    }

    /// Parses a `Config` from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let conf: Self = toml::from_str(s).map_err(ConfigError::ParseFailed)?;

        if conf.delimiters.is_empty() {
            tracing::error!("loaded a tagging config, but it had no delimiters.");
            return Err(ConfigError::NoDelimiters);
        }

        Ok(conf)
    }

    /// The character used to join tag lists into a single string.
    pub fn glue(&self) -> char {
        self.delimiters.chars().next().unwrap_or(',')
    }
}
