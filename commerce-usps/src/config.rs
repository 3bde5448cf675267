//! Provider configuration for the USPS shipping method.
//!
//! Mirrors the settings a store administrator fills in: API credentials,
//! test/live mode, diagnostic logging toggles and the services to hide.
//! Loaded from TOML or from environment variables.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Mode was neither `test` nor `live`
    #[error("invalid mode {0:?} (expected \"test\" or \"live\")")]
    InvalidMode(String),
}

/// Which USPS endpoint to use.
///
/// Parsed case-insensitively, from TOML and the environment alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Test,
    Live,
}

impl Mode {
    pub fn is_test(self) -> bool {
        self == Mode::Test
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::Live => "live",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(Mode::Test),
            "live" => Ok(Mode::Live),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// USPS Web Tools credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub user_id: String,
    /// Issued with the user id. The rate API does not use it.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}

/// `[api_information]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInformation {
    #[serde(flatten)]
    pub credentials: Credentials,

    #[serde(default)]
    pub mode: Mode,
}

/// Diagnostic logging of carrier traffic. Does not change any result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Log outbound rate requests.
    pub request: bool,
    /// Log raw rate responses.
    pub response: bool,
}

/// `[options]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub log: LogOptions,
}

/// `[conditions]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    /// Service class ids to exclude from quotes.
    pub conditions: BTreeSet<String>,
}

/// Configuration of one USPS shipping method instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_information: ApiInformation,
    pub options: Options,
    pub conditions: Conditions,
}

impl ProviderConfig {
    /// Create a config with the given credentials and mode, logging off and
    /// nothing excluded.
    pub fn new(user_id: impl Into<String>, password: impl Into<String>, mode: Mode) -> Self {
        Self {
            api_information: ApiInformation {
                credentials: Credentials {
                    user_id: user_id.into(),
                    password: password.into(),
                },
                mode,
            },
            ..Default::default()
        }
    }

    /// Exclude the given service class ids.
    pub fn with_excluded_services<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.conditions = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request/response logging toggles.
    pub fn with_logging(mut self, request: bool, response: bool) -> Self {
        self.options.log = LogOptions { request, response };
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.api_information.credentials
    }

    pub fn mode(&self) -> Mode {
        self.api_information.mode
    }

    pub fn log(&self) -> LogOptions {
        self.options.log
    }

    pub fn excluded_services(&self) -> &BTreeSet<String> {
        &self.conditions.conditions
    }

    /// Parse from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build from the process environment.
    ///
    /// Reads `USPS_USER_ID`, `USPS_PASSWORD`, `USPS_MODE`,
    /// `USPS_EXCLUDED_SERVICES` (comma separated), `USPS_LOG_REQUEST` and
    /// `USPS_LOG_RESPONSE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match lookup("USPS_MODE") {
            Some(mode) => mode.parse()?,
            None => Mode::default(),
        };

        let flag = |key: &str| {
            lookup(key).is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
        };

        let excluded: Vec<String> = lookup("USPS_EXCLUDED_SERVICES")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self::new(
            lookup("USPS_USER_ID").unwrap_or_default(),
            lookup("USPS_PASSWORD").unwrap_or_default(),
            mode,
        )
        .with_excluded_services(excluded)
        .with_logging(flag("USPS_LOG_REQUEST"), flag("USPS_LOG_RESPONSE")))
    }
}
