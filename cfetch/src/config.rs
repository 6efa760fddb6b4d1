//! Layered configuration: defaults, then a TOML file, then `CFETCH_` environment variables.
use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, consts};

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// The URL that problem identifiers are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Maximum number of problems to fetch at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// HTTP client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Maximum duration of a single request, including reading the body
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    /// The `User-Agent` header sent with every request
    #[serde(default = "default_http_user_agent")]
    pub user_agent: String,
    /// Maximum number of redirects to follow
    #[serde(default = "default_http_max_redirects")]
    pub max_redirects: usize,
}

/// Logging and span export configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Export spans over OTLP
    #[serde(default)]
    pub enabled: bool,
    /// Format of the log lines written to stderr
    #[serde(default)]
    pub format: LogFormat,
}

/// Format of log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl Config {
    /// Returns the layered configuration sources: the TOML file at `path`, if it exists, overridden
    /// by `CFETCH_`-prefixed environment variables. Nested keys are separated by `__`, e.g.
    /// `CFETCH_HTTP__TIMEOUT=5s`.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(consts::ENV_PREFIX).split("__"))
    }

    /// Loads the configuration from `path` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a source cannot be read or a value has the wrong type.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, Error> {
        Config::from_figment(&Config::figment(path))
    }

    /// Extracts the configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a value has the wrong type.
    pub fn from_figment(figment: &Figment) -> Result<Config, Error> {
        figment
            .extract()
            .map_err(|err| Error::Config(Box::new(err)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            concurrency: default_concurrency(),
            http: HttpConfig::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout: default_http_timeout(),
            user_agent: default_http_user_agent(),
            max_redirects: default_http_max_redirects(),
        }
    }
}

/// Default for [`Config::base_url`].
#[must_use]
pub fn default_base_url() -> Url {
    Url::parse(consts::DEFAULT_BASE_URL).expect("valid default base url")
}

/// Default for [`Config::concurrency`].
#[must_use]
pub const fn default_concurrency() -> usize {
    consts::DEFAULT_CONCURRENCY
}

/// Default for [`HttpConfig::timeout`].
#[must_use]
pub const fn default_http_timeout() -> Duration {
    consts::HTTP_TIMEOUT
}

/// Default for [`HttpConfig::user_agent`].
#[must_use]
pub fn default_http_user_agent() -> String {
    consts::HTTP_USER_AGENT.to_string()
}

/// Default for [`HttpConfig::max_redirects`].
#[must_use]
pub const fn default_http_max_redirects() -> usize {
    consts::HTTP_MAX_REDIRECTS
}
