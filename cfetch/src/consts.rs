//! Application defaults.
use std::time::Duration;

/// The `User-Agent` header to send when issuing HTTP requests.
pub const HTTP_USER_AGENT: &str = cf_statement::client::USER_AGENT;

/// The duration before a HTTP request times out.
pub const HTTP_TIMEOUT: Duration = cf_statement::client::TIMEOUT;

/// The maximum number of redirects to follow for a single request.
pub const HTTP_MAX_REDIRECTS: usize = 10;

/// The URL that problem identifiers are resolved against.
pub const DEFAULT_BASE_URL: &str = cf_statement::client::BASE_URL;

/// The default number of problems fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// The configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "cfetch.toml";

/// The prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "CFETCH_";
