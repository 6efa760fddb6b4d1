//! Error types

use miette::Diagnostic;
use thiserror::Error;

/// Application errors for configuration, HTTP and extraction.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("Could not load configuration")]
    #[diagnostic(
        code(cfetch::config),
        help("check the configuration file and any CFETCH_ environment variables")
    )]
    Config(#[source] Box<figment::Error>),
    /// The HTTP client could not be built.
    #[error("Could not build HTTP client")]
    #[diagnostic(code(cfetch::http_client))]
    HttpClient(#[source] reqwest::Error),
    /// A command-line target is neither a URL nor a problem identifier.
    #[error("Invalid target `{0}`")]
    #[diagnostic(
        code(cfetch::invalid_target),
        help("use a problem URL or an identifier such as `158A` or `158/A`")
    )]
    InvalidTarget(String),
    /// A problem could not be fetched or extracted.
    #[error("Could not fetch problem {target}")]
    #[diagnostic(code(cfetch::fetch))]
    Fetch {
        /// The target as given on the command line.
        target: String,
        /// The underlying error.
        #[source]
        source: cf_statement::Error,
    },
    /// No targets were given.
    #[error("No problems to fetch")]
    #[diagnostic(code(cfetch::no_targets), help("pass one or more problem URLs or identifiers"))]
    NoTargets,
    /// One or more problems could not be fetched.
    #[error("{failed} of {total} problem(s) could not be fetched")]
    #[diagnostic(code(cfetch::failed))]
    Failed {
        /// Number of failed targets.
        failed: usize,
        /// Number of targets.
        total: usize,
    },
    /// The output could not be serialized.
    #[error("Could not serialize output")]
    #[diagnostic(code(cfetch::serialize))]
    Serialize(#[from] serde_json::Error),
}
