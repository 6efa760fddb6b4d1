use thiserror::Error;

/// Error.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be built.
    #[cfg(feature = "client")]
    #[error("could not construct http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    /// The page could not be retrieved. Nothing has been parsed.
    #[cfg(feature = "client")]
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The retrieved content could not be turned into a document.
    #[error("could not parse document: {0}")]
    Parse(#[from] ParseError),
    /// A problem identifier did not have the `<contest><index>` shape.
    #[error("invalid problem identifier: {0:?}")]
    InvalidProblemId(String),
    /// The problem URL could not be constructed from the base URL.
    #[error("invalid problem url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Reasons for which raw content does not yield any markup tree.
///
/// Malformed markup is never one of them; the parser recovers from unclosed tags, stray end tags
/// and unknown entities on its own.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    #[error("input is empty")]
    Empty,
    /// The input contained NUL characters and is not text.
    #[error("input is not text")]
    Binary,
    /// The parser produced no root element.
    #[error("document has no root element")]
    NoRoot,
}
