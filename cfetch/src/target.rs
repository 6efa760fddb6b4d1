use std::fmt;
use std::str::FromStr;

use cf_statement::ProblemId;
use url::Url;

use crate::Error;

/// A problem to fetch, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An absolute problem page URL.
    Url(Url),
    /// A problem identifier, resolved against the configured base URL.
    Id(ProblemId),
}

impl Target {
    /// Returns the page URL of the target, resolving identifiers against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if the identifier cannot be joined onto `base_url`.
    pub fn url(&self, base_url: &Url) -> Result<Url, Error> {
        match self {
            Target::Url(url) => Ok(url.clone()),
            Target::Id(id) => id
                .url(base_url)
                .map_err(|_| Error::InvalidTarget(id.to_string())),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains("://") {
            Url::parse(s)
                .map(Target::Url)
                .map_err(|_| Error::InvalidTarget(s.to_string()))
        } else {
            s.parse()
                .map(Target::Id)
                .map_err(|_| Error::InvalidTarget(s.to_string()))
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Url(url) => write!(f, "{url}"),
            Target::Id(id) => write!(f, "{id}"),
        }
    }
}
