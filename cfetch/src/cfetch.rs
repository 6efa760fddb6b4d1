//! Fetching of problems over a shared client.
use cf_statement::{Client, Problem};
use futures::stream::{self, StreamExt};
use tracing::info;

use crate::config::Config;
use crate::{Error, Target, http};

/// Fetches problems with a single shared HTTP client.
#[derive(Debug, Clone)]
pub struct Cfetch {
    /// The configuration the client was built from
    config: Config,
    /// The problem client, shared by every fetch
    client: Client,
}

impl Cfetch {
    /// Creates a new `Cfetch` from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpClient`] if the HTTP client could not be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        let http_client = http::build_client(&config.http)?;
        let client = Client::with_client(http_client).with_base_url(config.base_url.clone());

        Ok(Cfetch { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches and extracts a single problem.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTarget`] if the target cannot be resolved to a URL.
    /// - [`Error::Fetch`] if the page could not be retrieved or parsed.
    #[tracing::instrument(skip(self), fields(%target))]
    pub async fn fetch(&self, target: &Target) -> Result<Problem, Error> {
        let url = target.url(self.client.base_url())?;
        let problem = self
            .client
            .problem(url.as_str())
            .await
            .map_err(|source| Error::Fetch {
                target: target.to_string(),
                source,
            })?;

        info!(%url, title = %problem.title, samples = problem.samples.len(), "fetched problem");

        Ok(problem)
    }

    /// Fetches every target, running up to `concurrency` requests at once.
    ///
    /// The results are returned in the order of `targets`, and a failure of one target does not
    /// affect the others. Failures are returned rather than logged; reporting them is up to the
    /// caller.
    pub async fn fetch_all(&self, targets: &[Target]) -> Vec<Result<Problem, Error>> {
        let concurrency = self.config.concurrency.max(1);

        stream::iter(targets)
            .map(|target| self.fetch(target))
            .buffered(concurrency)
            .collect()
            .await
    }
}
