//! A client for retrieving problem pages from Codeforces.
//!
//! This module provides a high-level async interface for fetching a page and turning it into a
//! [`Problem`]. Every call performs exactly one request and keeps no state between calls, so a
//! single client can serve any number of concurrent fetches.

use std::time::Duration;

use reqwest::ClientBuilder;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::markup::Document;
use crate::{Error, Problem, ProblemId};

/// The base URL of the site.
pub const BASE_URL: &str = "https://codeforces.com";
/// The `User-Agent` header sent with every request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:141.0) Gecko/20100101 Firefox/141.0";
/// The duration before a request times out.
pub const TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    /// The final URL of the response.
    pub url: Url,
    /// The response body, undecoded.
    pub bytes: Vec<u8>,
    /// The charset named in the `Content-Type` header, if any.
    pub charset: Option<String>,
}

impl Page {
    /// Parses the page body into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the body is empty or not text.
    pub fn parse(&self) -> Result<Document, Error> {
        Ok(Document::parse_with_charset(
            &self.bytes,
            self.charset.as_deref(),
        )?)
    }
}

/// An asynchronous client for Codeforces problem pages.
#[derive(Debug, Clone)]
pub struct Client {
    /// The base URL that problem identifiers are resolved against.
    base_url: Url,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. For a non-panicking version, see
    /// [`Client::try_new`].
    #[must_use]
    pub fn new() -> Client {
        Client::try_new().expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// The client is configured with gzip support, a 30-second timeout and a browser-like user
    /// agent.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::BuildClient`] if the underlying `reqwest` client fails to build.
    pub fn try_new() -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .gzip(true)
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Client::with_client(client))
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple services or require
    /// custom configuration (e.g., proxies, custom headers).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Client {
        let base_url = Url::parse(BASE_URL).expect("valid base url");

        Client { base_url, client }
    }

    /// Replaces the base URL that [`ProblemId`]s are resolved against.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Client {
        self.base_url = base_url;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Retrieves the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the URL is rejected by the transport, the request fails or
    /// times out, or the server responds with a non-success status.
    pub async fn fetch(&self, url: &str) -> Result<Page, Error> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| {
                debug!(%url, error = %err, "could not fetch page");

                Error::Network(err)
            })?;

        let url = response.url().clone();
        let status = response.status();
        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);
        let bytes = response.bytes().await.map_err(Error::Network)?.to_vec();

        debug!(%url, %status, len = bytes.len(), ?charset, "fetched page");

        Ok(Page {
            url,
            bytes,
            charset,
        })
    }

    /// Retrieves the problem page at `url` and extracts the problem from it.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] if the page could not be retrieved.
    /// - [`Error::Parse`] if the page is empty or not text.
    pub async fn problem(&self, url: &str) -> Result<Problem, Error> {
        let page = self.fetch(url).await?;
        let document = page.parse()?;

        Ok(Problem::from_document(&document))
    }

    /// Retrieves the problem identified by `id`, relative to the base URL.
    ///
    /// # Errors
    ///
    /// See [`Client::problem`].
    pub async fn problem_by_id(&self, id: &ProblemId) -> Result<Problem, Error> {
        let url = id.url(&self.base_url)?;

        self.problem(url.as_str()).await
    }
}

impl Default for Client {
    /// Creates a default `Client` instance.
    ///
    /// This is equivalent to calling [`Client::new`].
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the `charset` parameter of a `Content-Type` header value.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;

        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_client() {
        let http_client = reqwest::Client::new();
        let client = Client::with_client(http_client);

        assert_eq!(client.base_url().as_str(), "https://codeforces.com/");
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=UTF-8").as_deref(),
            Some("UTF-8")
        );
        assert_eq!(
            charset_from_content_type("text/html;Charset=\"windows-1251\"").as_deref(),
            Some("windows-1251")
        );
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn test_page_parse_uses_charset() {
        let page = Page {
            url: Url::parse("http://localhost/").unwrap(),
            bytes: b"<div class=\"title\">\xc0. \xd2\xe5\xf1\xf2</div>".to_vec(),
            charset: Some("windows-1251".to_string()),
        };
        let problem = Problem::from_document(&page.parse().unwrap());

        assert_eq!(problem.title, "А. Тест");
    }
}
