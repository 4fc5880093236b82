//! Blocking HTTP client with separate connect and read timeouts. One request per call, no retries.

use crate::config::{FetchConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; versescrape/",
    env!("CARGO_PKG_VERSION"),
    ")"
);
const MAX_REDIRECTS: usize = 10;

/// Blocking HTTP client used for the single passage request.
#[derive(Debug)]
pub struct PassageClient {
    inner: reqwest::blocking::Client,
}

impl PassageClient {
    /// Build a client with the default User-Agent and timeouts.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> PassageClientBuilder {
        PassageClientBuilder::default()
    }

    /// Build a client from the run's fetch configuration.
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Self::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout);
        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }

    /// Build (without sending) a GET request for `url` with the given query pairs.
    pub fn request(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::blocking::Request, reqwest::Error> {
        self.inner.get(url).query(query).build()
    }

    /// Perform a single GET request with the given query pairs.
    pub fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::blocking::Response, reqwest::Error> {
        let request = self.request(url, query)?;
        self.inner.execute(request)
    }
}

/// Builder for PassageClient with optional User-Agent and timeouts.
#[derive(Debug)]
pub struct PassageClientBuilder {
    user_agent: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Default for PassageClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

impl PassageClientBuilder {
    /// Set a custom User-Agent. If not set, a browser-like default is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the time allowed to establish a connection. Default 30s.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the time allowed for the response once connected. Default 10s.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Overall request timeout: connect plus read.
    fn total_timeout(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }

    /// Build the blocking client.
    pub fn build(self) -> Result<PassageClient, reqwest::Error> {
        let timeout = self.total_timeout();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(self.connect_timeout)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(PassageClient { inner })
    }
}
