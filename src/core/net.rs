// src/core/net.rs
// Request Gateway: GET with a static browser identity and linear backoff on 429.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::config::consts::USER_AGENT;
use crate::config::options::RetryPolicy;
use crate::error::FetchError;

/// Raw outcome of one GET: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// One HTTP round trip, no retry policy. `Err` only for transport faults;
/// any received status is `Ok`.
pub trait Transport: Sync {
    fn get(&self, url: &str) -> Result<Response, FetchError>;
}

/// reqwest-backed transport. No cookie jar; headers are static.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };
        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(transport)?;
        Ok(Response { status, body })
    }
}

/// Every network call in the crate goes through here.
pub struct Gateway<T: Transport = HttpClient> {
    transport: T,
    policy: RetryPolicy,
}

impl Gateway<HttpClient> {
    pub fn http(timeout: Duration, policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        Ok(Self::new(HttpClient::new(timeout)?, policy))
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url`, returning the body of the first 2xx response.
    ///
    /// A 429 waits `backoff * (attempt + 1)` and tries again, for at most
    /// `max_retries` attempts in total (a zero budget still makes one). Any
    /// other non-2xx fails at once with [`FetchError::Http`]; running out of
    /// attempts fails with [`FetchError::RateLimited`].
    ///
    /// The wait after the final 429 still happens before `RateLimited` is
    /// returned, so a fully rate-limited call takes the sum of every wait
    /// (5 + 10 + 15 s with the defaults).
    pub fn get_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let attempts = self.policy.max_retries.max(1);

        for attempt in 0..attempts {
            let resp = self.transport.get(url)?;
            match resp.status {
                200..=299 => {
                    debug!("GET {url} -> {}", resp.status);
                    return Ok(resp.body);
                }
                429 => {
                    let wait = self.policy.wait_for(attempt);
                    warn!(
                        "Rate limited on {url} (attempt {}/{attempts}); retrying in {:.1}s",
                        attempt + 1,
                        wait.as_secs_f32()
                    );
                    thread::sleep(wait);
                }
                status => {
                    return Err(FetchError::Http { url: url.to_string(), status });
                }
            }
        }

        Err(FetchError::RateLimited { url: url.to_string(), attempts })
    }
}
