// src/core/net.rs
// Blocking HTTP GET. One request at a time; every failure is recoverable.

use std::{io::Read, thread, time::Duration};

use crate::config::options::NetOptions;
use crate::error::FetchError;

/// "GET bytes given a URL". Non-2xx, timeouts and connection errors are all
/// `FetchError::Transport`.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}

pub struct HttpClient {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl HttpClient {
    pub fn new(opts: &NetOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(opts.timeout())
            .user_agent(&opts.user_agent)
            .build();
        Self { agent, max_bytes: opts.max_bytes }
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = match self.agent.get(url).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => return Err(FetchError::transport(url, format!("HTTP {code}"))),
            Err(e) => return Err(FetchError::transport(url, e)),
        };

        let mut buf = Vec::new();
        resp.into_reader()
            .take(self.max_bytes)
            .read_to_end(&mut buf)
            .map_err(|e| FetchError::transport(url, e))?;
        Ok(buf)
    }
}

/// Sleeps after every request, successful or not. Wrapping the transport once
/// means no caller can issue two requests back to back.
pub struct Paced<F> {
    inner: F,
    delay: Duration,
}

impl<F: Fetch> Paced<F> {
    pub fn new(inner: F, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn into_inner(self) -> F { self.inner }
}

impl<F: Fetch> Fetch for Paced<F> {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {url}");
        let result = self.inner.get(url);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        result
    }
}
