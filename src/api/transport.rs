//! The raw HTTP seam under [`RiotApiClient`](super::client::RiotApiClient).
//!
//! A transport performs exactly one GET and reports what the server said.
//! It never retries and never interprets status codes; that is the client's job.

use crate::config::Config;
use std::thread;
use std::time::Duration;

/// One HTTP answer, whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// `Retry-After` header in whole seconds, when present and numeric.
    pub retry_after: Option<u64>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a readable answer (DNS, connect, timeout, body read).
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

pub trait Transport: Send + Sync {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse, TransportError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .user_agent(concat!("summoner_report/", env!("CARGO_PKG_VERSION")))
            .build();
        UreqTransport { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.call() {
            Ok(resp) => resp,
            // ureq reports every 4xx/5xx as an error; those are still answers.
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(t)) => return Err(TransportError(t.to_string())),
        };

        let status = response.status();
        let status_text = response.status_text().to_string();
        let retry_after = response
            .header("Retry-After")
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response
            .into_string()
            .map_err(|e| TransportError(format!("failed to read response body: {}", e)))?;

        Ok(RawResponse {
            status,
            status_text,
            retry_after,
            body,
        })
    }
}

/// Timed suspension used between retries.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
