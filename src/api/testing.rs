//! In-memory transport and sleeper for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::client::RiotApiClient;
use super::transport::{RawResponse, Sleeper, Transport, TransportError};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub token: Option<String>,
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn all(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.all().into_iter().map(|c| c.url).collect()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[derive(Clone, Default)]
pub struct SleepLog(Arc<Mutex<Vec<Duration>>>);

impl SleepLog {
    pub fn recorded(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

struct RecordingSleeper(SleepLog);

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        (self.0).0.lock().unwrap().push(duration);
    }
}

#[derive(Debug, Clone)]
pub struct Reply(Result<RawResponse, TransportError>);

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::ok(&value.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        let status_text = match status {
            200 => "OK",
            403 => "Forbidden",
            404 => "Not Found",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "",
        };
        Reply(Ok(RawResponse {
            status,
            status_text: status_text.to_string(),
            retry_after: None,
            body: body.to_string(),
        }))
    }

    pub fn fail(message: &str) -> Self {
        Reply(Err(TransportError(message.to_string())))
    }

    pub fn retry_after(mut self, secs: u64) -> Self {
        if let Ok(resp) = &mut self.0 {
            resp.retry_after = Some(secs);
        }
        self
    }
}

/// Replies are served in order per URL; the last one repeats forever.
/// Unrouted URLs answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    log: CallLog,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, replies: Vec<Reply>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into_iter().collect());
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let token = headers
            .iter()
            .find(|(name, _)| *name == "X-Riot-Token")
            .map(|(_, value)| value.to_string());
        self.log.0.lock().unwrap().push(Call {
            url: url.to_string(),
            token,
        });

        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        reply.unwrap_or_else(|| Reply::status(404, "no route")).0
    }
}

pub fn test_config() -> Config {
    let mut config = Config::new("RGAPI-test", "kr");
    config.requests_per_second = std::num::NonZeroU32::new(10_000).unwrap();
    config
}

pub fn fake_client(transport: FakeTransport) -> (RiotApiClient, CallLog, SleepLog) {
    let calls = transport.log.clone();
    let sleeps = SleepLog::default();
    let client = RiotApiClient::with_transport(
        test_config(),
        Box::new(transport),
        Box::new(RecordingSleeper(sleeps.clone())),
    );
    (client, calls, sleeps)
}
