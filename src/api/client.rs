use crate::config::Config;
use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;
use super::transport::{RawResponse, Sleeper, ThreadSleeper, Transport, UreqTransport};

pub const MAX_RATE_LIMIT_RETRIES: u32 = 3;
pub const MAX_TRANSPORT_RETRIES: u32 = 3;

const TOKEN_HEADER: &str = "X-Riot-Token";
const TOO_MANY_REQUESTS: u16 = 429;

/// Wait before retrying a 429: the server hint (1s when absent) plus one second.
pub fn rate_limit_delay(retry_after: Option<u64>) -> Duration {
    Duration::from_secs(retry_after.unwrap_or(1) + 1)
}

/// Linear backoff after a failed request: 1s, 2s, 3s.
pub fn transport_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (u64::from(attempt) + 1))
}

pub struct RiotApiClient {
    config: Config,
    transport: Box<dyn Transport>,
    sleeper: Box<dyn Sleeper>,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, Box::new(transport), Box::new(ThreadSleeper))
    }

    pub fn with_transport(
        config: Config,
        transport: Box<dyn Transport>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        let rate_limiter = RateLimiter::direct(Quota::per_second(config.requests_per_second));
        RiotApiClient {
            config,
            transport,
            sleeper,
            rate_limiter,
            clock: DefaultClock::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Client-side pacing so a wide fan-out does not trip 429s on its own.
    fn wait_for_quota(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, url: &str, authenticated: bool) -> Result<String, AppError> {
        let token = [(TOKEN_HEADER, self.config.api_key.as_str())];
        let headers: &[(&str, &str)] = if authenticated { &token } else { &[] };

        let mut rate_limit_retries = 0;
        let mut transport_retries = 0;

        loop {
            self.wait_for_quota();
            debug!(url, "GET");

            match self.transport.get(url, headers) {
                Ok(resp) if resp.is_success() => return Ok(resp.body),
                Ok(resp) if resp.status == TOO_MANY_REQUESTS => {
                    if rate_limit_retries >= MAX_RATE_LIMIT_RETRIES {
                        return Err(rate_limited(resp, rate_limit_retries));
                    }
                    let wait = rate_limit_delay(resp.retry_after);
                    warn!(
                        url,
                        retry = rate_limit_retries + 1,
                        wait_secs = wait.as_secs(),
                        "rate limited, waiting before retry"
                    );
                    self.sleeper.sleep(wait);
                    rate_limit_retries += 1;
                }
                Ok(resp) => {
                    return Err(AppError::RemoteError {
                        status: resp.status,
                        status_text: resp.status_text,
                        body: resp.body,
                    });
                }
                Err(err) => {
                    if transport_retries >= MAX_TRANSPORT_RETRIES {
                        return Err(AppError::HttpError {
                            attempts: transport_retries + 1,
                            message: err.0,
                        });
                    }
                    let wait = transport_delay(transport_retries);
                    warn!(
                        url,
                        retry = transport_retries + 1,
                        wait_ms = wait.as_millis() as u64,
                        error = %err.0,
                        "request failed, waiting before retry"
                    );
                    self.sleeper.sleep(wait);
                    transport_retries += 1;
                }
            }
        }
    }

    /// Authenticated GET decoded as `T`.
    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let body = self.execute_request(url, true)?;
        decode(url, &body)
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        self.fetch_json(&endpoints::account_by_riot_id(&self.config, game_name, tag_line))
    }

    pub fn get_summoner(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        self.fetch_json(&endpoints::summoner_by_puuid(&self.config, puuid))
    }

    /// Most recent match ids first; `count` is clamped to `[1, 100]`.
    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        self.fetch_json(&endpoints::match_ids_by_puuid(&self.config, puuid, count))
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.fetch_json(&endpoints::match_by_id(&self.config, match_id))
    }

    pub fn get_champion_masteries(&self, puuid: &str) -> Result<Vec<ChampionMasteryDto>, AppError> {
        self.fetch_json(&endpoints::masteries_by_puuid(&self.config, puuid))
    }

    /// Static Data Dragon catalogue. Not a Riot API call, so no token is sent.
    pub fn get_champion_data(&self) -> Result<DataDragonChampions, AppError> {
        let url = endpoints::ddragon_champions(&self.config);
        let body = self.execute_request(&url, false)?;
        decode(&url, &body)
    }
}

fn rate_limited(resp: RawResponse, retries: u32) -> AppError {
    AppError::RateLimited {
        status: resp.status,
        status_text: resp.status_text,
        body: resp.body,
        retries,
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::JsonError(format!("{}: {}", url, e)))
}
