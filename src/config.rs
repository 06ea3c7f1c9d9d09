use crate::error::AppError;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

const DEFAULT_REGION: &str = "kr";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 20;
const DEFAULT_DDRAGON_VERSION: &str = "14.25.1";
const DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Platform routing value (`kr`, `euw1`, ...).
    pub region: String,
    /// Regional routing value (`asia`, `europe`, ...).
    pub continent: String,
    pub platform_base: String,
    pub regional_base: String,
    pub ddragon_base: String,
    pub ddragon_version: String,
    pub request_timeout: Duration,
    pub requests_per_second: NonZeroU32,
    /// Set by `with_continent`; a later region switch keeps it.
    continent_pinned: bool,
    /// Set by `with_base_url`; a later region switch keeps the hosts.
    hosts_pinned: bool,
}

impl Config {
    /// Build a config for `region` with every other value defaulted.
    pub fn new(api_key: impl Into<String>, region: &str) -> Self {
        let region = region.to_lowercase();
        let continent = regional_routing(&region).to_string();

        Config {
            api_key: api_key.into(),
            platform_base: riot_host(&region),
            regional_base: riot_host(&continent),
            region,
            continent,
            ddragon_base: DDRAGON_BASE.to_string(),
            ddragon_version: DEFAULT_DDRAGON_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            requests_per_second: NonZeroU32::new(DEFAULT_RATE_LIMIT_PER_SECOND)
                .unwrap_or(NonZeroU32::MIN),
            continent_pinned: false,
            hosts_pinned: false,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;
        if !api_key.starts_with("RGAPI-") {
            return Err(AppError::ConfigError(
                "RIOT_API_KEY must start with RGAPI-".to_string(),
            ));
        }

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let mut config = Config::new(api_key, &region);

        if let Ok(continent) = env::var("RIOT_CONTINENT") {
            config = config.with_continent(&continent);
        }

        if let Some(secs) = env::var("RIOT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(rate) = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
        {
            config.requests_per_second = rate;
        }

        if let Ok(version) = env::var("DDRAGON_VERSION") {
            config.ddragon_version = version;
        }

        Ok(config)
    }

    /// Switch to another platform region. The continent is re-derived unless
    /// it was set explicitly; base-URL overrides are kept.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_lowercase();
        if !self.continent_pinned {
            self.continent = regional_routing(&self.region).to_string();
        }
        if !self.hosts_pinned {
            self.platform_base = riot_host(&self.region);
            self.regional_base = riot_host(&self.continent);
        }
        self
    }

    pub fn with_continent(mut self, continent: &str) -> Self {
        self.continent = continent.to_lowercase();
        if !self.hosts_pinned {
            self.regional_base = riot_host(&self.continent);
        }
        self.continent_pinned = true;
        self
    }

    /// Point every remote host at one base URL. Used against mock servers.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.platform_base = base.clone();
        self.regional_base = base.clone();
        self.ddragon_base = base;
        self.hosts_pinned = true;
        self
    }
}

fn riot_host(routing: &str) -> String {
    format!("https://{}.api.riotgames.com", routing)
}

pub fn regional_routing(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "asia",
    }
}
