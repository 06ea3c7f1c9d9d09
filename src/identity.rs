use crate::api::client::RiotApiClient;
use crate::api::models::{AccountDto, SummonerDto};
use crate::error::AppError;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A Riot ID, `name#tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTag {
    pub game_name: String,
    pub tag_line: String,
}

impl FromStr for PlayerTag {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidRiotId(s.to_string());

        let (name, tag) = s.split_once('#').ok_or_else(invalid)?;
        let (name, tag) = (name.trim(), tag.trim());
        if name.is_empty() || tag.is_empty() || tag.contains('#') {
            return Err(invalid());
        }

        Ok(PlayerTag {
            game_name: name.to_string(),
            tag_line: tag.to_string(),
        })
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Who a report is about.
#[derive(Debug, Clone)]
pub struct Identity {
    pub account: AccountDto,
    pub summoner: SummonerDto,
}

impl Identity {
    /// Summoner name when Riot still returns one, the Riot ID otherwise.
    pub fn display_name(&self) -> String {
        if !self.summoner.name.is_empty() {
            self.summoner.name.clone()
        } else if !self.account.game_name.is_empty() {
            format!("{}#{}", self.account.game_name, self.account.tag_line)
        } else {
            self.account.puuid.clone()
        }
    }
}

/// Account lookup, then profile lookup with the resulting puuid.
pub fn resolve(client: &RiotApiClient, tag: &PlayerTag) -> Result<Identity, AppError> {
    let account = client.get_account(&tag.game_name, &tag.tag_line)?;
    info!(player = %tag, "resolved account");

    let summoner = client.get_summoner(&account.puuid)?;
    info!(level = summoner.summoner_level, "resolved summoner profile");

    Ok(Identity { account, summoner })
}
