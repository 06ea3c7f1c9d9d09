use serde::Deserialize;
use std::collections::HashMap;

// Account V1 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// Summoner V4 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
    /// Deprecated upstream, usually empty.
    #[serde(default)]
    pub name: String,
    pub summoner_level: i64,
}

// Match V5 response
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub info: MatchInfo,
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

// Champion Mastery V4 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMasteryDto {
    pub champion_id: i64,
    pub champion_points: i64,
    /// Not part of the Riot payload; honoured when a proxy adds it.
    #[serde(default)]
    pub champion_name: Option<String>,
}

// Data Dragon champion.json
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    pub data: HashMap<String, ChampionInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionInfo {
    pub name: String,
    /// Numeric champion id, as a string.
    pub key: String,
}

impl DataDragonChampions {
    /// Map numeric champion ids to display names.
    pub fn names_by_id(&self) -> HashMap<i64, String> {
        self.data
            .values()
            .filter_map(|c| c.key.parse::<i64>().ok().map(|id| (id, c.name.clone())))
            .collect()
    }
}
