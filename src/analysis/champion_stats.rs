use std::collections::HashMap;
use std::fmt;

use crate::api::models::ParticipantDto;

/// Average deaths per game below which a player counts as stable.
pub const STABLE_DEATHS_PER_GAME: f64 = 3.0;

/// Round half away from zero to `decimals` places, so `0.125` shows as `0.13`.
/// `format!("{:.2}")` alone rounds exact ties to even.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// The requesting player's line in one match.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantStat {
    pub champion_name: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl From<&ParticipantDto> for ParticipantStat {
    fn from(p: &ParticipantDto) -> Self {
        ParticipantStat {
            champion_name: p.champion_name.clone(),
            win: p.win,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionCount {
    pub name: String,
    pub games: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kda {
    /// No deaths at all.
    Perfect,
    Ratio(f64),
}

impl fmt::Display for Kda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kda::Perfect => write!(f, "Perfect"),
            Kda::Ratio(r) => write!(f, "{:.2}", round_half_up(*r, 2)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStyle {
    Stable,
    Aggressive,
}

impl PlayStyle {
    pub fn from_avg_deaths(avg_deaths: f64) -> Self {
        if avg_deaths < STABLE_DEATHS_PER_GAME {
            PlayStyle::Stable
        } else {
            PlayStyle::Aggressive
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayStyle::Stable => write!(f, "Stable"),
            PlayStyle::Aggressive => write!(f, "Aggressive"),
        }
    }
}

/// Totals over every match where the player was found. `games` is never zero.
#[derive(Debug, Clone)]
pub struct AggregateStats {
    pub games: usize,
    pub wins: usize,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Play counts in first-encounter order.
    pub champion_frequency: Vec<ChampionCount>,
    pub history: Vec<ParticipantStat>,
}

impl AggregateStats {
    /// Percentage, 0..=100.
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.games as f64 * 100.0
    }

    pub fn kda(&self) -> Kda {
        if self.deaths == 0 {
            Kda::Perfect
        } else {
            Kda::Ratio(f64::from(self.kills + self.assists) / f64::from(self.deaths))
        }
    }

    pub fn avg_deaths_per_game(&self) -> f64 {
        f64::from(self.deaths) / self.games as f64
    }

    pub fn play_style(&self) -> PlayStyle {
        PlayStyle::from_avg_deaths(self.avg_deaths_per_game())
    }

    /// Most played champions; ties keep first-encounter order.
    pub fn top_champions(&self, n: usize) -> Vec<ChampionCount> {
        let mut sorted = self.champion_frequency.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.games.cmp(&a.games));
        sorted.truncate(n);
        sorted
    }
}

#[derive(Debug, Clone)]
pub enum MatchSummary {
    Stats(AggregateStats),
    /// No fetched match contained the player.
    InsufficientData { matches_fetched: usize },
}

#[derive(Default)]
pub struct MatchStatsTracker {
    index: HashMap<String, usize>,
    champions: Vec<ChampionCount>,
    history: Vec<ParticipantStat>,
    wins: usize,
    kills: u32,
    deaths: u32,
    assists: u32,
    matches_seen: usize,
}

impl MatchStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one fetched match. `None` when the player was not in it.
    pub fn add_match(&mut self, participant: Option<ParticipantStat>) {
        self.matches_seen += 1;
        let Some(stat) = participant else {
            return;
        };

        let slot = match self.index.get(&stat.champion_name) {
            Some(&i) => i,
            None => {
                self.champions.push(ChampionCount {
                    name: stat.champion_name.clone(),
                    games: 0,
                });
                self.index
                    .insert(stat.champion_name.clone(), self.champions.len() - 1);
                self.champions.len() - 1
            }
        };
        self.champions[slot].games += 1;

        if stat.win {
            self.wins += 1;
        }
        self.kills += stat.kills;
        self.deaths += stat.deaths;
        self.assists += stat.assists;
        self.history.push(stat);
    }

    pub fn finish(self) -> MatchSummary {
        if self.history.is_empty() {
            return MatchSummary::InsufficientData {
                matches_fetched: self.matches_seen,
            };
        }

        MatchSummary::Stats(AggregateStats {
            games: self.history.len(),
            wins: self.wins,
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
            champion_frequency: self.champions,
            history: self.history,
        })
    }
}
