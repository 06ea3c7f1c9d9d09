//! Fixed-shape text reports. Pure formatting, no I/O.

use crate::analysis::champion_stats::{round_half_up, AggregateStats, ChampionCount};
use crate::analysis::recommender::MasteryEntry;

pub const ERROR_PREFIX: &str = "❌ Error: ";

pub const UNSUPPORTED_REQUEST: &str =
    "Unsupported request type. Only MatchAnalysis or ChampionRecommendation are supported.";

const ITEM_GUIDANCE: &str = "\nRecommended items:\n\
- Core: prioritize mythic items\n\
- Vision: use control wards\n\
- Pick defensive or offensive items to fit the game";

pub fn match_analysis(summoner: &str, level: i64, stats: &AggregateStats) -> String {
    format!(
        "Summoner {} match analysis:\n\
         - Win rate over the last {} games: {:.1}%\n\
         - K/D/A: {}/{}/{} (average KDA: {})\n\
         - Main champions: {}\n\
         - Play style: {}\n\
         - Summoner level: {}",
        summoner,
        stats.games,
        round_half_up(stats.win_rate(), 1),
        stats.kills,
        stats.deaths,
        stats.assists,
        stats.kda(),
        champion_list(&stats.top_champions(3)),
        stats.play_style(),
        level
    )
}

pub fn insufficient_data(summoner: &str, level: i64, matches_fetched: usize) -> String {
    format!(
        "Summoner {} match analysis:\n\
         - Not enough data: none of the {} recent matches found contain this player\n\
         - Summoner level: {}",
        summoner, matches_fetched, level
    )
}

pub fn champion_recommendation(summoner: &str, top: &[MasteryEntry]) -> String {
    let mut report = format!("Recommended champions for summoner {}:\n", summoner);
    if top.is_empty() {
        report.push_str("- No champion mastery data available\n");
    }
    for entry in top {
        report.push_str(&format!(
            "- {} (mastery {})\n",
            entry.champion_name, entry.champion_points
        ));
    }
    report.push_str(ITEM_GUIDANCE);
    report
}

pub fn error(message: &str) -> String {
    format!("{}{}", ERROR_PREFIX, message)
}

pub fn is_error(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}

fn champion_list(champions: &[ChampionCount]) -> String {
    champions
        .iter()
        .map(|c| {
            let unit = if c.games == 1 { "game" } else { "games" };
            format!("{}({} {})", c.name, c.games, unit)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
