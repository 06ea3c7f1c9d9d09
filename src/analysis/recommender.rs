use std::collections::HashMap;
use tracing::{info, warn};

use crate::api::client::RiotApiClient;
use crate::api::models::ChampionMasteryDto;
use crate::error::AppError;

pub const RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MasteryEntry {
    pub champion_name: String,
    pub champion_points: i64,
}

pub struct MasteryRecommender;

impl MasteryRecommender {
    /// Highest-mastery champions, best first. Sorted locally; the API order is not trusted.
    pub fn rank(
        mut masteries: Vec<ChampionMasteryDto>,
        names: &HashMap<i64, String>,
    ) -> Vec<MasteryEntry> {
        masteries.sort_by(|a, b| b.champion_points.cmp(&a.champion_points));
        masteries.truncate(RECOMMENDATION_COUNT);

        masteries
            .into_iter()
            .map(|m| MasteryEntry {
                champion_name: m
                    .champion_name
                    .or_else(|| names.get(&m.champion_id).cloned())
                    .unwrap_or_else(|| format!("Champion {}", m.champion_id)),
                champion_points: m.champion_points,
            })
            .collect()
    }

    pub fn recommend(client: &RiotApiClient, puuid: &str) -> Result<Vec<MasteryEntry>, AppError> {
        let masteries = client.get_champion_masteries(puuid)?;
        info!(entries = masteries.len(), "fetched champion masteries");

        if masteries.is_empty() {
            return Ok(Vec::new());
        }

        let names = match client.get_champion_data() {
            Ok(catalogue) => catalogue.names_by_id(),
            Err(e) => {
                warn!(error = %e, "champion catalogue unavailable, falling back to ids");
                HashMap::new()
            }
        };

        Ok(Self::rank(masteries, &names))
    }
}
