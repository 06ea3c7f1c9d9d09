//! The single entry operation: `{ playerTag, requestType }` in, one string out.

use indicatif::ProgressBar;
use serde::Deserialize;
use tracing::{error, info};

use crate::analysis::aggregator::{self, DEFAULT_MATCH_COUNT};
use crate::analysis::champion_stats::MatchSummary;
use crate::analysis::recommender::{MasteryEntry, MasteryRecommender};
use crate::api::client::RiotApiClient;
use crate::display::report;
use crate::error::AppError;
use crate::identity::{self, Identity, PlayerTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    MatchAnalysis,
    ChampionRecommendation,
}

impl RequestType {
    /// Exact-match labels. The Korean ones are what the first clients sent.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "MatchAnalysis" | "전적분석" => Some(RequestType::MatchAnalysis),
            "ChampionRecommendation" | "챔피언추천" => Some(RequestType::ChampionRecommendation),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestType::MatchAnalysis => "MatchAnalysis",
            RequestType::ChampionRecommendation => "ChampionRecommendation",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(alias = "riotId")]
    pub player_tag: String,
    pub request_type: String,
    #[serde(default)]
    pub match_count: Option<usize>,
}

#[derive(Debug)]
pub enum Outcome {
    Analysis {
        identity: Identity,
        summary: MatchSummary,
    },
    Recommendation {
        identity: Identity,
        top: Vec<MasteryEntry>,
    },
    Unsupported,
}

impl Outcome {
    pub fn render(&self) -> String {
        match self {
            Outcome::Analysis { identity, summary } => {
                let name = identity.display_name();
                let level = identity.summoner.summoner_level;
                match summary {
                    MatchSummary::Stats(stats) => report::match_analysis(&name, level, stats),
                    MatchSummary::InsufficientData { matches_fetched } => {
                        report::insufficient_data(&name, level, *matches_fetched)
                    }
                }
            }
            Outcome::Recommendation { identity, top } => {
                report::champion_recommendation(&identity.display_name(), top)
            }
            Outcome::Unsupported => report::UNSUPPORTED_REQUEST.to_string(),
        }
    }
}

pub struct Analyzer {
    client: RiotApiClient,
    progress: ProgressBar,
}

impl Analyzer {
    pub fn new(client: RiotApiClient) -> Self {
        Analyzer {
            client,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Never fails: errors come back as one `❌ Error: ...` string.
    pub fn analyze(&self, request: &AnalysisRequest) -> String {
        match self.run(request) {
            Ok(outcome) => outcome.render(),
            Err(e) => {
                error!(player = %request.player_tag, error = %e, "analysis failed");
                report::error(&e.to_string())
            }
        }
    }

    pub fn run(&self, request: &AnalysisRequest) -> Result<Outcome, AppError> {
        let Some(request_type) = RequestType::from_label(&request.request_type) else {
            info!(request_type = %request.request_type, "unsupported request type");
            return Ok(Outcome::Unsupported);
        };

        let tag: PlayerTag = request.player_tag.parse()?;
        info!(player = %tag, request = request_type.label(), "handling request");

        let identity = identity::resolve(&self.client, &tag)?;
        let puuid = identity.account.puuid.clone();

        match request_type {
            RequestType::MatchAnalysis => {
                let count = request.match_count.unwrap_or(DEFAULT_MATCH_COUNT);
                let summary = aggregator::aggregate(&self.client, &puuid, count, &self.progress)?;
                Ok(Outcome::Analysis { identity, summary })
            }
            RequestType::ChampionRecommendation => {
                let top = MasteryRecommender::recommend(&self.client, &puuid)?;
                Ok(Outcome::Recommendation { identity, top })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{fake_client, FakeTransport, Reply};
    use serde_json::json;

    const ACCOUNT_URL: &str =
        "https://asia.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Faker/KR1";
    const SUMMONER_URL: &str = "https://kr.api.riotgames.com/lol/summoner/v4/summoners/by-puuid/p1";

    fn request(tag: &str, kind: &str) -> AnalysisRequest {
        AnalysisRequest {
            player_tag: tag.to_string(),
            request_type: kind.to_string(),
            match_count: None,
        }
    }

    fn with_identity(transport: &FakeTransport) {
        transport.route(
            ACCOUNT_URL,
            vec![Reply::json(json!({"puuid": "p1", "gameName": "Faker", "tagLine": "KR1"}))],
        );
        transport.route(
            SUMMONER_URL,
            vec![Reply::json(json!({"puuid": "p1", "name": "", "summonerLevel": 700}))],
        );
    }

    #[test]
    fn request_accepts_legacy_field_names() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"riotId": "Faker#KR1", "requestType": "전적분석"}"#).unwrap();

        assert_eq!(req.player_tag, "Faker#KR1");
        assert_eq!(RequestType::from_label(&req.request_type), Some(RequestType::MatchAnalysis));
        assert_eq!(req.match_count, None);
    }

    #[test]
    fn labels_are_exact_match() {
        assert_eq!(
            RequestType::from_label("ChampionRecommendation"),
            Some(RequestType::ChampionRecommendation)
        );
        assert_eq!(RequestType::from_label("matchanalysis"), None);
        assert_eq!(RequestType::from_label(" MatchAnalysis"), None);
    }

    #[test]
    fn unsupported_type_returns_fallback_without_remote_calls() {
        let (client, calls, _) = fake_client(FakeTransport::new());
        let analyzer = Analyzer::new(client);

        let text = analyzer.analyze(&request("Faker#KR1", "foo"));

        assert_eq!(text, report::UNSUPPORTED_REQUEST);
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn malformed_tag_is_an_error_string() {
        let (client, calls, _) = fake_client(FakeTransport::new());
        let analyzer = Analyzer::new(client);

        let text = analyzer.analyze(&request("Faker", "MatchAnalysis"));

        assert!(report::is_error(&text));
        assert!(text.contains("Invalid Riot ID"));
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn account_404_is_an_error_string_with_status() {
        let transport = FakeTransport::new();
        transport.route(ACCOUNT_URL, vec![Reply::status(404, "Data not found")]);
        let (client, _, _) = fake_client(transport);
        let analyzer = Analyzer::new(client);

        let text = analyzer.analyze(&request("Faker#KR1", "MatchAnalysis"));

        assert!(text.starts_with("❌ Error: "));
        assert!(text.contains("404"));
    }

    #[test]
    fn match_analysis_end_to_end() {
        let transport = FakeTransport::new();
        with_identity(&transport);
        transport.route(
            "https://asia.api.riotgames.com/lol/match/v5/matches/by-puuid/p1/ids?start=0&count=2",
            vec![Reply::json(json!(["KR_1", "KR_2"]))],
        );
        for (id, win) in [("KR_1", true), ("KR_2", false)] {
            transport.route(
                &format!("https://asia.api.riotgames.com/lol/match/v5/matches/{}", id),
                vec![Reply::json(json!({"info": {"participants": [
                    {"puuid": "p1", "championName": "Azir", "win": win, "kills": 4, "deaths": 2, "assists": 6}
                ]}}))],
            );
        }
        let (client, _, _) = fake_client(transport);
        let analyzer = Analyzer::new(client);

        let mut req = request("Faker#KR1", "MatchAnalysis");
        req.match_count = Some(2);
        let text = analyzer.analyze(&req);

        assert!(text.starts_with("Summoner Faker#KR1 match analysis:\n"), "{text}");
        assert!(text.contains("- Win rate over the last 2 games: 50.0%"));
        assert!(text.contains("- K/D/A: 8/4/12 (average KDA: 5.00)"));
        assert!(text.contains("- Main champions: Azir(2 games)"));
        assert!(text.contains("- Play style: Stable"));
        assert!(text.ends_with("- Summoner level: 700"));
    }

    #[test]
    fn no_matches_gives_insufficient_data_report() {
        let transport = FakeTransport::new();
        with_identity(&transport);
        transport.route(
            "https://asia.api.riotgames.com/lol/match/v5/matches/by-puuid/p1/ids?start=0&count=10",
            vec![Reply::json(json!([]))],
        );
        let (client, _, _) = fake_client(transport);
        let analyzer = Analyzer::new(client);

        let text = analyzer.analyze(&request("Faker#KR1", "MatchAnalysis"));

        assert!(text.contains("Not enough data"));
        assert!(!report::is_error(&text));
    }

    #[test]
    fn champion_recommendation_end_to_end() {
        let transport = FakeTransport::new();
        with_identity(&transport);
        transport.route(
            "https://kr.api.riotgames.com/lol/champion-mastery/v4/champion-masteries/by-puuid/p1",
            vec![Reply::json(json!([
                {"championId": 1, "championPoints": 10},
                {"championId": 2, "championPoints": 30},
                {"championId": 3, "championPoints": 20},
                {"championId": 4, "championPoints": 5}
            ]))],
        );
        transport.route(
            "https://ddragon.leagueoflegends.com/cdn/14.25.1/data/en_US/champion.json",
            vec![Reply::json(json!({"data": {
                "Annie": {"id": "Annie", "key": "1", "name": "Annie"},
                "Olaf": {"id": "Olaf", "key": "2", "name": "Olaf"},
                "Galio": {"id": "Galio", "key": "3", "name": "Galio"},
                "TwistedFate": {"id": "TwistedFate", "key": "4", "name": "Twisted Fate"}
            }}))],
        );
        let (client, _, _) = fake_client(transport);
        let analyzer = Analyzer::new(client);

        let text = analyzer.analyze(&request("Faker#KR1", "ChampionRecommendation"));

        assert!(text.starts_with(
            "Recommended champions for summoner Faker#KR1:\n- Olaf (mastery 30)\n- Galio (mastery 20)\n- Annie (mastery 10)\n"
        ), "{text}");
        assert!(!text.contains("Twisted Fate"));
        assert!(text.contains("Recommended items:"));
    }
}
