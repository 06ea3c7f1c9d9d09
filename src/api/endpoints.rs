// URL builders for the Riot endpoints the client consumes.
use crate::config::Config;
use urlencoding::encode;

/// Hard ceiling and floor of the match-v5 `count` parameter.
pub const MAX_MATCH_COUNT: usize = 100;
pub const MIN_MATCH_COUNT: usize = 1;

pub fn clamp_match_count(count: usize) -> usize {
    count.clamp(MIN_MATCH_COUNT, MAX_MATCH_COUNT)
}

pub fn account_by_riot_id(config: &Config, game_name: &str, tag_line: &str) -> String {
    format!(
        "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        config.regional_base,
        encode(game_name),
        encode(tag_line)
    )
}

pub fn summoner_by_puuid(config: &Config, puuid: &str) -> String {
    format!(
        "{}/lol/summoner/v4/summoners/by-puuid/{}",
        config.platform_base, puuid
    )
}

pub fn match_ids_by_puuid(config: &Config, puuid: &str, count: usize) -> String {
    format!(
        "{}/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
        config.regional_base,
        puuid,
        clamp_match_count(count)
    )
}

pub fn match_by_id(config: &Config, match_id: &str) -> String {
    format!("{}/lol/match/v5/matches/{}", config.regional_base, match_id)
}

pub fn masteries_by_puuid(config: &Config, puuid: &str) -> String {
    format!(
        "{}/lol/champion-mastery/v4/champion-masteries/by-puuid/{}",
        config.platform_base, puuid
    )
}

pub fn ddragon_champions(config: &Config) -> String {
    format!(
        "{}/cdn/{}/data/en_US/champion.json",
        config.ddragon_base, config.ddragon_version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped() {
        assert_eq!(clamp_match_count(500), 100);
        assert_eq!(clamp_match_count(0), 1);
        assert_eq!(clamp_match_count(10), 10);
    }

    #[test]
    fn match_ids_url_carries_clamped_count() {
        let config = Config::new("RGAPI-test", "kr");

        assert_eq!(
            match_ids_by_puuid(&config, "abc", 500),
            "https://asia.api.riotgames.com/lol/match/v5/matches/by-puuid/abc/ids?start=0&count=100"
        );
        assert!(match_ids_by_puuid(&config, "abc", 0).ends_with("count=1"));
    }

    #[test]
    fn riot_id_segments_are_encoded() {
        let config = Config::new("RGAPI-test", "kr");

        assert_eq!(
            account_by_riot_id(&config, "Hide on bush", "KR1"),
            "https://asia.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
    }

    #[test]
    fn platform_endpoints_use_region_host() {
        let config = Config::new("RGAPI-test", "euw1");

        assert!(summoner_by_puuid(&config, "p").starts_with("https://euw1.api.riotgames.com/"));
        assert!(masteries_by_puuid(&config, "p").starts_with("https://euw1.api.riotgames.com/"));
        assert!(match_by_id(&config, "EUW1_1").starts_with("https://europe.api.riotgames.com/"));
    }
}
