//! Shared fixtures for integration tests.

#![allow(dead_code)]

use u_league::config::LeagueConfig;
use u_league::models::Matchup;

/// A 37-day spring season: two divisions of five, three venues and the
/// Mother's Day and Memorial Day weekend blackouts.
pub const SPRING_SEASON: &str = r#"
    [season]
    start_date = "2026-04-25"
    end_date = "2026-05-31"
    blackout_dates = [
        { date = "2026-05-10", reason = "Mother's Day" },
        { date = "2026-05-23", reason = "Memorial Day Weekend" },
        { date = "2026-05-24", reason = "Memorial Day Weekend" },
        { date = "2026-05-25", reason = "Memorial Day" },
    ]

    [[divisions]]
    name = "American"
    teams = ["Angels", "Astros", "Orioles", "Mariners", "Royals"]

    [[divisions]]
    name = "National"
    teams = ["Cubs", "Padres", "Phillies", "Pirates", "Rockies"]

    [[venues]]
    name = "Moscariello Ballpark"

    [[venues]]
    name = "Symonds Field"

    [[venues]]
    name = "Washington Park"

    [time_slots]
    weekday = ["17:45"]
    saturday = ["12:30", "14:45", "17:00"]
    sunday = ["17:00"]
    holiday_dates = ["2026-05-25"]

    [rules]
    max_games_per_day_per_team = 1
    max_consecutive_days = 2
    max_games_per_week = 3
    max_games_per_timeslot = 2

    [guidelines]
    min_days_between_same_matchup = 14
    balance_sunday_games = true
    balance_pace = true
"#;

pub fn spring_config() -> LeagueConfig {
    LeagueConfig::from_toml_str(SPRING_SEASON).unwrap()
}

/// Division opponents meet twice (home and away), cross-division
/// opponents once with alternating home sides.
pub fn division_weighted(config: &LeagueConfig) -> Vec<Matchup> {
    fn push(matchups: &mut Vec<Matchup>, home: &str, away: &str) {
        let label = format!("Game {}", matchups.len() + 1);
        matchups.push(Matchup::new(home, away, label));
    }

    let mut matchups = Vec::new();

    for div in &config.divisions {
        for i in 0..div.teams.len() {
            for j in (i + 1)..div.teams.len() {
                push(&mut matchups, &div.teams[i], &div.teams[j]);
                push(&mut matchups, &div.teams[j], &div.teams[i]);
            }
        }
    }

    if let [first, second] = config.divisions.as_slice() {
        for (i, a) in first.teams.iter().enumerate() {
            for (j, b) in second.teams.iter().enumerate() {
                if (i + j) % 2 == 1 {
                    push(&mut matchups, b, a);
                } else {
                    push(&mut matchups, a, b);
                }
            }
        }
    }
    matchups
}
