//! Unit tests for the query layer

use super::*;
use crate::{backend::SqliteBackend, models::MatchStatus, LeagueError};
use async_trait::async_trait;
use serde_json::{json, Value};

const FIXTURE: &str = include_str!("../../tests/fixtures/league.sql");

fn seeded() -> LeagueQueries {
    let backend = SqliteBackend::new_in_memory().unwrap();
    backend.import_sql(FIXTURE).unwrap();
    LeagueQueries::new(Arc::new(backend))
}

struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    async fn select(&self, _query: &TableQuery) -> crate::Result<Vec<Value>> {
        Err(LeagueError::Snapshot {
            message: "connection refused".to_string(),
        })
    }

    async fn count(&self, _table: &'static str) -> crate::Result<usize> {
        Err(LeagueError::Snapshot {
            message: "connection refused".to_string(),
        })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

struct CannedBackend(Vec<Value>);

#[async_trait]
impl Backend for CannedBackend {
    async fn select(&self, _query: &TableQuery) -> crate::Result<Vec<Value>> {
        Ok(self.0.clone())
    }

    async fn count(&self, _table: &'static str) -> crate::Result<usize> {
        Ok(self.0.len())
    }

    fn describe(&self) -> String {
        "canned".to_string()
    }
}

#[tokio::test]
async fn test_teams_ordered_by_ranking() {
    let teams = seeded().teams().await;
    let rankings: Vec<u32> = teams.iter().map(|t| t.ranking).collect();
    assert_eq!(rankings, vec![1, 1, 2, 2]);
}

#[tokio::test]
async fn test_team_lookups() {
    let queries = seeded();
    let team = queries.team_by_id(TeamId::new(3)).await.unwrap();
    assert_eq!(team.name, "Tokyo Thunder");

    assert_eq!(queries.team_by_slug("2").await.unwrap().name, "Alpine Eagles");
    assert!(queries.team_by_slug("eagles").await.is_none());
    assert!(queries.team_by_id(TeamId::new(99)).await.is_none());
}

#[tokio::test]
async fn test_team_rankings_embed_statistics() {
    let teams = seeded().team_rankings().await;
    let hawks = teams.iter().find(|t| t.id == TeamId::new(1)).unwrap();
    assert_eq!(hawks.statistics.len(), 1);
    assert_eq!(hawks.statistics[0].win_streak, 3);

    let eagles = teams.iter().find(|t| t.id == TeamId::new(2)).unwrap();
    assert!(eagles.statistics.is_empty());
}

#[tokio::test]
async fn test_team_rankings_by_league() {
    let queries = seeded();
    let asia = queries.team_rankings_by_league("ASIA Cup").await;
    assert_eq!(asia.len(), 2);
    assert!(asia.iter().all(|t| t.league == "ASIA Cup"));

    assert_eq!(queries.team_rankings_by_league("all").await.len(), 4);
    assert_eq!(queries.team_rankings_by_league("").await.len(), 4);
}

#[tokio::test]
async fn test_team_performance_is_last_five_newest_first() {
    let rows = seeded().team_performance(TeamId::new(1)).await;
    assert_eq!(rows.len(), PERFORMANCE_LIMIT);
    assert_eq!(rows[0].match_date, "2024-06-01");
    assert_eq!(rows[4].match_date, "2024-05-08");
}

#[tokio::test]
async fn test_players_by_name_with_relations() {
    let players = seeded().players().await;
    assert_eq!(players.len(), 6);
    assert_eq!(players[0].name, "Alex Johnson");
    assert_eq!(players[0].team.as_ref().unwrap().name, "Tokyo Thunder");

    let paolo = players.iter().find(|p| p.name == "Paolo Rossi").unwrap();
    assert!(paolo.team.is_none());
    assert_eq!(paolo.team_name(), "Free Agent");
}

#[tokio::test]
async fn test_players_by_team_and_position() {
    let queries = seeded();
    let thunder = queries.players_by_team(TeamId::new(3)).await;
    let names: Vec<&str> = thunder.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alex Johnson", "Kenji Sato"]);

    let setters = queries.players_by_position(Position::Setter).await;
    let names: Vec<&str> = setters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alex Johnson", "Lena Fischer"]);
}

#[tokio::test]
async fn test_full_player_data_carries_stats_history() {
    let player = seeded().full_player_data(PlayerId::new(1)).await.unwrap();
    assert_eq!(player.stats.len(), 2);
    assert_eq!(player.current_stats().unwrap().points, 312);
    assert!(seeded().player_by_id(PlayerId::new(404)).await.is_none());
}

#[tokio::test]
async fn test_featured_players_skip_blank_categories() {
    let featured = seeded().featured_players().await;
    let ids: Vec<i64> = featured.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 4, 5]);
}

#[tokio::test]
async fn test_search_players_any_case() {
    let queries = seeded();
    let hits = queries.search_players("rODRi").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Maria Rodriguez");

    assert_eq!(queries.search_players("   ").await.len(), 6);
    assert!(queries.search_players("zzz").await.is_empty());
}

#[tokio::test]
async fn test_search_players_folds_non_ascii_case() {
    let backend = SqliteBackend::new_in_memory().unwrap();
    backend.import_sql(FIXTURE).unwrap();
    backend
        .import_sql(
            "INSERT INTO players (id, name) VALUES (20, 'Émilie Durand'), (21, 'ÁLVARO PÉREZ');",
        )
        .unwrap();
    let queries = LeagueQueries::new(Arc::new(backend));

    let names = |hits: Vec<crate::models::Player>| hits.into_iter().map(|p| p.name).collect::<Vec<_>>();
    assert_eq!(names(queries.search_players("émilie").await), vec!["Émilie Durand"]);
    assert_eq!(names(queries.search_players("álvaro").await), vec!["ÁLVARO PÉREZ"]);
    assert_eq!(names(queries.search_players("PÉREZ").await), vec!["ÁLVARO PÉREZ"]);
}

#[tokio::test]
async fn test_player_rankings_nest_player_team_and_stats() {
    let rankings = seeded().player_rankings().await;
    let ranks: Vec<u32> = rankings.iter().map(|r| r.overall_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

    let top = &rankings[0];
    assert_eq!(top.player_name(), "Lena Fischer");
    assert_eq!(top.team_name(), Some("Alpine Eagles"));
    assert_eq!(top.player.as_ref().unwrap().stats.len(), 1);
}

#[tokio::test]
async fn test_player_rankings_by_position_orders_by_position_rank() {
    let setters = seeded()
        .player_rankings_by_position(Position::Setter)
        .await;
    let ranks: Vec<u32> = setters.iter().map(|r| r.position_rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[tokio::test]
async fn test_matches_in_kickoff_order_with_embeds() {
    let matches = seeded().matches().await;
    let ids: Vec<i64> = matches.iter().map(|m| m.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 4, 3]);

    let opener = &matches[0];
    assert_eq!(opener.home_name(), "Harbour Hawks");
    assert_eq!(opener.away_name(), "Alpine Eagles");
    assert_eq!(opener.status, MatchStatus::Completed);
    assert!(opener.has_statistics());
    let sets: Vec<u32> = opener.set_scores.iter().map(|s| s.set_number).collect();
    assert_eq!(sets, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_match_lookups() {
    let queries = seeded();
    let live = queries.match_by_id(MatchId::new(4)).await.unwrap();
    assert_eq!(live.status, MatchStatus::Live);
    assert!(queries.match_by_id(MatchId::new(40)).await.is_none());

    let manila = queries.matches_by_team(TeamId::new(4)).await;
    let ids: Vec<i64> = manila.iter().map(|m| m.id.as_i64()).collect();
    assert_eq!(ids, vec![2, 4]);
}

#[tokio::test]
async fn test_match_statistics_and_set_scores() {
    let queries = seeded();
    assert_eq!(queries.match_statistics(MatchId::new(1)).await.len(), 2);
    assert_eq!(queries.match_statistics(MatchId::new(3)).await.len(), 0);

    let sets = queries.set_scores(MatchId::new(2)).await;
    let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_failures_collapse_to_empty() {
    let queries = LeagueQueries::new(Arc::new(FailingBackend));
    assert!(queries.teams().await.is_empty());
    assert!(queries.player_rankings().await.is_empty());
    assert!(queries.matches().await.is_empty());
    assert!(queries.team_by_id(TeamId::new(1)).await.is_none());
    assert!(queries.full_player_data(PlayerId::new(1)).await.is_none());
}

#[tokio::test]
async fn test_undecodable_rows_collapse_to_empty() {
    let queries = LeagueQueries::new(Arc::new(CannedBackend(vec![json!({ "name": "no id" })])));
    assert!(queries.teams().await.is_empty());
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let queries = seeded();
    assert_eq!(queries.matches().await, queries.matches().await);
    assert_eq!(queries.player_rankings().await, queries.player_rankings().await);
}
