//! Unit tests for the SQLite snapshot backend

use super::*;
use crate::backend::{tables, Direction};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../../tests/fixtures/league.sql");

fn seeded() -> SqliteBackend {
    let backend = SqliteBackend::new_in_memory().unwrap();
    backend.import_sql(FIXTURE).unwrap();
    backend
}

fn ids(rows: &[Value]) -> Vec<i64> {
    rows.iter().filter_map(|r| r["id"].as_i64()).collect()
}

#[tokio::test]
async fn test_select_all_rows_with_order() {
    let backend = seeded();
    let rows = backend
        .select(&TableQuery::from(tables::PLAYERS).order("name", Direction::Asc))
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Alex Johnson",
            "Ana Cruz",
            "Kenji Sato",
            "Lena Fischer",
            "Maria Rodriguez",
            "Paolo Rossi"
        ]
    );
}

#[tokio::test]
async fn test_parent_embed_and_null_fk() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYERS)
        .embed(Embed::parent("team", tables::TEAMS, "team_id"))
        .order("id", Direction::Asc);
    let rows = backend.select(&query).await.unwrap();

    assert_eq!(rows[0]["team"]["name"], "Harbour Hawks");
    // Paolo Rossi has no team
    assert_eq!(rows[4]["name"], "Paolo Rossi");
    assert!(rows[4]["team"].is_null());
}

#[tokio::test]
async fn test_children_embed_collects_rows() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYERS)
        .embed(Embed::children("stats", tables::PLAYER_STATS, "player_id"))
        .eq("id", 1);
    let rows = backend.select(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    let stats = rows[0]["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["season"], "2024");
}

#[tokio::test]
async fn test_children_embed_is_empty_array_when_missing() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYERS)
        .embed(Embed::children("stats", tables::PLAYER_STATS, "player_id"))
        .eq("id", 5);
    let rows = backend.select(&query).await.unwrap();
    assert_eq!(rows[0]["stats"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_nested_embeds_resolve_recursively() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYER_RANKINGS)
        .embed(
            Embed::parent("player", tables::PLAYERS, "player_id")
                .with(Embed::parent("team", tables::TEAMS, "team_id")),
        )
        .order("overall_rank", Direction::Asc)
        .limit(1);
    let rows = backend.select(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["player"]["name"], "Lena Fischer");
    assert_eq!(rows[0]["player"]["team"]["city"], "Innsbruck");
}

#[tokio::test]
async fn test_ordered_children_embed() {
    let backend = seeded();
    let query = TableQuery::from(tables::MATCHES)
        .embed(
            Embed::children("set_scores", tables::SET_SCORES, "match_id")
                .ordered("set_number", Direction::Asc),
        )
        .eq("id", 1);
    let rows = backend.select(&query).await.unwrap();

    let sets: Vec<i64> = rows[0]["set_scores"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["set_number"].as_i64())
        .collect();
    assert_eq!(sets, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_neq_and_not_null_filters() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYERS)
        .not_null("category")
        .neq("category", "")
        .order("id", Direction::Asc);
    let rows = backend.select(&query).await.unwrap();
    assert_eq!(ids(&rows), vec![1, 4, 5]);
}

#[tokio::test]
async fn test_ilike_is_case_insensitive_substring() {
    let backend = seeded();
    let rows = backend
        .select(&TableQuery::from(tables::PLAYERS).ilike("name", "RODRI"))
        .await
        .unwrap();
    assert_eq!(ids(&rows), vec![1]);
}

#[tokio::test]
async fn test_ilike_treats_underscore_literally() {
    let backend = seeded();
    let rows = backend
        .select(&TableQuery::from(tables::PLAYERS).ilike("name", "_"))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_ilike_folds_accented_capitals() {
    let backend = seeded();
    backend
        .import_sql(
            "INSERT INTO players (id, name, nationality) VALUES \
             (20, 'Émilie Durand', 'France'), (21, 'ÁLVARO PÉREZ', 'Spain');",
        )
        .unwrap();

    for (text, expected) in [("émilie", 20), ("ÉMILIE", 20), ("álvaro", 21), ("Pérez", 21)] {
        let rows = backend
            .select(&TableQuery::from(tables::PLAYERS).ilike("name", text))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![expected], "search {:?}", text);
    }
}

#[tokio::test]
async fn test_count_ignores_limit_and_tracks_inserts() {
    let backend = seeded();
    assert_eq!(backend.count(tables::PLAYERS).await.unwrap(), 6);
    assert_eq!(backend.count(tables::MATCHES).await.unwrap(), 4);

    backend
        .import_sql("INSERT INTO players (id, name) VALUES (30, 'New Signing');")
        .unwrap();
    assert_eq!(backend.count(tables::PLAYERS).await.unwrap(), 7);
}

#[tokio::test]
async fn test_any_of_matches_either_side() {
    let backend = seeded();
    let query = TableQuery::from(tables::MATCHES)
        .any_of(vec![
            Filter::Eq("home_team_id", FilterValue::Int(4)),
            Filter::Eq("away_team_id", FilterValue::Int(4)),
        ])
        .order("id", Direction::Asc);
    let rows = backend.select(&query).await.unwrap();
    assert_eq!(ids(&rows), vec![2, 4]);
}

#[tokio::test]
async fn test_empty_any_of_matches_nothing() {
    let backend = seeded();
    let rows = backend
        .select(&TableQuery::from(tables::MATCHES).any_of(vec![]))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_limit_and_descending_order() {
    let backend = seeded();
    let query = TableQuery::from(tables::TEAM_PERFORMANCE)
        .eq("team_id", 1)
        .order("match_date", Direction::Desc)
        .limit(5);
    let rows = backend.select(&query).await.unwrap();
    assert_eq!(ids(&rows), vec![6, 5, 4, 3, 2]);
}

#[tokio::test]
async fn test_column_projection_keeps_embeds() {
    let backend = seeded();
    let query = TableQuery::from(tables::PLAYERS)
        .columns(&["id", "name"])
        .embed(Embed::parent("team", tables::TEAMS, "team_id"))
        .eq("id", 2);
    let rows = backend.select(&query).await.unwrap();

    let obj = rows[0].as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "name", "team"]);
    assert_eq!(rows[0]["team"]["name"], "Tokyo Thunder");
}

#[tokio::test]
async fn test_real_and_text_columns_round_into_json() {
    let backend = seeded();
    let rows = backend
        .select(&TableQuery::from(tables::PLAYER_RANKINGS).eq("id", 2))
        .await
        .unwrap();
    assert_eq!(rows[0]["total_score"].as_f64(), Some(91.0));
    // form_trend has no declared type, so numeric codes survive as numbers
    assert_eq!(rows[0]["form_trend"].as_i64(), Some(-1));
}

#[test]
fn test_open_missing_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = SqliteBackend::open(&dir.path().join("missing.db"));
    assert!(matches!(result, Err(LeagueError::Snapshot { .. })));
}

#[tokio::test]
async fn test_create_then_reopen_persists_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("league.db");
    {
        let backend = SqliteBackend::create(&path).unwrap();
        backend.import_sql(FIXTURE).unwrap();
    }

    let reopened = SqliteBackend::open(&path).unwrap();
    assert!(reopened.describe().contains("league.db"));
    let teams = reopened.select(&TableQuery::from(tables::TEAMS)).await.unwrap();
    assert_eq!(teams.len(), 4);
}
