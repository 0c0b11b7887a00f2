//! End-to-end tests over an on-disk snapshot built from the SQL fixture.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use volley_league::{
    backend::{tables, SqliteBackend},
    cli::{types::SortDirection, BackendArgs},
    config::BackendConfig,
    queries::LeagueQueries,
    realtime::{spawn_watermark_poller, subscribe_to_matches, subscribe_to_player_rankings, ChangeHub},
    views::{filter, PlayerRankingsView, PlayersGrid, Schedule, Standings},
    Position,
};

const FIXTURE: &str = include_str!("fixtures/league.sql");

/// Write the fixture to a snapshot file and connect through the config layer.
fn snapshot_queries(dir: &TempDir) -> (LeagueQueries, Arc<SqliteBackend>) {
    let path = dir.path().join("league.db");
    SqliteBackend::create(&path).unwrap().import_sql(FIXTURE).unwrap();

    let args = BackendArgs {
        snapshot: Some(path.clone()),
        ..Default::default()
    };
    let config = BackendConfig::resolve(&args, |_| None).unwrap();
    let queries = LeagueQueries::new(config.connect().unwrap());
    (queries, Arc::new(SqliteBackend::open(&path).unwrap()))
}

#[tokio::test]
async fn test_rankings_filtered_to_setters_keep_rank_order() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);

    let mut view = PlayerRankingsView::new();
    view.load(&queries).await;
    view.set_position(Some(Position::Setter));

    let ranks: Vec<u32> = view.visible().iter().map(|r| r.overall_rank).collect();
    assert_eq!(ranks, vec![1, 3]);
}

#[tokio::test]
async fn test_schedule_groups_partition_the_matches() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);

    let mut schedule = Schedule::new();
    schedule.load(&queries).await;
    let days = schedule.by_day();

    assert_eq!(days.len(), 2);
    let mut grouped: Vec<i64> = days.values().flatten().map(|m| m.id.as_i64()).collect();
    grouped.sort_unstable();
    assert_eq!(grouped, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);

    for text in ["rodri", "RODRI", "  Rodri "] {
        let names: Vec<String> = queries
            .search_players(text)
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Maria Rodriguez"], "search {:?}", text);
    }

    let mut grid = PlayersGrid::new();
    grid.load(&queries).await;
    grid.set_search("RoDrI");
    assert_eq!(grid.visible().len(), 1);
}

#[tokio::test]
async fn test_filters_are_conjunctive_subsets() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);

    let all = queries.player_rankings().await;
    let mut view = PlayerRankingsView::new();
    view.load(&queries).await;
    view.set_league("ASIA Cup");
    view.set_search("o");

    let visible = view.visible();
    assert!(!visible.is_empty());
    for r in &visible {
        assert!(all.contains(r));
        assert_eq!(r.league(), Some("ASIA Cup"));
        assert!(filter::matches_search("o", &[Some(r.player_name()), r.team_name()]));
    }

    view.set_nationality("Atlantis");
    assert!(view.visible().is_empty());
    assert_eq!(view.showing().empty_message(), "No players found matching your filters.");
}

#[tokio::test]
async fn test_descending_sort_reverses_ascending_without_ties() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);
    let teams = queries.teams().await;

    let mut asc: Vec<_> = teams.iter().collect();
    filter::sort_by_number(&mut asc, SortDirection::Asc, |t| t.win_percentage());
    let mut desc = asc.clone();
    filter::sort_by_number(&mut desc, SortDirection::Desc, |t| t.win_percentage());

    desc.reverse();
    assert_eq!(asc, desc);
}

#[tokio::test]
async fn test_standings_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);

    let mut standings = Standings::new();
    standings.load(&queries).await;

    let groups = standings.grouped();
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 4);
    let hawks = groups["EUROPA Cup"][0].row;
    assert_eq!(hawks.team.name, "Harbour Hawks");
    assert_eq!(hawks.recent_form.len(), 5);
    assert_eq!(hawks.points(), 20);
}

#[tokio::test]
async fn test_queries_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let (queries, _) = snapshot_queries(&dir);
    assert_eq!(queries.matches().await, queries.matches().await);
    assert_eq!(queries.player_rankings().await, queries.player_rankings().await);
}

#[tokio::test]
async fn test_polled_change_pushes_fresh_rankings_once() {
    let dir = TempDir::new().unwrap();
    let (queries, backend) = snapshot_queries(&dir);
    let hub = Arc::new(ChangeHub::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let _sub = subscribe_to_player_rankings(&queries, &hub, move |rows| {
        let _ = tx.send(rows);
    });
    let poller = spawn_watermark_poller(
        Arc::clone(queries.backend()),
        Arc::clone(&hub),
        tables::PLAYER_RANKINGS,
        "last_updated",
        Duration::from_millis(10),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;

    // One statement, several rows.
    backend
        .import_sql(
            "UPDATE player_rankings SET overall_rank = 6 - overall_rank, \
             last_updated = '2024-06-09T10:00:00Z';",
        )
        .unwrap();

    let pushed = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    let ranks: Vec<u32> = pushed.iter().map(|r| r.overall_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert_eq!(pushed[0].player_name(), "Ana Cruz");

    let mut view = PlayerRankingsView::new();
    view.apply_push(pushed);
    assert_eq!(view.showing().total, 5);

    assert!(timeout(Duration::from_millis(150), rx.recv()).await.is_err());
    poller.abort();
}

#[tokio::test]
async fn test_match_subscription_sees_new_fixture() {
    let dir = TempDir::new().unwrap();
    let (queries, backend) = snapshot_queries(&dir);
    let hub = Arc::new(ChangeHub::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let sub = subscribe_to_matches(&queries, &hub, move |rows| {
        let _ = tx.send(rows);
    });
    let poller = spawn_watermark_poller(
        backend.clone(),
        Arc::clone(&hub),
        tables::MATCHES,
        "updated_at",
        Duration::from_millis(10),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;

    backend
        .import_sql(
            "INSERT INTO matches (id, home_team_id, away_team_id, match_date, status, league, updated_at) \
             VALUES (5, 1, 3, '2024-06-15T18:00:00Z', 'scheduled', 'Friendly', '2024-06-09T10:00:00Z');",
        )
        .unwrap();

    let pushed = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    let mut schedule = Schedule::new();
    schedule.apply_push(pushed);
    assert_eq!(schedule.by_day().len(), 3);
    assert_eq!(schedule.leagues(), vec!["EUROPA Cup", "ASIA Cup", "Friendly"]);

    sub.unsubscribe();
    poller.abort();
}
