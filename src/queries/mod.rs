//! Read-only query functions over the league backend.
//!
//! Each operation maps one resource request to a [`TableQuery`], runs it and
//! deserializes the rows. Failures never propagate: they are logged with
//! `tracing::error!` and collapse to an empty `Vec` or `None`, so a view
//! cannot tell a failed call from an empty result.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{
    backend::{tables, Backend, Direction, Embed, Filter, TableQuery},
    models::{Match, MatchStatistics, Player, PlayerRanking, SetScore, Team, TeamPerformance},
    MatchId, PlayerId, Position, Result, TeamId,
};

/// Rows kept for the "last five" form strip.
pub const PERFORMANCE_LIMIT: usize = 5;
/// Upper bound on featured players.
pub const FEATURED_LIMIT: usize = 16;

/// The query layer. Cheap to clone; every clone shares one backend handle.
#[derive(Clone)]
pub struct LeagueQueries {
    backend: Arc<dyn Backend>,
}

impl LeagueQueries {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    // Teams

    /// All teams, best ranking first.
    pub async fn teams(&self) -> Vec<Team> {
        self.fetch("teams", teams_query()).await
    }

    pub async fn team_by_id(&self, id: TeamId) -> Option<Team> {
        self.fetch_one("team_by_id", teams_query().eq("id", id)).await
    }

    /// Team addressed by its page slug, which is the numeric id.
    pub async fn team_by_slug(&self, slug: &str) -> Option<Team> {
        match slug.parse::<TeamId>() {
            Ok(id) => self.fetch_one("team_by_slug", teams_query().eq("id", id)).await,
            Err(e) => {
                tracing::error!(operation = "team_by_slug", slug, error = %e, "invalid team slug");
                None
            }
        }
    }

    /// Teams with their season statistics embedded.
    pub async fn team_rankings(&self) -> Vec<Team> {
        self.fetch("team_rankings", team_rankings_query()).await
    }

    /// As [`team_rankings`](Self::team_rankings), restricted to one league.
    /// `"all"` or a blank league applies no filter.
    pub async fn team_rankings_by_league(&self, league: &str) -> Vec<Team> {
        let league = league.trim();
        let query = if league.is_empty() || league.eq_ignore_ascii_case("all") {
            team_rankings_query()
        } else {
            team_rankings_query().eq("league", league)
        };
        self.fetch("team_rankings_by_league", query).await
    }

    /// The team's most recent results, newest first.
    pub async fn team_performance(&self, team_id: TeamId) -> Vec<TeamPerformance> {
        let query = TableQuery::from(tables::TEAM_PERFORMANCE)
            .eq("team_id", team_id)
            .order("match_date", Direction::Desc)
            .limit(PERFORMANCE_LIMIT);
        self.fetch("team_performance", query).await
    }

    // Players

    /// All players by name.
    pub async fn players(&self) -> Vec<Player> {
        self.fetch("players", players_query().order("name", Direction::Asc))
            .await
    }

    pub async fn players_by_team(&self, team_id: TeamId) -> Vec<Player> {
        let query = players_query()
            .eq("team_id", team_id)
            .order("name", Direction::Asc);
        self.fetch("players_by_team", query).await
    }

    pub async fn players_by_position(&self, position: Position) -> Vec<Player> {
        let query = players_query()
            .eq("position", position.to_string())
            .order("name", Direction::Asc);
        self.fetch("players_by_position", query).await
    }

    pub async fn player_by_id(&self, id: PlayerId) -> Option<Player> {
        self.fetch_one("player_by_id", players_query().eq("id", id))
            .await
    }

    /// Player with team and full stats history, as the profile modal loads it.
    pub async fn full_player_data(&self, id: PlayerId) -> Option<Player> {
        self.fetch_one("full_player_data", players_query().eq("id", id))
            .await
    }

    /// Players carrying a non-empty category tag.
    pub async fn featured_players(&self) -> Vec<Player> {
        let query = players_query()
            .not_null("category")
            .neq("category", "")
            .order("id", Direction::Asc)
            .limit(FEATURED_LIMIT);
        self.fetch("featured_players", query).await
    }

    /// Case-insensitive substring search on player names.
    pub async fn search_players(&self, text: &str) -> Vec<Player> {
        if text.trim().is_empty() {
            return self.players().await;
        }
        let query = players_query()
            .ilike("name", text.trim())
            .order("name", Direction::Asc);
        self.fetch("search_players", query).await
    }

    // Rankings

    pub async fn player_rankings(&self) -> Vec<PlayerRanking> {
        let query = rankings_query().order("overall_rank", Direction::Asc);
        self.fetch("player_rankings", query).await
    }

    pub async fn player_rankings_by_position(&self, position: Position) -> Vec<PlayerRanking> {
        let query = rankings_query()
            .eq("position", position.to_string())
            .order("position_rank", Direction::Asc);
        self.fetch("player_rankings_by_position", query).await
    }

    // Matches

    /// Every fixture in kick-off order.
    pub async fn matches(&self) -> Vec<Match> {
        self.fetch("matches", matches_query()).await
    }

    pub async fn match_by_id(&self, id: MatchId) -> Option<Match> {
        self.fetch_one("match_by_id", matches_query().eq("id", id))
            .await
    }

    /// Fixtures where the team plays home or away.
    pub async fn matches_by_team(&self, team_id: TeamId) -> Vec<Match> {
        let query = matches_query().any_of(vec![
            Filter::Eq("home_team_id", team_id.into()),
            Filter::Eq("away_team_id", team_id.into()),
        ]);
        self.fetch("matches_by_team", query).await
    }

    pub async fn match_statistics(&self, match_id: MatchId) -> Vec<MatchStatistics> {
        let query = TableQuery::from(tables::MATCH_STATISTICS).eq("match_id", match_id);
        self.fetch("match_statistics", query).await
    }

    pub async fn set_scores(&self, match_id: MatchId) -> Vec<SetScore> {
        let query = TableQuery::from(tables::SET_SCORES)
            .eq("match_id", match_id)
            .order("set_number", Direction::Asc);
        self.fetch("set_scores", query).await
    }

    // Plumbing

    async fn fetch<T: DeserializeOwned>(&self, operation: &'static str, query: TableQuery) -> Vec<T> {
        match self.try_fetch(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    operation,
                    table = query.table,
                    backend = %self.backend.describe(),
                    error = %e,
                    "league query failed"
                );
                Vec::new()
            }
        }
    }

    /// Zero rows is an absent result, not a failure.
    async fn fetch_one<T: DeserializeOwned>(&self, operation: &'static str, query: TableQuery) -> Option<T> {
        self.fetch(operation, query.limit(1)).await.into_iter().next()
    }

    async fn try_fetch<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>> {
        let rows = self.backend.select(query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }
}

fn teams_query() -> TableQuery {
    TableQuery::from(tables::TEAMS).order("ranking", Direction::Asc)
}

fn team_rankings_query() -> TableQuery {
    teams_query().embed(Embed::children("statistics", tables::TEAM_STATISTICS, "team_id"))
}

fn team_embed() -> Embed {
    Embed::parent("team", tables::TEAMS, "team_id")
}

fn stats_embed() -> Embed {
    Embed::children("stats", tables::PLAYER_STATS, "player_id")
}

fn players_query() -> TableQuery {
    TableQuery::from(tables::PLAYERS)
        .embed(team_embed())
        .embed(stats_embed())
}

fn rankings_query() -> TableQuery {
    TableQuery::from(tables::PLAYER_RANKINGS).embed(
        Embed::parent("player", tables::PLAYERS, "player_id")
            .with(team_embed())
            .with(stats_embed()),
    )
}

fn matches_query() -> TableQuery {
    TableQuery::from(tables::MATCHES)
        .embed(Embed::parent("home_team", tables::TEAMS, "home_team_id"))
        .embed(Embed::parent("away_team", tables::TEAMS, "away_team_id"))
        .embed(Embed::children("statistics", tables::MATCH_STATISTICS, "match_id"))
        .embed(
            Embed::children("set_scores", tables::SET_SCORES, "match_id")
                .ordered("set_number", Direction::Asc),
        )
        .order("match_date", Direction::Asc)
}

#[cfg(test)]
mod tests;
