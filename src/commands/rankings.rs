//! Player rankings and team standings pages.

use std::fmt::Write as _;

use super::{footer, forward, run_watch, CommandContext};
use crate::{
    backend::tables,
    cli::{
        types::{AgeBucket, SortField},
        WatchArgs,
    },
    realtime::subscribe_to_player_rankings,
    views::{PlayerRankingsView, Standings},
    Position, Result,
};

/// Filter selections for the rankings page.
#[derive(Debug, Clone, Default)]
pub struct RankingFilters {
    pub position: Option<Position>,
    pub league: String,
    pub nationality: String,
    pub age: Option<AgeBucket>,
    pub search: String,
}

impl RankingFilters {
    pub fn apply(&self, view: &mut PlayerRankingsView) {
        view.set_position(self.position);
        view.set_league(&self.league);
        view.set_nationality(&self.nationality);
        view.set_age(self.age);
        view.set_search(&self.search);
    }
}

pub async fn handle_player_rankings(
    ctx: &CommandContext,
    filters: &RankingFilters,
    watch: WatchArgs,
) -> Result<()> {
    let mut view = PlayerRankingsView::new();
    filters.apply(&mut view);
    view.load(&ctx.queries).await;
    ctx.emit(&view.visible(), || render_player_rankings(&view))?;

    if !watch.watch {
        return Ok(());
    }
    run_watch(
        ctx,
        tables::PLAYER_RANKINGS,
        "last_updated",
        watch,
        |hub, tx| subscribe_to_player_rankings(&ctx.queries, hub, forward(tx)),
        |rankings| {
            view.apply_push(rankings);
            ctx.emit(&view.visible(), || render_player_rankings(&view))
        },
    )
    .await
}

pub fn render_player_rankings(view: &PlayerRankingsView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<24} {:<4} {:<18} {:>7} {:>6} {:>5}",
        "Rank", "Player", "Pos", "Team", "Score", "Eff", "Form"
    );
    for r in view.visible() {
        let rank = match r.medal() {
            Some(medal) => format!("{} {}", medal, r.overall_rank),
            None => format!("#{}", r.overall_rank),
        };
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<4} {:<18} {:>7.1} {:>6.1} {:>5} {}",
            rank,
            r.player_name(),
            r.position.short_code(),
            r.team_name().unwrap_or("Free Agent"),
            r.total_score,
            r.efficiency,
            r.form_rating,
            r.form_trend.arrow()
        );
    }
    out.push_str(&footer(view.showing()));
    out
}

pub async fn handle_standings(ctx: &CommandContext, league: &str, sort: &[SortField]) -> Result<()> {
    let mut standings = Standings::new();
    standings.set_league(league);
    for field in sort {
        standings.select_sort(*field);
    }
    standings.load(&ctx.queries).await;
    ctx.emit(&standings.visible(), || render_standings(&standings))
}

pub fn render_standings(standings: &Standings) -> String {
    let mut out = String::new();
    let (field, direction) = standings.sort();
    let _ = writeln!(out, "Sorted by {} ({})", field, direction);

    for (league, rows) in standings.grouped() {
        let _ = writeln!(out, "\n{}", league);
        let _ = writeln!(
            out,
            "  {:<5} {:<24} {:>3} {:>3} {:>4} {:>6}  {:<9}  {}",
            "Pos", "Team", "W", "L", "Pts", "Win%", "Form", "Trend"
        );
        for placed in rows {
            let row = placed.row;
            let place = match placed.medal() {
                Some(medal) => format!("{} {}", medal, placed.place),
                None => placed.place.to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<5} {:<24} {:>3} {:>3} {:>4} {:>6.1}  {:<9}  {}",
                place,
                row.team.name,
                row.team.wins,
                row.team.losses,
                row.points(),
                row.win_percentage(),
                row.form(),
                row.trend().arrow()
            );
        }
    }
    out.push('\n');
    out.push_str(&footer(standings.showing()));
    out
}
