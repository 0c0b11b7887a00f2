//! Teams grid and team roster pages.

use std::fmt::Write as _;

use super::{footer, CommandContext};
use crate::{
    views::{RosterState, TeamRoster, TeamsGrid},
    Result,
};

pub async fn handle_teams(ctx: &CommandContext, league: &str) -> Result<()> {
    let mut grid = TeamsGrid::new();
    grid.set_league(league);
    grid.load(&ctx.queries).await;
    ctx.emit(&grid.visible(), || render_teams(&grid))
}

pub fn render_teams(grid: &TeamsGrid) -> String {
    let mut out = String::new();
    let leagues: Vec<String> = grid
        .leagues()
        .iter()
        .map(|(league, n)| format!("{} ({})", league, n))
        .collect();
    if !leagues.is_empty() {
        let _ = writeln!(out, "Leagues: {}", leagues.join(", "));
    }

    for team in grid.visible() {
        let _ = writeln!(
            out,
            "#{:<3} {:<24} {:<14} {:<12} {:>5}  {} titles",
            team.ranking,
            team.name,
            team.city_or_unknown(),
            team.league,
            team.record(),
            team.championships
        );
    }
    out.push_str(&footer(grid.showing()));
    out
}

pub async fn handle_team(ctx: &CommandContext, slug: &str) -> Result<()> {
    let mut roster = TeamRoster::new(slug);
    roster.load(&ctx.queries).await;
    ctx.emit(&serde_json::json!({ "team": roster.team(), "players": roster.players() }), || {
        render_roster(&roster)
    })
}

pub fn render_roster(roster: &TeamRoster) -> String {
    let team = match (roster.state(), roster.team()) {
        (RosterState::Ready, Some(team)) => team,
        (RosterState::Loading, _) => return "Loading team...\n".to_string(),
        _ => return "Team not found.\n".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", team.name, team.league);
    let _ = writeln!(
        out,
        "{} | Record {} | Rank #{} | {} titles",
        team.city_or_unknown(),
        team.record(),
        team.ranking,
        team.championships
    );
    if let Some(founded) = team.founded {
        let _ = writeln!(out, "Founded {}", founded);
    }

    let groups = roster.by_position();
    if groups.is_empty() {
        out.push_str("\nNo players on this roster.\n");
        return out;
    }
    for (position, players) in groups {
        let _ = writeln!(out, "\n{} ({})", position, players.len());
        for p in players {
            let _ = writeln!(
                out,
                "  {:<24} {:<14} {}",
                p.display_name(),
                p.nationality_or_unknown(),
                p.age.map_or_else(|| "-".to_string(), |a| a.to_string())
            );
        }
    }
    out
}
