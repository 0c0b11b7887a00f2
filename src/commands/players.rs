//! Players grid, player profile, featured carousel and name search.

use std::fmt::Write as _;

use super::{footer, CommandContext};
use crate::{
    modals::{PlayerProfileModal, Profile},
    models::Player,
    views::{FeaturedCarousel, PlayerSearch, PlayersGrid},
    PlayerId, Position, Result,
};

fn player_line(p: &Player) -> String {
    let stats = p.current_stats();
    format!(
        "{:<4} {:<24} {:<16} {:<18} {:<12} {:>4} pts",
        p.initials(),
        p.display_name(),
        p.position.to_string(),
        p.team_name(),
        p.nationality_or_unknown(),
        stats.map_or(0, |s| s.points)
    )
}

pub async fn handle_players(
    ctx: &CommandContext,
    search: &str,
    position: Option<Position>,
    team: &str,
) -> Result<()> {
    let mut grid = PlayersGrid::new();
    grid.set_search(search);
    grid.set_position(position);
    grid.set_team(team);
    grid.load(&ctx.queries).await;
    ctx.emit(&grid.visible(), || render_players(&grid))
}

pub fn render_players(grid: &PlayersGrid) -> String {
    let mut out = String::new();
    let positions: Vec<String> = grid.positions().iter().map(Position::to_string).collect();
    if !positions.is_empty() {
        let _ = writeln!(out, "Positions: {}", positions.join(", "));
    }
    for p in grid.visible() {
        let _ = writeln!(out, "{}", player_line(p));
    }
    out.push_str(&footer(grid.showing()));
    out
}

pub async fn handle_player(ctx: &CommandContext, id: PlayerId) -> Result<()> {
    let mut modal = PlayerProfileModal::new();
    modal.open_by_id(&ctx.queries, id, None).await;
    let profile = modal.profile();
    ctx.emit(&profile, || match &profile {
        Some(profile) => render_profile(profile),
        None => format!("Player {} not found.\n", id),
    })
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", profile.initials, profile.name);
    let _ = writeln!(
        out,
        "{} | {} | {}",
        profile.position, profile.team, profile.nationality
    );
    let _ = writeln!(
        out,
        "Age {} | Height {} | Category {} | League {}",
        profile.age, profile.height, profile.category, profile.league
    );
    let _ = writeln!(out, "\n{}\n", profile.bio);

    let s = &profile.stats;
    let _ = writeln!(
        out,
        "Points {} | Blocks {} | Aces {} | Digs {} | Matches {}",
        s.points, s.blocks, s.aces, s.digs, s.matches_played
    );
    for bar in &profile.bars {
        let filled = (bar.width / 5.0).round() as usize;
        let _ = writeln!(
            out,
            "{:<20} {:<20} {}%",
            bar.label,
            "#".repeat(filled),
            bar.value
        );
    }
    let _ = write!(out, "Form {}", profile.form);
    if let Some(record) = &profile.team_record {
        let _ = write!(out, " | Team Record {}", record);
    }
    out.push('\n');
    out
}

pub async fn handle_featured(ctx: &CommandContext, start: usize) -> Result<()> {
    let mut carousel = FeaturedCarousel::new();
    carousel.load(&ctx.queries).await;
    carousel.seek(start);
    ctx.emit(carousel.window(), || render_featured(&carousel))
}

pub fn render_featured(carousel: &FeaturedCarousel) -> String {
    if carousel.is_empty() {
        return "No featured players.\n".to_string();
    }
    let mut out = String::new();
    for p in carousel.window() {
        let _ = writeln!(
            out,
            "{:<24} {:<14} {}",
            p.display_name(),
            p.category.as_deref().unwrap_or(""),
            p.team_name()
        );
    }
    let _ = writeln!(
        out,
        "{} {} of {} {}",
        if carousel.can_go_previous() { "<" } else { " " },
        carousel.index() + 1,
        carousel.max_index() + 1,
        if carousel.can_go_next() { ">" } else { " " }
    );
    out
}

pub async fn handle_search(ctx: &CommandContext, text: &str) -> Result<()> {
    let mut search = PlayerSearch::new();
    search.search(&ctx.queries, text).await;
    ctx.emit(search.results(), || render_search(&search))
}

pub fn render_search(search: &PlayerSearch) -> String {
    let mut out = String::new();
    for p in search.results() {
        let _ = writeln!(out, "{}", player_line(p));
    }
    if search.results().is_empty() {
        let _ = writeln!(out, "No players matching \"{}\".", search.text().trim());
    } else {
        out.push_str(&footer(search.showing()));
    }
    out
}
