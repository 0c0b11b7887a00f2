//! Schedule and match detail pages.

use std::fmt::Write as _;

use super::{footer, forward, run_watch, CommandContext};
use crate::{
    backend::tables,
    cli::{
        types::{MatchTab, StatusFilter},
        WatchArgs,
    },
    modals::MatchDetailsModal,
    models::Match,
    realtime::subscribe_to_matches,
    views::{schedule::match_count_label, Schedule},
    MatchId, Result,
};

pub async fn handle_schedule(
    ctx: &CommandContext,
    league: &str,
    status: Option<StatusFilter>,
    watch: WatchArgs,
) -> Result<()> {
    let mut schedule = Schedule::new();
    schedule.set_league(league);
    schedule.set_status(status);
    schedule.load(&ctx.queries).await;
    ctx.emit(&schedule.visible(), || render_schedule(&schedule))?;

    if !watch.watch {
        return Ok(());
    }
    run_watch(
        ctx,
        tables::MATCHES,
        "updated_at",
        watch,
        |hub, tx| subscribe_to_matches(&ctx.queries, hub, forward(tx)),
        |matches| {
            schedule.apply_push(matches);
            ctx.emit(&schedule.visible(), || render_schedule(&schedule))
        },
    )
    .await
}

fn fixture_line(m: &Match) -> String {
    let mut line = format!(
        "  {} {:<22} {:^7} {:<22} {}",
        m.match_date.format("%H:%M"),
        m.home_name(),
        m.scoreline(),
        m.away_name(),
        m.league
    );
    if let Some(round) = m.round.as_deref().filter(|r| !r.is_empty()) {
        let _ = write!(line, " | {}", round);
    }
    if let Some(badge) = m.status.badge() {
        let _ = write!(line, " [{}]", badge);
    }
    line
}

pub fn render_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();
    for (day, matches) in schedule.by_day() {
        let _ = writeln!(
            out,
            "{} ({})",
            day.format("%A, %B %-d, %Y"),
            match_count_label(matches.len())
        );
        for m in matches {
            let _ = writeln!(out, "{}", fixture_line(m));
        }
        out.push('\n');
    }
    out.push_str(&footer(schedule.showing()));
    out
}

pub async fn handle_match(ctx: &CommandContext, id: MatchId, tab: MatchTab) -> Result<()> {
    let mut modal = MatchDetailsModal::new();
    modal.open_by_id(&ctx.queries, id).await;
    if modal.current().is_some() && !modal.select_tab(tab) {
        tracing::warn!(%tab, match_id = %id, "tab has no data for this match, showing overview");
    }
    ctx.emit(&modal.current(), || match modal.current() {
        Some(_) => render_match(&modal),
        None => format!("Match {} not found.\n", id),
    })
}

pub fn render_match(modal: &MatchDetailsModal) -> String {
    let m = match modal.current() {
        Some(m) => m,
        None => return String::new(),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}  {}",
        m.home_name(),
        m.scoreline(),
        m.away_name()
    );
    let _ = writeln!(
        out,
        "{} | {}{}",
        m.match_date.format("%Y-%m-%d %H:%M UTC"),
        m.league,
        m.status.badge().map(|b| format!(" | {}", b)).unwrap_or_default()
    );

    let tabs: Vec<String> = modal
        .available_tabs()
        .iter()
        .map(|t| {
            if *t == modal.tab() {
                format!("[{}]", t)
            } else {
                t.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}\n", tabs.join("  "));

    match modal.tab() {
        MatchTab::Overview => {
            if let Some(round) = m.round.as_deref().filter(|r| !r.is_empty()) {
                let _ = writeln!(out, "Round: {}", round);
            }
            let _ = writeln!(out, "Status: {}", m.status);
            if m.has_set_scores() {
                let _ = writeln!(out, "Sets played: {}", m.set_scores.len());
            }
        }
        MatchTab::Statistics => {
            for bar in modal.stat_bars() {
                let _ = writeln!(
                    out,
                    "{:>4} {:>5.1}%  {:<12}  {:<5.1}% {}",
                    bar.home, bar.home_percent, bar.label, bar.away_percent, bar.away
                );
            }
        }
        MatchTab::Sets => {
            for line in modal.set_lines() {
                let _ = writeln!(out, "{}", line);
            }
        }
    }
    out
}
