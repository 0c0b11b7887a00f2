//! Change notifications and live re-query subscriptions.
//!
//! A [`ChangeHub`] carries one broadcast channel per table. Events are bare
//! signals: a subscriber reacts to each one by re-running its query and
//! handing the whole refreshed collection to its callback. Rapid events are
//! not coalesced, so N events cost N re-queries.
//!
//! The hub does not care where events come from. The CLI feeds it with
//! [`spawn_watermark_poller`], which watches the newest value of a timestamp
//! column plus the row count of a table through the [`Backend`] interface.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    backend::{tables, Backend, Direction, TableQuery},
    models::{Match, PlayerRanking},
    queries::LeagueQueries,
    Result,
};

const DEFAULT_CAPACITY: usize = 64;

/// What happened to the watched table. Subscribers do not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(table: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            table: table.into(),
            kind,
        }
    }
}

/// Per-table broadcast channels, created on first use.
pub struct ChangeHub {
    channels: Mutex<HashMap<String, broadcast::Sender<ChangeEvent>>>,
    capacity: usize,
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` bounds how far a slow subscriber may fall behind before
    /// it observes a lag.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn sender(&self, table: &str) -> broadcast::Sender<ChangeEvent> {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        channels
            .entry(table.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Deliver an event to every current subscriber of its table.
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        tracing::debug!(table = %event.table, kind = ?event.kind, "change event");
        self.sender(&event.table).send(event).unwrap_or(0)
    }

    pub fn receiver(&self, table: &str) -> broadcast::Receiver<ChangeEvent> {
        self.sender(table).subscribe()
    }

    pub fn subscriber_count(&self, table: &str) -> usize {
        self.sender(table).receiver_count()
    }
}

/// Handle to a live subscription. Dropping it stops delivery.
#[must_use = "dropping a Subscription stops delivery immediately"]
pub struct Subscription {
    table: String,
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop delivery. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Re-run `refetch` on every change to `table` and pass the result to
/// `callback`.
///
/// Events published after this returns are guaranteed to be seen. Must be
/// called from within a Tokio runtime.
pub fn subscribe<T, R, Fut, C>(hub: &ChangeHub, table: &str, refetch: R, mut callback: C) -> Subscription
where
    T: Send + 'static,
    R: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Vec<T>> + Send + 'static,
    C: FnMut(Vec<T>) + Send + 'static,
{
    let mut rx = hub.receiver(table);
    let name = table.to_string();
    let task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    tracing::debug!(table = %event.table, kind = ?event.kind, "refreshing subscription");
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Missed events collapse into one catch-up refresh.
                    tracing::warn!(table = %name, skipped, "change channel lagged");
                }
                Err(RecvError::Closed) => break,
            }
            callback(refetch().await);
        }
    });

    Subscription {
        table: table.to_string(),
        task,
    }
}

/// Live player rankings, re-queried in rank order on every change.
pub fn subscribe_to_player_rankings<C>(queries: &LeagueQueries, hub: &ChangeHub, callback: C) -> Subscription
where
    C: FnMut(Vec<PlayerRanking>) + Send + 'static,
{
    let queries = queries.clone();
    subscribe(
        hub,
        tables::PLAYER_RANKINGS,
        move || {
            let queries = queries.clone();
            async move { queries.player_rankings().await }
        },
        callback,
    )
}

/// Live fixtures, re-queried in kick-off order on every change.
pub fn subscribe_to_matches<C>(queries: &LeagueQueries, hub: &ChangeHub, callback: C) -> Subscription
where
    C: FnMut(Vec<Match>) + Send + 'static,
{
    let queries = queries.clone();
    subscribe(
        hub,
        tables::MATCHES,
        move || {
            let queries = queries.clone();
            async move { queries.matches().await }
        },
        callback,
    )
}

/// Cheap fingerprint of a table: row count plus the greatest value of a
/// change-tracking column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    pub rows: usize,
    pub latest: Option<String>,
}

impl Watermark {
    /// Classify the change from `previous` to `self`, if any.
    pub fn change_since(&self, previous: &Watermark) -> Option<ChangeKind> {
        if self == previous {
            None
        } else if self.rows > previous.rows {
            Some(ChangeKind::Insert)
        } else if self.rows < previous.rows {
            Some(ChangeKind::Delete)
        } else {
            Some(ChangeKind::Update)
        }
    }
}

/// Read the current [`Watermark`] of `table`.
///
/// Only the newest non-null `column` value is fetched, and the row count
/// comes from [`Backend::count`], so the result stays exact when the
/// backend caps response sizes.
pub async fn read_watermark(backend: &dyn Backend, table: &'static str, column: &'static str) -> Result<Watermark> {
    let newest = TableQuery::from(table)
        .columns(&[column])
        .not_null(column)
        .order(column, Direction::Desc)
        .limit(1);
    let latest = backend
        .select(&newest)
        .await?
        .first()
        .and_then(|row| match row.get(column) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        });
    let rows = backend.count(table).await?;
    Ok(Watermark { rows, latest })
}

/// Poll `table` every `every` and publish one event per observed change.
///
/// The first successful read only sets the baseline. Read failures are
/// logged and the previous baseline is kept.
pub fn spawn_watermark_poller(
    backend: Arc<dyn Backend>,
    hub: Arc<ChangeHub>,
    table: &'static str,
    column: &'static str,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut baseline: Option<Watermark> = None;

        loop {
            ticker.tick().await;
            let current = match read_watermark(backend.as_ref(), table, column).await {
                Ok(w) => w,
                Err(e) => {
                    tracing::warn!(table, error = %e, "watermark poll failed");
                    continue;
                }
            };
            if let Some(kind) = baseline.as_ref().and_then(|prev| current.change_since(prev)) {
                hub.publish(ChangeEvent::new(table, kind));
            }
            baseline = Some(current);
        }
    })
}
