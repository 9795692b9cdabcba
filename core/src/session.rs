//! Detail session: one open borrower detail view and its status feed.
//!
//! RULES:
//!   - The feed is a recurring task owned by the session.
//!   - The first tick fires one full period after open.
//!   - Every history mutation happens under the session lock and only
//!     while the liveness flag is set. close() clears the flag, then
//!     takes the lock, so once it returns nothing can tick again.
//!   - History dies with the session. A new session starts empty.

use crate::{
    borrower::{BorrowerRecord, BorrowerStatus},
    clock::DeskClock,
    config::DeskConfig,
    error::{DeskError, DeskResult},
    event::SessionEvent,
    simulator::{StatusHistoryEntry, StatusSimulator},
    types::{BorrowerId, SessionId},
};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// What a detail view renders at one moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub session_id:       SessionId,
    pub borrower:         BorrowerRecord,
    pub displayed_status: BorrowerStatus,
    /// Most recent first, capped at the display limit.
    pub recent_history:   Vec<StatusHistoryEntry>,
    pub ticks:            usize,
}

pub struct DetailSession {
    id:            SessionId,
    borrower:      BorrowerRecord,
    display_limit: usize,
    simulator:     Arc<Mutex<StatusSimulator>>,
    alive:         Arc<AtomicBool>,
    events:        broadcast::Sender<SessionEvent>,
    task:          Option<JoinHandle<()>>,
}

impl DetailSession {
    /// Open a view on `borrower` and start its feed.
    /// Must be called from within a tokio runtime.
    pub fn open(borrower: BorrowerRecord, config: &DeskConfig, clock: DeskClock) -> DeskResult<Self> {
        Self::open_with_events(borrower, config, clock).map(|(session, _)| session)
    }

    /// Like `open`, but also hands back a receiver attached before the
    /// `Opened` event was sent, so the caller sees the whole lifecycle.
    pub fn open_with_events(
        borrower: BorrowerRecord,
        config: &DeskConfig,
        clock: DeskClock,
    ) -> DeskResult<(Self, broadcast::Receiver<SessionEvent>)> {
        let period = config.status_tick();
        if period.is_zero() {
            return Err(DeskError::Config { reason: "status_tick_ms must be > 0".into() });
        }

        let id = Uuid::new_v4();
        let simulator = Arc::new(Mutex::new(StatusSimulator::new(borrower.status)));
        let alive = Arc::new(AtomicBool::new(true));
        let (events, receiver) = broadcast::channel(EVENT_CAPACITY);

        let _ = events.send(SessionEvent::Opened {
            session_id:  id,
            borrower_id: borrower.id,
        });

        let feed = StatusFeed {
            session_id:  id,
            borrower_id: borrower.id,
            period,
            clock,
            simulator:   Arc::clone(&simulator),
            alive:       Arc::clone(&alive),
            events:      events.clone(),
        };
        let task = tokio::spawn(feed.run());

        log::info!(
            "session {id}: opened on borrower {} ({}), tick every {}ms",
            borrower.id,
            borrower.loan_id,
            config.status_tick_ms
        );

        let session = Self {
            id,
            borrower,
            display_limit: config.history_display_limit,
            simulator,
            alive,
            events,
            task: Some(task),
        };
        Ok((session, receiver))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn borrower(&self) -> &BorrowerRecord {
        &self.borrower
    }

    pub fn is_open(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Receive events sent from now on. `Opened` has already gone out;
    /// use `open_with_events` to see it.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn displayed_status(&self) -> BorrowerStatus {
        self.simulator.lock().await.displayed_status()
    }

    /// Full log, oldest first.
    pub async fn history(&self) -> Vec<StatusHistoryEntry> {
        self.simulator.lock().await.history().to_vec()
    }

    pub async fn view(&self) -> DetailView {
        let sim = self.simulator.lock().await;
        DetailView {
            session_id:       self.id,
            borrower:         self.borrower.clone(),
            displayed_status: sim.displayed_status(),
            recent_history:   sim.recent(self.display_limit),
            ticks:            sim.ticks(),
        }
    }

    /// Stop the feed and discard the session. Returns the tick count.
    pub async fn close(mut self) -> usize {
        self.alive.store(false, Ordering::Release);
        // Any tick already holding the lock finishes first; every later
        // one sees the cleared flag.
        let ticks = self.simulator.lock().await.ticks();

        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }

        let _ = self.events.send(SessionEvent::Closed {
            session_id: self.id,
            ticks:      ticks as u64,
        });
        log::info!("session {}: closed after {ticks} ticks", self.id);
        ticks
    }
}

impl Drop for DetailSession {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The recurring task behind a session.
struct StatusFeed {
    session_id:  SessionId,
    borrower_id: BorrowerId,
    period:      Duration,
    clock:       DeskClock,
    simulator:   Arc<Mutex<StatusSimulator>>,
    alive:       Arc<AtomicBool>,
    events:      broadcast::Sender<SessionEvent>,
}

impl StatusFeed {
    async fn run(self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let mut sim = self.simulator.lock().await;
            if !self.alive.load(Ordering::Acquire) {
                break;
            }
            let entry = sim.advance(self.clock.now()).clone();
            let tick = sim.ticks() as u64;
            log::debug!(
                "session {}: tick={tick} status={}",
                self.session_id,
                entry.status
            );
            // Sent under the lock so Closed always trails the last tick.
            let _ = self.events.send(SessionEvent::StatusAdvanced {
                session_id:  self.session_id,
                borrower_id: self.borrower_id,
                tick,
                entry,
            });
        }
    }
}
