//! Live per-duty headcounts.
//!
//! [`LiveCounter`] resolves every employee in the current roster snapshot
//! against "now" and publishes how many people are on each duty. It samples
//! once when attached, then every period (60 s by default), and again
//! whenever the store publishes a new roster.
//!
//! # Lifetime
//!
//! [`LiveCounter::attach`] spawns the sampling task and returns a
//! [`LiveCounterHandle`]. The task lives exactly as long as the handle:
//! dropping the handle cancels it. A view that shows the counts owns the
//! handle, so tearing the view down stops the timer.

use crate::clock::{Clock, weekday_and_time};
use crate::schedule::{DutyKind, EmployeeId, Resolution, Roster, Weekday, resolve_detailed};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default sampling period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Number of employees on each duty at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DutyCount {
    counts: [usize; 4],
}

impl DutyCount {
    /// Headcount for `kind` (zero when nobody is on it).
    pub fn get(&self, kind: DutyKind) -> usize {
        self.counts[kind.index()]
    }

    /// Sum over all duty kinds.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(kind, count)` pairs in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (DutyKind, usize)> + '_ {
        DutyKind::PRECEDENCE
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
    }

    fn increment(&mut self, kind: DutyKind) {
        self.counts[kind.index()] += 1;
    }
}

/// One published sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSnapshot {
    pub counts: DutyCount,
    pub sampled_at: NaiveDateTime,
    pub weekday: Weekday,
    /// Employees in the roster when sampled.
    pub roster_size: usize,
    /// Employees whose schedule has no record for `weekday`.
    pub missing_day: Vec<EmployeeId>,
}

/// Build a fresh count for `roster` at `at`.
pub fn sample(roster: &Roster, at: NaiveDateTime) -> CountSnapshot {
    let (weekday, time) = weekday_and_time(at);
    let mut counts = DutyCount::default();
    let mut missing_day = Vec::new();

    for employee in roster.employees() {
        match resolve_detailed(&employee.schedule, weekday, time) {
            Resolution::Active(kind) => counts.increment(kind),
            Resolution::Idle => {}
            Resolution::MissingDay => {
                warn!(employee = %employee.id, %weekday, "employee has no schedule for today");
                missing_day.push(employee.id.clone());
            }
        }
    }

    CountSnapshot {
        counts,
        sampled_at: at,
        weekday,
        roster_size: roster.len(),
        missing_day,
    }
}

/// Periodic headcount sampler over a roster subscription.
pub struct LiveCounter {
    roster: watch::Receiver<Arc<Roster>>,
    clock: Arc<dyn Clock>,
    period: Duration,
}

impl LiveCounter {
    /// Create a counter reading from `roster` with the default period.
    pub fn new(roster: watch::Receiver<Arc<Roster>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            roster,
            clock,
            period: DEFAULT_PERIOD,
        }
    }

    /// Override the sampling period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    /// Take the first sample and spawn the periodic task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(mut self) -> LiveCounterHandle {
        let roster = self.roster.borrow_and_update().clone();
        let first = sample(&roster, self.clock.now());
        let (tx, rx) = watch::channel(first);
        let cancel = CancellationToken::new();

        info!(period_secs = self.period.as_secs_f64(), "live counter attached");
        let task = tokio::spawn(run(self, tx, cancel.clone()));

        LiveCounterHandle {
            counts: rx,
            cancel,
            task: Some(task),
        }
    }
}

async fn run(mut counter: LiveCounter, tx: watch::Sender<CountSnapshot>, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval_at(Instant::now() + counter.period, counter.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut roster_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("live counter cancelled");
                break;
            }
            _ = ticker.tick() => {}
            changed = counter.roster.changed(), if roster_open => {
                if changed.is_err() {
                    debug!("roster publisher gone, sampling on timer only");
                    roster_open = false;
                    continue;
                }
                ticker.reset();
            }
        }

        if tx.is_closed() {
            debug!("no count subscribers left, stopping live counter");
            break;
        }

        let roster = counter.roster.borrow_and_update().clone();
        let snapshot = sample(&roster, counter.clock.now());
        debug!(
            total = snapshot.counts.total(),
            roster = snapshot.roster_size,
            "headcount sampled"
        );
        tx.send_replace(snapshot);
    }
}

/// Owner of a running [`LiveCounter`] task. Dropping it stops the task.
pub struct LiveCounterHandle {
    counts: watch::Receiver<CountSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LiveCounterHandle {
    /// A receiver that observes each new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CountSnapshot> {
        self.counts.clone()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> CountSnapshot {
        self.counts.borrow().clone()
    }

    /// Token cancelled when this handle stops the task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the task and wait for it to finish.
    pub async fn detach(mut self) {
        self.cancel.cancel();
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(e) = task.await {
            warn!(error = %e, "live counter task ended abnormally");
        }
    }
}

impl Drop for LiveCounterHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
