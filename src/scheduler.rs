//! Host-side tick cadence.
//!
//! Pattern programs measure every hold in ticks, so the wall-clock
//! pacing of `tick` is what sets animation speed. The scheduler counts
//! whole periods since its first poll and fires the handler once per
//! period boundary that has passed. Short stalls are replayed, up to a
//! budget, so pattern timelines keep their shape; anything beyond the
//! budget is abandoned, as every replayed tick may put a frame on the
//! bus. A suspended engine ignores the ticks it is handed, so
//! suspension stretches pattern time rather than queuing a burst.

use embassy_time::{Duration, Instant};

use crate::TickHandler;

/// Missed ticks one poll will replay unless configured otherwise.
pub const DEFAULT_REPLAY_BUDGET: u32 = 4;

/// What one poll did and when to come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Ticks fired during this poll.
    pub ran: u32,
    /// Backlog abandoned because it exceeded the replay budget.
    pub dropped: u64,
    /// When the next tick falls due.
    pub next_deadline: Instant,
    /// Time left until `next_deadline`; zero when already overdue.
    pub idle: Duration,
}

/// Fires a [`TickHandler`] once per period of wall-clock time.
///
/// `poll` is safe to call as often as the host likes; ticks fire only
/// for period boundaries that have actually passed since the first
/// poll. The first poll anchors the cadence and fires the first tick.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(driver, Duration::from_millis(10));
///
/// loop {
///     let report = scheduler.poll(Instant::now());
///     // Platform-specific sleep
///     sleep(report.idle);
/// }
/// ```
pub struct TickScheduler<H: TickHandler> {
    handler: H,
    period: Duration,
    replay_budget: u32,
    epoch: Option<Instant>,
    ticks_done: u64,
}

impl<H: TickHandler> TickScheduler<H> {
    /// Pace a handler at the given period, with
    /// [`DEFAULT_REPLAY_BUDGET`] for stalls.
    pub fn new(handler: H, period: Duration) -> Self {
        Self {
            handler,
            period,
            replay_budget: DEFAULT_REPLAY_BUDGET,
            epoch: None,
            ticks_done: 0,
        }
    }

    /// Bound how many missed ticks one poll may replay.
    ///
    /// A budget of zero is raised to one.
    pub fn with_replay_budget(mut self, budget: u32) -> Self {
        self.replay_budget = budget.max(1);
        self
    }

    /// Fire every tick that has fallen due by `now`.
    ///
    /// Overdue ticks beyond the replay budget are dropped: the cadence
    /// jumps to the current period boundary and pattern time slips by
    /// the dropped amount.
    pub fn poll(&mut self, now: Instant) -> TickReport {
        let epoch = *self.epoch.get_or_insert(now);
        let period = self.period.as_ticks().max(1);

        // Boundaries passed by `now`, counting the one at the epoch.
        let due = now.as_ticks().saturating_sub(epoch.as_ticks()) / period + 1;
        let pending = due.saturating_sub(self.ticks_done);
        let dropped = pending.saturating_sub(u64::from(self.replay_budget));
        let ran = pending - dropped;

        for _ in 0..ran {
            self.handler.tick();
        }
        self.ticks_done = due;

        let deadline_ticks = epoch.as_ticks() + due * period;
        TickReport {
            ran: ran as u32,
            dropped,
            next_deadline: Instant::from_ticks(deadline_ticks),
            idle: Duration::from_ticks(deadline_ticks.saturating_sub(now.as_ticks())),
        }
    }

    /// Get a reference to the handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Get a mutable reference to the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}
