//! Periodic auto-refresh.
//!
//! While enabled, [`Scheduler`] runs two independent ticks on the tokio
//! runtime: a refresh tick every `interval` seconds that invokes the callback
//! held in its [`RefreshSlot`], and a one-second countdown tick that drives
//! the "next refresh in" display.

mod countdown;
mod slot;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::format::countdown as format_countdown;

pub use countdown::Countdown;
pub use slot::{RefreshCallback, RefreshSlot};

/// Default refresh period in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Longest refresh period accepted from configuration (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Point-in-time view of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStatus {
    pub enabled: bool,
    pub seconds_until_next_refresh: u64,
    pub interval_seconds: u64,
}

impl RefreshStatus {
    /// Countdown rendered as `m:ss`.
    pub fn next_refresh_in(&self) -> String {
        format_countdown(self.seconds_until_next_refresh)
    }
}

struct Shared {
    generation: u64,
    enabled: bool,
    countdown: Countdown,
    refreshes: u64,
    /// Countdown ticks applied since the last `enable`.
    elapsed: u64,
    /// Tick index at which a refresh that ran ahead of its countdown tick
    /// resets the countdown.
    pending_reset: Option<u64>,
}

impl Shared {
    fn new(countdown: Countdown) -> Self {
        Self {
            generation: 0,
            enabled: false,
            countdown,
            refreshes: 0,
            elapsed: 0,
            pending_reset: None,
        }
    }

    fn restart(&mut self) {
        self.countdown.reset();
        self.elapsed = 0;
        self.pending_reset = None;
    }

    fn countdown_tick(&mut self) -> u64 {
        self.elapsed += 1;
        match self.pending_reset {
            Some(boundary) if self.elapsed >= boundary => {
                self.pending_reset = None;
                self.countdown.reset();
                self.countdown.remaining()
            }
            _ => self.countdown.tick(),
        }
    }

    /// Record the refresh due at countdown tick `boundary`.
    ///
    /// Both ticks land on the same instant at a boundary and may run in
    /// either order; the countdown shows the full interval afterwards either
    /// way.
    fn refreshed(&mut self, boundary: u64) {
        self.refreshes += 1;
        if self.elapsed >= boundary {
            self.countdown.reset();
        } else {
            self.pending_reset = Some(boundary);
        }
    }
}

pub struct Scheduler {
    interval: Duration,
    shared: Arc<Mutex<Shared>>,
    slot: RefreshSlot,
    runtime: Handle,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(interval_secs: u64, runtime: Handle) -> Self {
        let countdown = Countdown::new(interval_secs);
        Self {
            interval: Duration::from_secs(countdown.interval()),
            shared: Arc::new(Mutex::new(Shared::new(countdown))),
            slot: RefreshSlot::new(),
            runtime,
            tasks: Vec::new(),
        }
    }

    /// The slot the refresh tick reads its callback from.
    pub fn slot(&self) -> RefreshSlot {
        self.slot.clone()
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.shared).enabled
    }

    pub fn status(&self) -> RefreshStatus {
        let shared = lock(&self.shared);
        RefreshStatus {
            enabled: shared.enabled,
            seconds_until_next_refresh: shared.countdown.remaining(),
            interval_seconds: shared.countdown.interval(),
        }
    }

    /// Number of refresh ticks fired since creation.
    pub fn refresh_count(&self) -> u64 {
        lock(&self.shared).refreshes
    }

    /// Start both ticks and reset the countdown. No-op when already enabled.
    ///
    /// An interval too long to schedule leaves the scheduler disabled.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        let now = Instant::now();
        let Some(first_refresh) = now.checked_add(self.interval) else {
            warn!(interval = self.interval.as_secs(), "refresh interval out of range");
            return;
        };

        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.enabled = true;
            shared.restart();
            shared.generation
        };

        self.tasks.push(self.runtime.spawn(refresh_loop(
            Arc::clone(&self.shared),
            self.slot.clone(),
            generation,
            first_refresh,
            self.interval,
        )));
        self.tasks.push(self.runtime.spawn(countdown_loop(
            Arc::clone(&self.shared),
            generation,
            now + COUNTDOWN_PERIOD,
        )));
        debug!(interval = self.interval.as_secs(), "auto-refresh enabled");
    }

    /// Stop both ticks. Once this returns no further callback fires.
    pub fn disable(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.enabled = false;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        debug!("auto-refresh disabled");
    }

    /// Flip the enabled state and return it.
    pub fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
        self.is_enabled()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.disable();
    }
}

// The callback runs with the shared state locked. `disable` takes the same
// lock, so once it has bumped the generation no tick can still be firing.
async fn refresh_loop(
    shared: Arc<Mutex<Shared>>,
    slot: RefreshSlot,
    generation: u64,
    start: Instant,
    period: Duration,
) {
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut boundary: u64 = 0;
    loop {
        ticker.tick().await;
        let mut state = lock(&shared);
        if state.generation != generation {
            break;
        }
        fire(&slot);
        boundary = boundary.saturating_add(period.as_secs());
        state.refreshed(boundary);
    }
}

async fn countdown_loop(shared: Arc<Mutex<Shared>>, generation: u64, start: Instant) {
    let mut ticker = time::interval_at(start, COUNTDOWN_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let mut state = lock(&shared);
        if state.generation != generation {
            break;
        }
        let remaining = state.countdown_tick();
        trace!(remaining, "countdown tick");
    }
}

fn fire(slot: &RefreshSlot) {
    let Some(callback) = slot.current() else {
        trace!("refresh tick with no callback installed");
        return;
    };
    match catch_unwind(AssertUnwindSafe(|| callback())) {
        Ok(Ok(())) => trace!("refresh callback fired"),
        Ok(Err(err)) => warn!(error = %err, "refresh callback failed"),
        Err(_) => warn!("refresh callback panicked"),
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests;
