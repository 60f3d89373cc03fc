//! Tick scheduling
//!
//! The scheduler holds at most one pending tick. Every arm bumps a generation
//! counter, so a tick that was cancelled but still gets delivered by the host
//! timer is recognized as stale and ignored.

/// Default interactive tick period in milliseconds
pub const DEFAULT_PERIOD_MS: u32 = 1000;

/// Delay from `now_ms` to the next multiple of `period_ms`
///
/// Always in `1..=period_ms`. A zero period is treated as 1 ms.
pub fn next_delay_ms(now_ms: i64, period_ms: u32) -> u32 {
    let period = period_ms.max(1) as i64;
    (period - now_ms.rem_euclid(period)) as u32
}

/// A pending tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduledTick {
    /// Wall-clock deadline in Unix milliseconds
    pub due_at_ms: i64,
    /// Arm generation
    pub generation: u32,
}

impl ScheduledTick {
    /// Milliseconds from `now_ms` until the deadline (0 if already due)
    pub fn delay_from(&self, now_ms: i64) -> u64 {
        (self.due_at_ms - now_ms).max(0) as u64
    }
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Tick was cancelled or superseded; nothing to do
    Stale,
    /// Tick fired; a redraw is due. Carries the next tick if re-armed.
    Fired { rearmed: Option<ScheduledTick> },
}

/// Drift-free single-shot tick scheduler
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickScheduler {
    period_ms: u32,
    pending: Option<ScheduledTick>,
    generation: u32,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_MS)
    }
}

impl TickScheduler {
    /// Create an idle scheduler
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            pending: None,
            generation: 0,
        }
    }

    /// Tick period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Cancel any pending tick and arm one at the next period boundary
    pub fn start(&mut self, now_ms: i64) -> ScheduledTick {
        self.generation = self.generation.wrapping_add(1);
        let tick = ScheduledTick {
            due_at_ms: now_ms + next_delay_ms(now_ms, self.period_ms) as i64,
            generation: self.generation,
        };
        self.pending = Some(tick);
        tick
    }

    /// Cancel the pending tick
    ///
    /// Returns true if a tick was pending. Safe to call when idle.
    pub fn stop(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Start or stop according to the run policy
    ///
    /// Returns the armed tick when started.
    pub fn update(&mut self, should_run: bool, now_ms: i64) -> Option<ScheduledTick> {
        if should_run {
            Some(self.start(now_ms))
        } else {
            self.stop();
            None
        }
    }

    /// Currently pending tick
    pub fn pending(&self) -> Option<ScheduledTick> {
        self.pending
    }

    /// Check if a tick is pending
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver a tick from the host timer
    pub fn on_tick(&mut self, tick: ScheduledTick, now_ms: i64, should_run: bool) -> TickOutcome {
        if self.pending != Some(tick) {
            return TickOutcome::Stale;
        }

        self.pending = None;
        let rearmed = if should_run {
            Some(self.start(now_ms))
        } else {
            None
        };
        TickOutcome::Fired { rearmed }
    }
}
