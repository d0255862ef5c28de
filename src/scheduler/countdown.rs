/// Seconds remaining until the next refresh.
///
/// The value always stays within `1..=interval` while ticking: a tick that
/// would take it below 1 wraps back to the full interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    interval: u64,
    remaining: u64,
}

impl Countdown {
    pub fn new(interval: u64) -> Self {
        let interval = interval.max(1);
        Self {
            interval,
            remaining: interval,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Advance by one second and return the new value.
    pub fn tick(&mut self) -> u64 {
        self.remaining = if self.remaining <= 1 {
            self.interval
        } else {
            self.remaining - 1
        };
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.interval;
    }
}
