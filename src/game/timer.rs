use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one countdown. A tick carrying an old id is a late callback
/// from a countdown that has since been cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub fn next_timer_id() -> TimerId {
    TimerId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

// Whole-second countdown fed by wall-clock deltas.
#[derive(Clone, Debug)]
pub struct Countdown {
    id: TimerId,
    remaining: u32,
    carry: f64, // fraction of a second not yet ticked
}

impl Countdown {
    pub fn start(seconds: u32) -> Self {
        Self {
            id: next_timer_id(),
            remaining: seconds,
            carry: 0.0,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn set_remaining(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    // how many whole seconds went by, keeping the leftover for next time
    pub fn accumulate(&mut self, elapsed_secs: f64) -> u32 {
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return 0;
        }
        self.carry += elapsed_secs;
        let whole = self.carry.floor();
        self.carry -= whole;
        whole.min(u32::MAX as f64) as u32
    }

    // returns true on the tick that hits zero
    pub fn tick_second(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
