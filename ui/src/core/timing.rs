//! Timers and debouncing for UI tasks.

use std::cell::Cell;
use std::rc::Rc;

use super::platform;

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        let clamped = ms.min(u32::MAX as u64) as u32;
        gloo_timers::future::TimeoutFuture::new(clamped).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Tracks which scheduled call is the most recent one.
#[derive(Debug, Clone, Default)]
pub struct DebounceGate {
    latest: Rc<Cell<u64>>,
}

impl DebounceGate {
    /// Register a new call; every earlier ticket becomes stale.
    pub fn arm(&self) -> u64 {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

/// Trailing-edge debounce: only the last call inside a `wait_ms` window runs.
#[derive(Debug, Clone)]
pub struct Debouncer {
    gate: DebounceGate,
    wait_ms: u64,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            gate: DebounceGate::default(),
            wait_ms,
        }
    }

    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        let ticket = self.gate.arm();
        let gate = self.gate.clone();
        let wait_ms = self.wait_ms;
        platform::spawn_future(async move {
            sleep_ms(wait_ms).await;
            if gate.is_latest(ticket) {
                action();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_fires() {
        let gate = DebounceGate::default();
        let first = gate.arm();
        let second = gate.arm();
        assert!(!gate.is_latest(first));
        assert!(gate.is_latest(second));
    }

    #[test]
    fn clones_share_the_same_window() {
        let gate = DebounceGate::default();
        let shared = gate.clone();
        let ticket = gate.arm();
        assert!(shared.is_latest(ticket));
        shared.arm();
        assert!(!gate.is_latest(ticket));
    }
}
