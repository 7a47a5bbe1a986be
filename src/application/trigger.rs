//! Sentinel trigger.
//!
//! Converts raw visibility reports about the list's sentinel element into
//! at most one "reach end" signal per becoming-visible transition. A short
//! cool-down window after each firing tolerates the latency between the
//! sentinel turning visible and the controller's in-flight flag flipping,
//! so a single scroll gesture cannot cause a duplicate fetch storm.
//!
//! The trigger is a pure signal: it carries no failure semantics and never
//! touches the store. Time is injectable through `observe_at` so the
//! cool-down is testable without sleeping.

use std::time::{Duration, Instant};

/// Edge-triggered reach-end signal with a cool-down window.
#[derive(Debug, Clone)]
pub struct SentinelTrigger {
    cooldown: Duration,
    was_intersecting: bool,
    last_fired: Option<Instant>,
}

impl Default for SentinelTrigger {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl SentinelTrigger {
    /// Creates a trigger with the given cool-down window.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            was_intersecting: false,
            last_fired: None,
        }
    }

    /// Reports the sentinel's current visibility.
    ///
    /// Returns `true` exactly when the caller should issue a load: the
    /// sentinel just became intersecting, more pages remain, no request
    /// is in flight, and the cool-down since the last firing has elapsed.
    pub fn observe(&mut self, intersecting: bool, has_more: bool, is_fetching: bool) -> bool {
        self.observe_at(Instant::now(), intersecting, has_more, is_fetching)
    }

    /// `observe` with an explicit clock reading.
    pub fn observe_at(
        &mut self,
        now: Instant,
        intersecting: bool,
        has_more: bool,
        is_fetching: bool,
    ) -> bool {
        let became_visible = intersecting && !self.was_intersecting;
        self.was_intersecting = intersecting;

        if !became_visible || !has_more || is_fetching {
            return false;
        }
        if let Some(fired) = self.last_fired {
            if now.duration_since(fired) < self.cooldown {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }
}
