//! Mode button debouncing.

/// Minimum time between accepted toggles
pub const DEBOUNCE_MS: u64 = 200;

/// Edge detector for a mechanical button with a minimum dwell between
/// accepted presses.
///
/// Every raw level change is timestamped; only a transition to the pressed
/// level is a toggle candidate, and it is accepted only when the debounce
/// interval has passed since the previous accepted toggle. Holding the
/// button produces at most one toggle because the level must change to
/// become a candidate again.
#[derive(Debug, Clone)]
pub struct Debouncer {
    last_level: bool,
    last_change_ms: u64,
    last_toggle_ms: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// Create a debouncer assuming the button starts released
    pub const fn new() -> Self {
        Self {
            last_level: false,
            last_change_ms: 0,
            last_toggle_ms: 0,
        }
    }

    /// Poll the raw input level; returns true when a press is accepted
    pub fn poll(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed == self.last_level {
            return false;
        }

        self.last_change_ms = now_ms;
        self.last_level = pressed;

        if pressed && now_ms.wrapping_sub(self.last_toggle_ms) >= DEBOUNCE_MS {
            self.last_toggle_ms = now_ms;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// No input sequence can produce two toggles closer together than
        /// the debounce interval.
        #[test]
        fn prop_toggle_spacing(events in proptest::collection::vec((any::<bool>(), 0u64..50), 1..200)) {
            let mut btn = Debouncer::new();
            let mut now = 0u64;
            let mut last_toggle: Option<u64> = None;

            for (level, dt) in events {
                now += dt;
                if btn.poll(level, now) {
                    if let Some(prev) = last_toggle {
                        prop_assert!(now - prev >= DEBOUNCE_MS);
                    }
                    last_toggle = Some(now);
                }
            }
        }
    }

    #[test]
    fn test_clean_press_toggles_once() {
        let mut btn = Debouncer::new();
        assert!(btn.poll(true, 1000));
        // Holding produces no further toggles
        assert!(!btn.poll(true, 1050));
        assert!(!btn.poll(true, 2000));
        assert!(!btn.poll(false, 2100));
    }

    #[test]
    fn test_bounce_within_interval_is_suppressed() {
        let mut btn = Debouncer::new();
        assert!(btn.poll(true, 1000));
        // Contact bounce: rapid release/press pairs inside 200 ms
        assert!(!btn.poll(false, 1005));
        assert!(!btn.poll(true, 1010));
        assert!(!btn.poll(false, 1015));
        assert!(!btn.poll(true, 1020));
    }

    #[test]
    fn test_presses_separated_by_interval_both_toggle() {
        let mut btn = Debouncer::new();
        assert!(btn.poll(true, 1000));
        assert!(!btn.poll(false, 1100));
        assert!(btn.poll(true, 1300));
    }

    #[test]
    fn test_press_exactly_at_interval_is_accepted() {
        let mut btn = Debouncer::new();
        assert!(btn.poll(true, 1000));
        assert!(!btn.poll(false, 1100));
        assert!(btn.poll(true, 1000 + DEBOUNCE_MS));
    }

    #[test]
    fn test_release_is_never_a_toggle() {
        let mut btn = Debouncer::new();
        assert!(btn.poll(true, 1000));
        assert!(!btn.poll(false, 2000));
        assert!(!btn.poll(false, 3000));
    }
}
