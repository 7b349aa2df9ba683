//! Pot moving average and periodic host reporting.

/// Samples in the moving-average window
pub const POT_WINDOW: usize = 20;

/// Wall-clock interval between outbound pot reports
pub const REPORT_INTERVAL_MS: u64 = 80;

/// Circular moving average over the last [`POT_WINDOW`] pot readings.
///
/// Invariant: `sum` always equals the sum of the window contents. The
/// averaging step runs on every call; the report interval is checked
/// independently so the two cadences stay decoupled.
#[derive(Debug, Clone)]
pub struct PotSampler {
    window: [u8; POT_WINDOW],
    sum: u16,
    index: usize,
    last_report_ms: u64,
}

impl Default for PotSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PotSampler {
    /// Create a sampler with an all-zero window
    pub const fn new() -> Self {
        Self {
            window: [0; POT_WINDOW],
            sum: 0,
            index: 0,
            last_report_ms: 0,
        }
    }

    /// Fold one 0-255 sample into the window and return the new average.
    ///
    /// The slot about to be overwritten is subtracted from the running sum
    /// before the new sample replaces it, keeping the invariant cheap.
    pub fn update(&mut self, sample: u8) -> u8 {
        self.sum -= self.window[self.index] as u16;
        self.window[self.index] = sample;
        self.sum += sample as u16;
        self.index = (self.index + 1) % POT_WINDOW;
        self.average()
    }

    /// Current average (integer division) without folding in a sample
    pub fn average(&self) -> u8 {
        (self.sum / POT_WINDOW as u16) as u8
    }

    /// True when a report interval has elapsed; arms the next interval
    pub fn report_due(&mut self, now_ms: u64) -> bool {
        if now_ms.wrapping_sub(self.last_report_ms) >= REPORT_INTERVAL_MS {
            self.last_report_ms = now_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_input_converges_within_window() {
        let mut sampler = PotSampler::new();
        let mut avg = 0;
        for _ in 0..POT_WINDOW {
            avg = sampler.update(200);
        }
        assert_eq!(avg, 200);
    }

    #[test]
    fn test_single_spike_average() {
        let mut sampler = PotSampler::new();
        for _ in 0..POT_WINDOW - 1 {
            sampler.update(0);
        }
        // [0 x19, 255] -> 255 / 20 = 12 (truncated)
        assert_eq!(sampler.update(255), 12);
    }

    #[test]
    fn test_sum_tracks_window_contents() {
        let mut sampler = PotSampler::new();
        // Overfill so the circular index wraps and old slots are replaced
        for i in 0..3 * POT_WINDOW {
            sampler.update((i % 251) as u8);
            let expected: u16 = sampler.window.iter().map(|&s| s as u16).sum();
            assert_eq!(sampler.sum, expected);
        }
    }

    #[test]
    fn test_report_cadence() {
        let mut sampler = PotSampler::new();
        assert!(!sampler.report_due(0));
        assert!(!sampler.report_due(79));
        assert!(sampler.report_due(80));
        // Interval re-arms from the accepted report
        assert!(!sampler.report_due(159));
        assert!(sampler.report_due(160));
    }
}
