//! Render mode selection.

/// Number of modes the local button cycles through
pub const MODE_COUNT: u8 = 3;

/// The currently active visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Scrolling volume bar graph
    Bar,
    /// Peak/trough waveform
    Waveform,
    /// Spectrum magnitude bins
    Fft,
}

impl RenderMode {
    /// Parse a mode from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(RenderMode::Bar),
            1 => Some(RenderMode::Waveform),
            2 => Some(RenderMode::Fft),
            _ => None,
        }
    }

    /// Wire byte for this mode
    pub fn to_byte(self) -> u8 {
        match self {
            RenderMode::Bar => 0,
            RenderMode::Waveform => 1,
            RenderMode::Fft => 2,
        }
    }
}

/// Holds the current mode byte and answers mode-gating queries.
///
/// The inbound `MODE` path is deliberately permissive: the raw byte is
/// stored as-is, and a value outside the known set simply matches no
/// renderer, so the screen goes quiet rather than the link erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelect {
    raw: u8,
}

impl Default for ModeSelect {
    fn default() -> Self {
        Self::new(RenderMode::Bar)
    }
}

impl ModeSelect {
    /// Create a selector starting in the given mode
    pub const fn new(initial: RenderMode) -> Self {
        Self {
            raw: initial as u8,
        }
    }

    /// Current mode, or `None` when the stored byte is out of range
    pub fn current(&self) -> Option<RenderMode> {
        RenderMode::from_byte(self.raw)
    }

    /// Raw stored mode byte
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Overwrite the mode with an externally supplied byte, unvalidated
    pub fn set_raw(&mut self, raw: u8) {
        self.raw = raw;
    }

    /// Advance to the next mode cyclically; returns the new raw value.
    ///
    /// Also recovers from an out-of-range byte: the modulo folds any
    /// stored value back into the known set.
    pub fn cycle(&mut self) -> u8 {
        self.raw = self.raw.wrapping_add(1) % MODE_COUNT;
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_roundtrip() {
        for mode in [RenderMode::Bar, RenderMode::Waveform, RenderMode::Fft] {
            assert_eq!(RenderMode::from_byte(mode.to_byte()), Some(mode));
        }
        assert_eq!(RenderMode::from_byte(3), None);
        assert_eq!(RenderMode::from_byte(255), None);
    }

    #[test]
    fn test_cycle_covers_all_modes() {
        let mut sel = ModeSelect::new(RenderMode::Bar);
        assert_eq!(sel.cycle(), 1);
        assert_eq!(sel.current(), Some(RenderMode::Waveform));
        assert_eq!(sel.cycle(), 2);
        assert_eq!(sel.current(), Some(RenderMode::Fft));
        assert_eq!(sel.cycle(), 0);
        assert_eq!(sel.current(), Some(RenderMode::Bar));
    }

    #[test]
    fn test_out_of_range_matches_nothing() {
        let mut sel = ModeSelect::default();
        sel.set_raw(5);
        assert_eq!(sel.current(), None);
        assert_eq!(sel.raw(), 5);
    }

    #[test]
    fn test_cycle_recovers_from_out_of_range() {
        let mut sel = ModeSelect::default();
        sel.set_raw(200);
        let raw = sel.cycle();
        assert!(raw < MODE_COUNT);
        assert!(sel.current().is_some());
    }
}
