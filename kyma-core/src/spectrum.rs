//! Spectrum bin state.

use crate::smooth::smooth;
use kyma_protocol::FFT_PAYLOAD_LEN;

/// Number of spectrum bins (one per `FFT ` payload byte)
pub const FFT_BINS: usize = FFT_PAYLOAD_LEN;

/// Smoothed spectrum magnitudes.
///
/// Unlike the bar graph there is no history: each bin is smoothed in
/// place against the latest frame.
#[derive(Debug, Clone)]
pub struct Spectrum {
    bins: [u8; FFT_BINS],
}

impl Default for Spectrum {
    fn default() -> Self {
        Self::new()
    }
}

impl Spectrum {
    /// Create an empty spectrum
    pub const fn new() -> Self {
        Self { bins: [0; FFT_BINS] }
    }

    /// Smooth each bin against the incoming magnitudes
    pub fn update(&mut self, magnitudes: &[u8; FFT_BINS]) {
        for (bin, &mag) in self.bins.iter_mut().zip(magnitudes) {
            *bin = smooth(*bin, mag);
        }
    }

    /// Current bin values
    pub fn bins(&self) -> &[u8; FFT_BINS] {
        &self.bins
    }
}
