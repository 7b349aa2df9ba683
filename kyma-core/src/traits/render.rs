//! Render target trait toward the display subsystem.

use crate::bars::BAR_COLUMNS;
use crate::spectrum::FFT_BINS;
use kyma_protocol::WAVE_PAYLOAD_LEN;

/// Errors surfaced by a display backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Bus communication with the panel failed
    Communication,
}

/// Drawing surface for the three visualizations.
///
/// Implementations own the pixel primitives and the buffer flush; the
/// core only decides what to draw and when. Each call replaces the whole
/// screen.
pub trait RenderTarget {
    /// Draw the scrolling bar graph, one height per column
    fn draw_bars(&mut self, heights: &[u8; BAR_COLUMNS]) -> Result<(), RenderError>;

    /// Draw the waveform from interleaved (peak, trough) column pairs
    fn draw_waveform(&mut self, samples: &[u8; WAVE_PAYLOAD_LEN]) -> Result<(), RenderError>;

    /// Draw the spectrum bins
    fn draw_spectrum(&mut self, bins: &[u8; FFT_BINS]) -> Result<(), RenderError>;
}
