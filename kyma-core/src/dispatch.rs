//! Mode-gated packet dispatch.

use kyma_protocol::{Frame, HostMessage};

use crate::bars::{scale_volume, BarGraph};
use crate::mode::{ModeSelect, RenderMode};
use crate::spectrum::Spectrum;
use crate::traits::{RenderError, RenderTarget};

/// Complete visualizer state: the mode selector plus the per-renderer
/// arrays.
///
/// Everything here is created once at startup with fixed capacity and is
/// mutated only by the single control loop; there are no process-wide
/// singletons behind it.
#[derive(Debug, Clone)]
pub struct Visualizer {
    /// Current render mode
    pub mode: ModeSelect,
    /// Bar graph history
    pub bars: BarGraph,
    /// Smoothed spectrum bins
    pub spectrum: Spectrum,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizer {
    /// Create a visualizer starting in bar-graph mode
    pub const fn new() -> Self {
        Self {
            mode: ModeSelect::new(RenderMode::Bar),
            bars: BarGraph::new(),
            spectrum: Spectrum::new(),
        }
    }

    /// Route one complete frame.
    ///
    /// State updates (bar history, spectrum bins, mode byte) happen in
    /// every mode; render calls are gated by the current mode, and a
    /// frame for an inactive renderer is consumed silently. Unknown tags
    /// cannot reach this layer - the parser's length table filters them.
    pub fn handle<R: RenderTarget>(
        &mut self,
        frame: &Frame,
        display: &mut R,
    ) -> Result<(), RenderError> {
        let Ok(msg) = HostMessage::from_frame(frame) else {
            // Only reachable with a hand-built frame that violates the
            // length table; drop it like the parser would have
            return Ok(());
        };

        match msg {
            HostMessage::Waveform(samples) => {
                if self.mode.current() == Some(RenderMode::Waveform) {
                    display.draw_waveform(samples)?;
                }
            }
            HostMessage::Volume(volume) => {
                self.bars.push(scale_volume(volume));
                if self.mode.current() == Some(RenderMode::Bar) {
                    display.draw_bars(self.bars.heights())?;
                }
            }
            HostMessage::Pot(_) => {
                // Informational only inbound; the outbound meaning of this
                // tag is produced by the sampler
            }
            HostMessage::Mode(raw) => {
                self.mode.set_raw(raw);
            }
            HostMessage::Spectrum(bins) => {
                self.spectrum.update(bins);
                if self.mode.current() == Some(RenderMode::Fft) {
                    display.draw_spectrum(self.spectrum.bins())?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::BAR_COLUMNS;
    use crate::spectrum::FFT_BINS;
    use kyma_protocol::{Tag, WAVE_PAYLOAD_LEN};

    /// Records render calls instead of driving a panel
    #[derive(Default)]
    struct MockDisplay {
        bars_calls: usize,
        wave_calls: usize,
        fft_calls: usize,
        last_bars: Option<[u8; BAR_COLUMNS]>,
        last_fft: Option<[u8; FFT_BINS]>,
    }

    impl RenderTarget for MockDisplay {
        fn draw_bars(&mut self, heights: &[u8; BAR_COLUMNS]) -> Result<(), RenderError> {
            self.bars_calls += 1;
            self.last_bars = Some(*heights);
            Ok(())
        }

        fn draw_waveform(&mut self, _samples: &[u8; WAVE_PAYLOAD_LEN]) -> Result<(), RenderError> {
            self.wave_calls += 1;
            Ok(())
        }

        fn draw_spectrum(&mut self, bins: &[u8; FFT_BINS]) -> Result<(), RenderError> {
            self.fft_calls += 1;
            self.last_fft = Some(*bins);
            Ok(())
        }
    }

    fn frame(tag: Tag, payload: &[u8]) -> Frame {
        Frame::new(tag, payload).unwrap()
    }

    #[test]
    fn test_bar_frame_in_bar_mode_renders() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();

        viz.handle(&frame(Tag::Bar, &[200]), &mut display).unwrap();

        assert_eq!(display.bars_calls, 1);
        // 200 scaled to 200*63/255 = 49, rising from 0 so no decay
        let bars = display.last_bars.unwrap();
        assert_eq!(bars[BAR_COLUMNS - 1], 49);
    }

    #[test]
    fn test_bar_frame_in_other_mode_updates_state_silently() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();
        viz.mode.set_raw(RenderMode::Waveform.to_byte());

        viz.handle(&frame(Tag::Bar, &[200]), &mut display).unwrap();

        assert_eq!(display.bars_calls, 0);
        assert_eq!(viz.bars.heights()[BAR_COLUMNS - 1], 49);
    }

    #[test]
    fn test_wave_frame_gated_by_mode() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();
        let wave = frame(Tag::Wave, &[128u8; WAVE_PAYLOAD_LEN]);

        viz.handle(&wave, &mut display).unwrap();
        assert_eq!(display.wave_calls, 0); // starts in Bar mode

        viz.mode.set_raw(RenderMode::Waveform.to_byte());
        viz.handle(&wave, &mut display).unwrap();
        assert_eq!(display.wave_calls, 1);
    }

    #[test]
    fn test_fft_frame_smooths_bins() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();
        viz.mode.set_raw(RenderMode::Fft.to_byte());

        viz.handle(&frame(Tag::Fft, &[60u8; FFT_BINS]), &mut display)
            .unwrap();
        viz.handle(&frame(Tag::Fft, &[0u8; FFT_BINS]), &mut display)
            .unwrap();

        assert_eq!(display.fft_calls, 2);
        // Falling bins decay: (60*6 + 0*5) / 11 = 32
        assert_eq!(display.last_fft.unwrap(), [32u8; FFT_BINS]);
    }

    #[test]
    fn test_mode_frame_switches_renderer() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();

        viz.handle(
            &frame(Tag::Mode, &[RenderMode::Fft.to_byte()]),
            &mut display,
        )
        .unwrap();

        assert_eq!(viz.mode.current(), Some(RenderMode::Fft));
    }

    #[test]
    fn test_out_of_range_mode_disables_all_renderers() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();

        viz.handle(&frame(Tag::Mode, &[5]), &mut display).unwrap();
        assert_eq!(viz.mode.raw(), 5);

        viz.handle(&frame(Tag::Wave, &[0u8; WAVE_PAYLOAD_LEN]), &mut display)
            .unwrap();
        viz.handle(&frame(Tag::Bar, &[255]), &mut display).unwrap();
        viz.handle(&frame(Tag::Fft, &[255u8; FFT_BINS]), &mut display)
            .unwrap();

        assert_eq!(display.bars_calls, 0);
        assert_eq!(display.wave_calls, 0);
        assert_eq!(display.fft_calls, 0);
        // State still updated behind the dark screen
        assert_eq!(viz.bars.heights()[BAR_COLUMNS - 1], 63);
    }

    #[test]
    fn test_inbound_pot_is_discarded() {
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();
        let before = viz.clone();

        viz.handle(&frame(Tag::Pot, &[99]), &mut display).unwrap();

        assert_eq!(display.bars_calls + display.wave_calls + display.fft_calls, 0);
        assert_eq!(viz.bars.heights(), before.bars.heights());
        assert_eq!(viz.mode.raw(), before.mode.raw());
    }

    #[test]
    fn test_parsed_stream_end_to_end() {
        // Bytes through parser and dispatcher, the way the loop drives it
        use kyma_protocol::FrameParser;

        let mut parser = FrameParser::new();
        let mut viz = Visualizer::new();
        let mut display = MockDisplay::default();

        let mut stream: std::vec::Vec<u8> = std::vec::Vec::new();
        stream.extend_from_slice(b"BAR \xff");
        stream.extend_from_slice(b"MODE\x02");
        stream.extend_from_slice(b"FFT ");
        stream.extend_from_slice(&[100u8; FFT_BINS]);

        for &byte in &stream {
            if let Some(f) = parser.feed(byte) {
                viz.handle(&f, &mut display).unwrap();
            }
        }

        assert_eq!(display.bars_calls, 1);
        assert_eq!(display.fft_calls, 1);
        assert_eq!(viz.mode.current(), Some(RenderMode::Fft));
    }
}
