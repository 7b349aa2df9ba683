//! Render target implementation over the SSD1309 panel.
//!
//! Translates the core's column/bin arrays into pixel primitives. Every
//! draw call repaints the whole frame buffer and flushes it.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use kyma_core::bars::BAR_COLUMNS;
use kyma_core::spectrum::FFT_BINS;
use kyma_core::traits::{RenderError, RenderTarget};
use kyma_protocol::WAVE_PAYLOAD_LEN;

use crate::ssd1309::{Ssd1309, HEIGHT, WIDTH};

/// Pixel width of one bar-graph column
const BAR_WIDTH: usize = WIDTH / BAR_COLUMNS;

/// Pixel width of one spectrum bin slot (3 px bar + 1 px gap)
const BIN_WIDTH: usize = WIDTH / FFT_BINS;

/// Canvas wrapping the OLED driver
pub struct OledCanvas<SPI, OUT> {
    panel: Ssd1309<SPI, OUT>,
}

impl<SPI, OUT> OledCanvas<SPI, OUT>
where
    SPI: SpiBus,
    OUT: OutputPin,
{
    /// Wrap an OLED driver
    pub fn new(panel: Ssd1309<SPI, OUT>) -> Self {
        Self { panel }
    }

    /// Initialize the panel and show the boot splash
    pub fn init(&mut self) -> Result<(), RenderError> {
        self.panel.init().map_err(|_| RenderError::Communication)?;
        self.draw_splash()
    }

    /// Draw the device name centered on screen
    fn draw_splash(&mut self) -> Result<(), RenderError> {
        const SCALE: usize = 2;
        const CHAR_STEP: usize = 5 * SCALE + 4;
        let x0 = (WIDTH - (SPLASH_GLYPHS.len() * CHAR_STEP - 4)) / 2;
        let y0 = (HEIGHT - 7 * SCALE) / 2;

        self.panel.clear();
        for (i, glyph) in SPLASH_GLYPHS.iter().enumerate() {
            let gx = x0 + i * CHAR_STEP;
            for (col, &bits) in glyph.iter().enumerate() {
                for row in 0..7 {
                    if bits & (1 << row) != 0 {
                        self.panel.fill_rect(
                            gx + col * SCALE,
                            y0 + row * SCALE,
                            SCALE,
                            SCALE,
                        );
                    }
                }
            }
        }
        self.panel.flush().map_err(|_| RenderError::Communication)
    }

    /// Map a 0-255 sample byte to a screen row (255 at the top)
    fn sample_to_y(value: u8) -> usize {
        (255 - value as usize) * (HEIGHT - 1) / 255
    }
}

impl<SPI, OUT> RenderTarget for OledCanvas<SPI, OUT>
where
    SPI: SpiBus,
    OUT: OutputPin,
{
    fn draw_bars(&mut self, heights: &[u8; BAR_COLUMNS]) -> Result<(), RenderError> {
        self.panel.clear();
        for (i, &h) in heights.iter().enumerate() {
            if h > 0 {
                let h = h as usize;
                self.panel.fill_rect(i * BAR_WIDTH, HEIGHT - h, BAR_WIDTH, h);
            }
        }
        self.panel.flush().map_err(|_| RenderError::Communication)
    }

    fn draw_waveform(&mut self, samples: &[u8; WAVE_PAYLOAD_LEN]) -> Result<(), RenderError> {
        self.panel.clear();
        for x in 0..WIDTH {
            let peak = samples[2 * x];
            let trough = samples[2 * x + 1];
            self.panel
                .draw_vline(x, Self::sample_to_y(peak), Self::sample_to_y(trough));
        }
        self.panel.flush().map_err(|_| RenderError::Communication)
    }

    fn draw_spectrum(&mut self, bins: &[u8; FFT_BINS]) -> Result<(), RenderError> {
        self.panel.clear();
        for (i, &bin) in bins.iter().enumerate() {
            let h = bin as usize * (HEIGHT - 1) / 255;
            if h > 0 {
                self.panel
                    .fill_rect(i * BIN_WIDTH, HEIGHT - h, BIN_WIDTH - 1, h);
            }
        }
        self.panel.flush().map_err(|_| RenderError::Communication)
    }
}

/// 5x7 column glyphs for the splash text "KYMA"
const SPLASH_GLYPHS: [[u8; 5]; 4] = [
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
];
