//! SSD1309 OLED Display Driver
//!
//! Driver for 128x64 SSD1309-based OLED panels on a 4-wire SPI bus.
//! Keeps a full frame buffer and exposes the pixel primitives the
//! renderer draws with; nothing reaches the panel until `flush`.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1309 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const RAM_CONTENT: u8 = 0xA4;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
}

/// SSD1309 OLED driver
pub struct Ssd1309<SPI, OUT> {
    spi: SPI,
    /// Data/command select (low = command, high = data)
    dc: OUT,
    /// Chip select, active low
    cs: OUT,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<SPI, OUT> Ssd1309<SPI, OUT>
where
    SPI: SpiBus,
    OUT: OutputPin,
{
    /// Create a new SSD1309 driver
    pub fn new(spi: SPI, dc: OUT, cs: OUT) -> Self {
        Self {
            spi,
            dc,
            cs,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display
    ///
    /// The caller is expected to have pulsed the reset line already.
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DESELECT,
            0x34,
            cmd::RAM_CONTENT,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        Ok(())
    }

    /// Send a command byte to the display
    fn command(&mut self, cmd: u8) -> Result<(), SPI::Error> {
        let _ = self.dc.set_low();
        let _ = self.cs.set_low();
        let result = self.spi.write(&[cmd]);
        let _ = self.cs.set_high();
        result
    }

    /// Clear the frame buffer
    pub fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Set a single pixel in the frame buffer
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1 << (y % 8);
        if on {
            self.buffer[y / 8][x] |= mask;
        } else {
            self.buffer[y / 8][x] &= !mask;
        }
    }

    /// Draw a vertical line from y0 to y1 inclusive (either order)
    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in top..=bottom {
            self.set_pixel(x, y, true);
        }
    }

    /// Fill a rectangle, clipped to the display
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for px in x..(x + w).min(WIDTH) {
            for py in y..(y + h).min(HEIGHT) {
                self.set_pixel(px, py, true);
            }
        }
    }

    /// Flush the frame buffer to the display
    pub fn flush(&mut self) -> Result<(), SPI::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | (page as u8))?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let _ = self.dc.set_high();
            let _ = self.cs.set_low();
            let result = self.spi.write(&self.buffer[page]);
            let _ = self.cs.set_high();
            result?;
        }

        Ok(())
    }

    /// Set display contrast (0-255)
    #[allow(dead_code)]
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), SPI::Error> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn the panel on or off
    #[allow(dead_code)]
    pub fn set_display_on(&mut self, on: bool) -> Result<(), SPI::Error> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }
}
