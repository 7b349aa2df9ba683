//! Kyma - OLED Audio Visualizer Firmware
//!
//! Firmware for an RP2040-driven 128x64 OLED unit. The host streams
//! visualization frames (waveform, bar volume, spectrum) over UART; the
//! device renders whichever view is active and reports its sensitivity
//! pot and mode button back on the same link.
//!
//! Everything runs in one cooperative loop: drain the UART, fold in one
//! pot sample, poll the button, yield. There is no second writer to any
//! of the visualizer state, so no locking anywhere.

#![no_std]
#![no_main]

mod render;
mod ssd1309;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Async, Channel as AdcChannel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{SPI0, UART0};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, BufferedUartTx, Config as UartConfig, Uart};
use embassy_time::{Duration, Instant, Timer};
use embedded_io::{Read, ReadReady};
use embedded_io_async::Write;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kyma_core::debounce::Debouncer;
use kyma_core::dispatch::Visualizer;
use kyma_core::sampler::PotSampler;
use kyma_protocol::{DeviceReport, FrameParser, MAX_FRAME_SIZE};

use crate::render::OledCanvas;
use crate::ssd1309::Ssd1309;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// UART ring buffers. The largest inbound frame (WAVE) is 260 bytes, so
// the receive side gets enough slack to hold a full frame plus change
// between loop iterations.
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Concrete display type for the visualizer task
type Oled = OledCanvas<Spi<'static, SPI0, spi::Blocking>, Output<'static>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kyma visualizer firmware starting...");

    let p = embassy_rp::init(Default::default());

    // OLED on SPI0 (SCK=GPIO18, MOSI=GPIO19), DC=GPIO20, CS=GPIO21, RST=GPIO22
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let dc = Output::new(p.PIN_20, Level::Low);
    let cs = Output::new(p.PIN_21, Level::High);
    let mut rst = Output::new(p.PIN_22, Level::High);

    // Panel reset pulse before the init sequence
    rst.set_low();
    Timer::after(Duration::from_millis(10)).await;
    rst.set_high();
    Timer::after(Duration::from_millis(10)).await;

    let mut canvas = OledCanvas::new(Ssd1309::new(spi, dc, cs));
    if let Err(e) = canvas.init() {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    // Host link on UART0 (TX=GPIO0, RX=GPIO1), 115200 8N1
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 512]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for host link");

    // Sensitivity pot on ADC0 (GPIO26), mode button on GPIO15 (active low)
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let pot = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let button = Input::new(p.PIN_15, Pull::Up);

    spawner
        .spawn(visualizer_task(rx, tx, adc, pot, button, canvas))
        .unwrap();

    info!("Visualizer loop running");
}

/// The single cooperative control loop.
///
/// Per iteration, in order:
/// 1. Drain whatever bytes the transport has buffered through the parser
///    and dispatcher - bounded by what is available now, never waiting
///    for a frame to complete.
/// 2. Fold one pot sample into the moving average; send a `POT ` report
///    if the 80 ms interval has elapsed.
/// 3. Poll the mode button; an accepted toggle cycles the mode and sends
///    a `MODE` report.
/// 4. Yield for ~1 ms to bound the loop frequency.
#[embassy_executor::task]
async fn visualizer_task(
    mut rx: BufferedUartRx,
    mut tx: BufferedUartTx,
    mut adc: Adc<'static, Async>,
    mut pot: AdcChannel<'static>,
    button: Input<'static>,
    mut canvas: Oled,
) {
    info!("Visualizer task started");

    let mut parser = FrameParser::new();
    let mut sampler = PotSampler::new();
    let mut debouncer = Debouncer::new();
    let mut viz = Visualizer::new();
    let mut rx_chunk = [0u8; 64];
    let mut tx_frame = [0u8; MAX_FRAME_SIZE];

    loop {
        // Drain the link. A partial frame stays parked in the parser
        // until its remaining bytes show up on a later iteration.
        while rx.read_ready().unwrap_or(false) {
            match rx.read(&mut rx_chunk) {
                Ok(n) if n > 0 => {
                    for &byte in &rx_chunk[..n] {
                        if let Some(frame) = parser.feed(byte) {
                            if let Err(e) = viz.handle(&frame, &mut canvas) {
                                warn!("Render failed: {:?}", e);
                            }
                        }
                    }
                }
                Ok(_) => break,
                Err(e) => {
                    warn!("UART read error: {:?}", e);
                    break;
                }
            }
        }

        let now = Instant::now().as_millis();

        // One pot sample per iteration; reporting runs on its own clock
        match adc.read(&mut pot).await {
            Ok(raw) => {
                // 12-bit ADC reading down to a wire byte
                let avg = sampler.update((raw >> 4) as u8);
                if sampler.report_due(now) {
                    send_report(&mut tx, &mut tx_frame, DeviceReport::Pot(avg)).await;
                }
            }
            Err(e) => warn!("ADC read error: {:?}", e),
        }

        // An accepted button toggle advances the mode and tells the host
        if debouncer.poll(button.is_low(), now) {
            let mode = viz.mode.cycle();
            info!("Mode toggled to {}", mode);
            send_report(&mut tx, &mut tx_frame, DeviceReport::Mode(mode)).await;
        }

        Timer::after(Duration::from_millis(1)).await;
    }
}

/// Encode a report and write it to the host link
async fn send_report(tx: &mut BufferedUartTx, buf: &mut [u8], report: DeviceReport) {
    let frame = report.to_frame();
    match frame.encode(buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("UART write error: {:?}", e);
            }
        }
        Err(e) => warn!("Report encode failed: {:?}", e),
    }
}
