//! Kyma host link protocol
//!
//! This crate defines the serial protocol between the audio host and the
//! Kyma display unit. The protocol is deliberately minimal: there is no
//! length prefix, no checksum, and no acknowledgment - framing relies
//! entirely on a fixed per-tag payload length table.
//!
//! # Wire format
//!
//! All packets, in both directions, look the same:
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ TAG              │ PAYLOAD                  │
//! │ 4B ASCII, padded │ N bytes, fixed per tag   │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! | Tag    | Len | Direction   | Meaning                                 |
//! |--------|-----|-------------|-----------------------------------------|
//! | `WAVE` | 256 | host→device | 128 interleaved (peak, trough) pairs    |
//! | `BAR ` | 1   | host→device | volume byte for the bar graph           |
//! | `POT ` | 1   | device→host | smoothed analog reading                 |
//! | `MODE` | 1   | both        | render mode index                       |
//! | `FFT ` | 32  | host→device | 32 spectrum magnitude bins              |
//!
//! A 4-byte sequence that matches no known tag is dropped and the parser
//! restarts on the following byte; there is no re-scan of the dropped
//! bytes.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod frame;
pub mod messages;
pub mod tag;

pub use frame::{Frame, FrameError, FrameParser, MAX_FRAME_SIZE};
pub use messages::{DeviceReport, HostMessage};
pub use tag::{Tag, FFT_PAYLOAD_LEN, MAX_PAYLOAD_LEN, TAG_LEN, WAVE_PAYLOAD_LEN};
