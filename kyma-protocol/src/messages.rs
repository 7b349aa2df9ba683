//! Typed views over frames.
//!
//! Host→device frames decode into [`HostMessage`]; device→host reports
//! encode through [`DeviceReport`]. Both directions share the same wire
//! format, so a `MODE` frame can appear on either side of the link.

use crate::frame::{Frame, FrameError};
use crate::tag::{Tag, FFT_PAYLOAD_LEN, WAVE_PAYLOAD_LEN};

/// Message decoded from a host-originated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage<'a> {
    /// 128 interleaved (peak, trough) column pairs
    Waveform(&'a [u8; WAVE_PAYLOAD_LEN]),
    /// Volume byte for the bar graph
    Volume(u8),
    /// Pot reading; informational only in this direction
    Pot(u8),
    /// Render mode index, accepted as-is with no bounds check
    Mode(u8),
    /// Spectrum magnitude bins
    Spectrum(&'a [u8; FFT_PAYLOAD_LEN]),
}

impl<'a> HostMessage<'a> {
    /// Decode a frame into a typed message.
    ///
    /// Frames emitted by the parser always satisfy the length table;
    /// frames built by hand are still checked here.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.tag {
            Tag::Wave => {
                let samples = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::LengthMismatch)?;
                Ok(HostMessage::Waveform(samples))
            }
            Tag::Bar => Ok(HostMessage::Volume(single_byte(frame)?)),
            Tag::Pot => Ok(HostMessage::Pot(single_byte(frame)?)),
            Tag::Mode => Ok(HostMessage::Mode(single_byte(frame)?)),
            Tag::Fft => {
                let bins = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::LengthMismatch)?;
                Ok(HostMessage::Spectrum(bins))
            }
        }
    }
}

fn single_byte(frame: &Frame) -> Result<u8, FrameError> {
    if frame.payload.len() != 1 {
        return Err(FrameError::LengthMismatch);
    }
    Ok(frame.payload[0])
}

/// Report sent from the device to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceReport {
    /// Smoothed pot average; the host maps this to input sensitivity
    Pot(u8),
    /// Mode change from the local button, so the host stays in step
    Mode(u8),
}

impl DeviceReport {
    /// Encode this report into a frame
    pub fn to_frame(&self) -> Frame {
        match *self {
            DeviceReport::Pot(value) => Frame::single(Tag::Pot, value),
            DeviceReport::Mode(mode) => Frame::single(Tag::Mode, mode),
        }
    }
}
