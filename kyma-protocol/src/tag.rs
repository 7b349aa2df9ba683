//! Packet tags and the per-tag payload length table.

/// Length of a tag on the wire, in bytes
pub const TAG_LEN: usize = 4;

/// Payload length of a `WAVE` packet (128 interleaved peak/trough pairs)
pub const WAVE_PAYLOAD_LEN: usize = 256;

/// Payload length of an `FFT ` packet (32 magnitude bins)
pub const FFT_PAYLOAD_LEN: usize = 32;

/// Largest payload any tag declares
pub const MAX_PAYLOAD_LEN: usize = WAVE_PAYLOAD_LEN;

/// Packet kind identifier.
///
/// Tags are 4 ASCII bytes, space-padded to width 4. The set is closed:
/// the parser only hands frames with one of these tags downstream, so
/// dispatch can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    /// Waveform column data
    Wave,
    /// Single volume byte for the bar graph
    Bar,
    /// Smoothed potentiometer reading
    Pot,
    /// Render mode index
    Mode,
    /// Spectrum magnitude bins
    Fft,
}

impl Tag {
    /// Match a 4-byte wire tag against the known set
    pub fn from_bytes(bytes: &[u8; TAG_LEN]) -> Option<Self> {
        match bytes {
            b"WAVE" => Some(Tag::Wave),
            b"BAR " => Some(Tag::Bar),
            b"POT " => Some(Tag::Pot),
            b"MODE" => Some(Tag::Mode),
            b"FFT " => Some(Tag::Fft),
            _ => None,
        }
    }

    /// Wire representation of this tag
    pub fn as_bytes(self) -> &'static [u8; TAG_LEN] {
        match self {
            Tag::Wave => b"WAVE",
            Tag::Bar => b"BAR ",
            Tag::Pot => b"POT ",
            Tag::Mode => b"MODE",
            Tag::Fft => b"FFT ",
        }
    }

    /// Payload length this tag declares.
    ///
    /// There is no length prefix on the wire; framing relies entirely on
    /// this table.
    pub const fn payload_len(self) -> usize {
        match self {
            Tag::Wave => WAVE_PAYLOAD_LEN,
            Tag::Bar => 1,
            Tag::Pot => 1,
            Tag::Mode => 1,
            Tag::Fft => FFT_PAYLOAD_LEN,
        }
    }

    /// All known tags, for iteration in tests and tooling
    pub const ALL: [Tag; 5] = [Tag::Wave, Tag::Bar, Tag::Pot, Tag::Mode, Tag::Fft];
}
